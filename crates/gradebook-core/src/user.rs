//! User accounts and roles.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// What a signed-in user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  /// May add and update student records.
  Admin,
  /// Read-only access.
  User,
}

impl Role {
  pub fn as_str(self) -> &'static str {
    match self {
      Role::Admin => "admin",
      Role::User => "user",
    }
  }

  pub fn is_admin(self) -> bool { matches!(self, Role::Admin) }
}

impl std::str::FromStr for Role {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "admin" => Ok(Role::Admin),
      "user" => Ok(Role::User),
      other => Err(Error::UnknownRole(other.to_owned())),
    }
  }
}

impl std::fmt::Display for Role {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A persisted user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
  pub id:            i64,
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub role:          Role,
}

/// Input for [`GradebookStore::create_user`](crate::store::GradebookStore::create_user).
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username:      String,
  pub password_hash: String,
  pub role:          Role,
}

/// Result of attempting to create a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateUserOutcome {
  Created(User),
  /// The username is already registered; nothing was written.
  UsernameTaken,
}
