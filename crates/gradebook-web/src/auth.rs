//! Password hashing, account helpers and the session gate extractors.
//!
//! Handlers opt into authentication by taking a [`CurrentUser`] (any signed-in
//! user) or an [`AdminUser`] (role `admin`) argument.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::request::Parts,
  response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use gradebook_core::{
  store::GradebookStore,
  user::{CreateUserOutcome, NewUser, Role, User},
};
use rand_core::OsRng;

use crate::{
  AppState,
  error::Error,
  flash::{self, Flash},
  session::Session,
};

/// Shown for every failed login, whichever field was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password!";

/// Shown when a non-admin reaches the add-student pages.
pub const ADMIN_ONLY_ADD: &str = "Only admin can add students!";

/// Shown when a non-admin reaches the update-student pages.
pub const ADMIN_ONLY_UPDATE: &str = "Only admin can update students!";

// ─── Passwords ───────────────────────────────────────────────────────────────

/// Hash `password` into an argon2 PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// Check `password` against a stored PHC string. An unparsable hash never
/// verifies.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
  PasswordHash::new(password_hash)
    .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
    .is_ok()
}

// ─── Accounts ────────────────────────────────────────────────────────────────

/// Validate and create an account with a hashed password.
pub async fn register_user<S>(
  store:    &S,
  username: &str,
  password: &str,
  role:     Role,
) -> Result<CreateUserOutcome, Error>
where
  S: GradebookStore,
{
  let username = username.trim();
  if username.is_empty() {
    return Err(gradebook_core::Error::EmptyUsername.into());
  }
  if password.is_empty() {
    return Err(gradebook_core::Error::EmptyPassword.into());
  }

  let new_user = NewUser {
    username:      username.to_owned(),
    password_hash: hash_password(password)?,
    role,
  };
  store.create_user(new_user).await.map_err(Error::store)
}

/// Look up `username` and check `password`. The username is trimmed the
/// same way [`register_user`] trims it. `None` covers both an unknown user
/// and a wrong password.
pub async fn authenticate<S>(
  store:    &S,
  username: &str,
  password: &str,
) -> Result<Option<User>, Error>
where
  S: GradebookStore,
{
  let user = store
    .find_user_by_username(username.trim())
    .await
    .map_err(Error::store)?;

  Ok(user.filter(|u| verify_password(password, &u.password_hash)))
}

// ─── Extractors ──────────────────────────────────────────────────────────────

/// Any signed-in user. Rejects with a redirect to `/login`.
pub struct CurrentUser(pub Session);

/// A signed-in user with the admin role. Signed-out requests are sent to
/// `/login`; other users are sent to `/home` with a warning.
pub struct AdminUser(pub Session);

fn session_from_parts<S>(parts: &Parts, state: &AppState<S>) -> Option<Session>
where
  S: GradebookStore,
{
  let jar = SignedCookieJar::from_headers(&parts.headers, state.key.clone());
  Session::from_jar(&jar)
}

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: GradebookStore + Clone + Send + Sync + 'static,
{
  type Rejection = Redirect;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    session_from_parts(parts, state)
      .map(CurrentUser)
      .ok_or_else(|| Redirect::to("/login"))
  }
}

impl<S> FromRequestParts<AppState<S>> for AdminUser
where
  S: GradebookStore + Clone + Send + Sync + 'static,
{
  type Rejection = Response;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let Some(session) = session_from_parts(parts, state) else {
      return Err(Redirect::to("/login").into_response());
    };

    if !session.is_admin() {
      tracing::warn!(
        username = %session.username,
        path = %parts.uri.path(),
        "non-admin attempted an admin action",
      );
      let jar = SignedCookieJar::from_headers(&parts.headers, state.key.clone());
      let message = admin_only_message(parts.uri.path());
      return Err(flash::redirect(jar, "/home", Flash::warning(message)));
    }

    Ok(AdminUser(session))
  }
}

/// The warning for a non-admin hitting `path`.
fn admin_only_message(path: &str) -> &'static str {
  if path.starts_with("/update") { ADMIN_ONLY_UPDATE } else { ADMIN_ONLY_ADD }
}
