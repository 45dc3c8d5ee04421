//! Conversions between SQLite rows and gradebook domain types.
//!
//! Grades are stored as their human-readable label and roles as their
//! lowercase name; both are decoded strictly, so a hand-edited row with an
//! unknown value surfaces as an error instead of being guessed at.

use gradebook_core::{
  grade::{Grade, Scores},
  student::Student,
  user::{Role, User},
};

use crate::Result;

pub const STUDENT_COLUMNS: &str =
  "id, name, math, science, english, total_marks, percentage, grade";

pub const USER_COLUMNS: &str = "id, username, password, role";

// ─── Students ────────────────────────────────────────────────────────────────

/// Raw values read directly from a `students` row.
pub struct RawStudent {
  pub id:          i64,
  pub name:        String,
  pub math:        f64,
  pub science:     f64,
  pub english:     f64,
  pub total_marks: f64,
  pub percentage:  f64,
  pub grade:       String,
}

impl RawStudent {
  /// Row mapper for queries selecting [`STUDENT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      math:        row.get(2)?,
      science:     row.get(3)?,
      english:     row.get(4)?,
      total_marks: row.get(5)?,
      percentage:  row.get(6)?,
      grade:       row.get(7)?,
    })
  }

  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      id:         self.id,
      name:       self.name,
      scores:     Scores::new(self.math, self.science, self.english),
      total:      self.total_marks,
      percentage: self.percentage,
      grade:      Grade::from_label(&self.grade)?,
    })
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub id:       i64,
  pub username: String,
  pub password: String,
  pub role:     String,
}

impl RawUser {
  /// Row mapper for queries selecting [`USER_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:       row.get(0)?,
      username: row.get(1)?,
      password: row.get(2)?,
      role:     row.get(3)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:            self.id,
      username:      self.username,
      password_hash: self.password,
      role:          self.role.parse::<Role>()?,
    })
  }
}
