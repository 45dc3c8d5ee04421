//! Error types for `gradebook-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{subject} score must be a number")]
  InvalidScore { subject: &'static str },

  #[error("{subject} score must be between 0 and 100, got {value}")]
  ScoreOutOfRange { subject: &'static str, value: f64 },

  #[error("student name must not be empty")]
  EmptyName,

  #[error("username must not be empty")]
  EmptyUsername,

  #[error("password must not be empty")]
  EmptyPassword,

  #[error("unknown role: {0:?}")]
  UnknownRole(String),

  #[error("unknown grade label: {0:?}")]
  UnknownGrade(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
