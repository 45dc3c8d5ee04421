//! Error types and axum `IntoResponse` implementation.
//!
//! Expected failures (bad form input, wrong password, missing permission) are
//! reported to the user as flash messages by the handlers themselves; this
//! type covers what is left. Validation errors that reach a response were not
//! handled where they should have been, so they are a 500 like any other.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid input: {0}")]
  Invalid(#[from] gradebook_core::Error),
  /// The path names no resource, e.g. a non-numeric student id.
  #[error("not found")]
  NotFound,
  #[error("session_secret must be at least {0} bytes")]
  WeakSecret(usize),
  #[error("password hashing failed: {0}")]
  PasswordHash(String),
  #[error("template error: {0}")]
  Template(#[from] askama::Error),
  #[error("chart error: {0}")]
  Chart(#[from] gradebook_charts::Error),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
      other => {
        tracing::error!(error = %other, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
    }
  }
}
