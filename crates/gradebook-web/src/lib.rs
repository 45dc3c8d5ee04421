//! HTTP layer for the gradebook.
//!
//! Exposes an axum [`Router`] serving server-rendered HTML pages backed by any
//! [`GradebookStore`]. Identity lives in a signed session cookie; see
//! [`session`] and [`auth`].

pub mod auth;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod session;
pub mod views;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use gradebook_core::store::GradebookStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{accounts, home, stats, students};

/// Shortest `session_secret` accepted for deriving the cookie signing key.
pub const MIN_SECRET_LEN: usize = 32;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `GRADEBOOK_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:           String,
  pub port:           u16,
  pub database_path:  PathBuf,
  /// Master secret the cookie signing key is derived from.
  pub session_secret: String,
}

impl ServerConfig {
  /// Derive the cookie signing key from `session_secret`.
  pub fn signing_key(&self) -> Result<Key, Error> {
    if self.session_secret.len() < MIN_SECRET_LEN {
      return Err(Error::WeakSecret(MIN_SECRET_LEN));
    }
    Ok(Key::derive_from(self.session_secret.as_bytes()))
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: GradebookStore> {
  pub store: Arc<S>,
  /// Signs the session and flash cookies.
  pub key:   Key,
}

impl<S: GradebookStore> FromRef<AppState<S>> for Key {
  fn from_ref(state: &AppState<S>) -> Self { state.key.clone() }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the gradebook site.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: GradebookStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/",             get(students::list::<S>))
    .route("/student_list", get(students::list::<S>))
    .route("/home",         get(home::show))
    .route("/stats",        get(stats::show::<S>))
    .route("/add_student",  get(students::new_form).post(students::create::<S>))
    .route("/update/{id}",  get(students::edit_form::<S>).post(students::update::<S>))
    .route("/register",     get(accounts::register_form).post(accounts::register::<S>))
    .route("/login",        get(accounts::login_form).post(accounts::login::<S>))
    .route("/logout",       get(accounts::logout))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests;
