//! Registration, login and logout.

use axum::{Form, extract::State, response::Response};
use axum_extra::extract::cookie::SignedCookieJar;
use gradebook_core::{
  store::GradebookStore,
  user::{CreateUserOutcome, Role},
};
use serde::Deserialize;

use crate::{
  AppState,
  auth::{self, INVALID_CREDENTIALS},
  error::Error,
  flash::{self, Flash},
  handlers::{layout, render},
  session::Session,
  views::{LoginPage, RegisterPage},
};

pub const USERNAME_TAKEN: &str = "Username already exists!";
pub const MISSING_CREDENTIALS: &str = "Please enter both username and password!";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
  pub username: String,
  pub password: String,
  pub role:     String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
  pub username: String,
  pub password: String,
}

// ─── Register ────────────────────────────────────────────────────────────────

pub async fn register_form(jar: SignedCookieJar) -> Result<Response, Error> {
  let session = Session::from_jar(&jar);
  let (jar, layout) = layout(jar, session.as_ref());
  render(jar, RegisterPage { layout })
}

pub async fn register<S>(
  State(state): State<AppState<S>>,
  jar: SignedCookieJar,
  Form(form): Form<RegisterForm>,
) -> Result<Response, Error>
where
  S: GradebookStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // A missing role field registers a plain user.
  let role = match form.role.as_str() {
    "" => Ok(Role::User),
    raw => raw.parse::<Role>(),
  };

  let outcome = match role {
    Ok(role) => {
      auth::register_user(&*state.store, &form.username, &form.password, role).await
    }
    Err(e) => Err(e.into()),
  };

  match outcome {
    Ok(CreateUserOutcome::Created(user)) => {
      tracing::info!(username = %user.username, role = %user.role, "user registered");
      Ok(flash::redirect(
        jar,
        "/login",
        Flash::success("Registration successful! Please login."),
      ))
    }
    Ok(CreateUserOutcome::UsernameTaken) => {
      tracing::info!(username = %form.username.trim(), "username already taken");
      Ok(flash::redirect(jar, "/login", Flash::error(USERNAME_TAKEN)))
    }
    Err(Error::Invalid(e)) => {
      Ok(flash::redirect(jar, "/register", Flash::error(e.to_string())))
    }
    Err(e) => Err(e),
  }
}

// ─── Login / logout ──────────────────────────────────────────────────────────

pub async fn login_form(jar: SignedCookieJar) -> Result<Response, Error> {
  let session = Session::from_jar(&jar);
  let (jar, layout) = layout(jar, session.as_ref());
  render(jar, LoginPage { layout })
}

pub async fn login<S>(
  State(state): State<AppState<S>>,
  jar: SignedCookieJar,
  Form(form): Form<LoginForm>,
) -> Result<Response, Error>
where
  S: GradebookStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if form.username.trim().is_empty() || form.password.is_empty() {
    return Ok(flash::redirect(jar, "/login", Flash::error(MISSING_CREDENTIALS)));
  }

  let Some(user) = auth::authenticate(&*state.store, &form.username, &form.password).await?
  else {
    tracing::warn!(username = %form.username.trim(), "failed login");
    return Ok(flash::redirect(jar, "/login", Flash::error(INVALID_CREDENTIALS)));
  };

  tracing::info!(username = %user.username, role = %user.role, "user logged in");
  let jar = Session::for_user(&user).save(jar);
  Ok(flash::redirect(
    jar,
    "/home",
    Flash::success(format!("Welcome {}!", user.username)),
  ))
}

pub async fn logout(jar: SignedCookieJar) -> Response {
  if let Some(session) = Session::from_jar(&jar) {
    tracing::info!(username = %session.username, "user logged out");
  }
  let jar = Session::clear(jar);
  flash::redirect(jar, "/login", Flash::success("Logged out successfully!"))
}
