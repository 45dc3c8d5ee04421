//! Student table plus the admin-only add and update forms.

use axum::{
  Form,
  extract::{Path, State},
  response::Response,
};
use axum_extra::extract::cookie::SignedCookieJar;
use gradebook_core::{grade::Scores, store::GradebookStore, student::NewStudent};
use serde::Deserialize;

use crate::{
  AppState,
  auth::{AdminUser, CurrentUser},
  error::Error,
  flash::{self, Flash},
  handlers::{layout, render},
  views::{AddStudentPage, StudentRow, StudentsPage, UpdateStudentPage},
};

pub const STUDENT_NOT_FOUND: &str = "Student not found!";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StudentForm {
  pub name:    String,
  pub math:    String,
  pub science: String,
  pub english: String,
}

impl StudentForm {
  fn scores(&self) -> gradebook_core::Result<Scores> {
    Scores::parse(&self.math, &self.science, &self.english)
  }
}

/// Student ids in paths are integers; anything else names no student.
pub(crate) fn parse_id(raw: &str) -> Result<i64, Error> {
  raw.parse().map_err(|_| Error::NotFound)
}

// ─── List ────────────────────────────────────────────────────────────────────

/// Served at both `/` and `/student_list`.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(session): CurrentUser,
  jar: SignedCookieJar,
) -> Result<Response, Error>
where
  S: GradebookStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let students = state.store.list_students().await.map_err(Error::store)?;

  let (jar, layout) = layout(jar, Some(&session));
  render(jar, StudentsPage {
    layout,
    students: students.iter().map(StudentRow::from).collect(),
  })
}

// ─── Add ─────────────────────────────────────────────────────────────────────

pub async fn new_form(
  AdminUser(session): AdminUser,
  jar: SignedCookieJar,
) -> Result<Response, Error> {
  let (jar, layout) = layout(jar, Some(&session));
  render(jar, AddStudentPage { layout })
}

pub async fn create<S>(
  State(state): State<AppState<S>>,
  AdminUser(session): AdminUser,
  jar: SignedCookieJar,
  Form(form): Form<StudentForm>,
) -> Result<Response, Error>
where
  S: GradebookStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = match form.scores().and_then(|scores| NewStudent::new(&form.name, scores)) {
    Ok(input) => input,
    Err(e) => {
      tracing::debug!(error = %e, "rejected student form");
      return Ok(flash::redirect(jar, "/add_student", Flash::error(e.to_string())));
    }
  };

  let student = state
    .store
    .insert_student(input)
    .await
    .map_err(Error::store)?;

  tracing::info!(
    id = student.id,
    name = %student.name,
    by = %session.username,
    "student added",
  );
  Ok(flash::redirect(
    jar,
    "/",
    Flash::success(format!("Student {} added successfully!", student.name)),
  ))
}

// ─── Update ──────────────────────────────────────────────────────────────────

pub async fn edit_form<S>(
  State(state): State<AppState<S>>,
  AdminUser(session): AdminUser,
  jar: SignedCookieJar,
  Path(raw_id): Path<String>,
) -> Result<Response, Error>
where
  S: GradebookStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(&raw_id)?;
  let Some(student) = state.store.get_student(id).await.map_err(Error::store)? else {
    return Ok(flash::redirect(jar, "/student_list", Flash::error(STUDENT_NOT_FOUND)));
  };

  let (jar, layout) = layout(jar, Some(&session));
  render(jar, UpdateStudentPage { layout, student: StudentRow::from(&student) })
}

pub async fn update<S>(
  State(state): State<AppState<S>>,
  AdminUser(session): AdminUser,
  jar: SignedCookieJar,
  Path(raw_id): Path<String>,
  Form(form): Form<StudentForm>,
) -> Result<Response, Error>
where
  S: GradebookStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(&raw_id)?;
  let scores = match form.scores() {
    Ok(scores) => scores,
    Err(e) => {
      tracing::debug!(id, error = %e, "rejected score update");
      return Ok(flash::redirect(jar, &format!("/update/{id}"), Flash::error(e.to_string())));
    }
  };

  match state.store.update_scores(id, scores).await.map_err(Error::store)? {
    Some(student) => {
      tracing::info!(id, name = %student.name, by = %session.username, "student updated");
      Ok(flash::redirect(
        jar,
        "/",
        Flash::success(format!("Student {} updated successfully!", student.name)),
      ))
    }
    None => {
      tracing::warn!(id, "update for unknown student");
      Ok(flash::redirect(jar, "/student_list", Flash::error(STUDENT_NOT_FOUND)))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_id_accepts_integers_only() {
    assert_eq!(parse_id("42").unwrap(), 42);
    assert!(matches!(parse_id("abc"), Err(Error::NotFound)));
    assert!(matches!(parse_id("4.2"), Err(Error::NotFound)));
  }
}
