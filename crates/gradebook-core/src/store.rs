//! The `GradebookStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `gradebook-store-sqlite`). The web layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  grade::Scores,
  student::{NewStudent, Student},
  user::{CreateUserOutcome, NewUser, User},
};

/// Abstraction over a gradebook storage backend.
///
/// Derived student fields (total, percentage, grade) are computed by the
/// store from the scores it is given; callers never supply them.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait GradebookStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Students ──────────────────────────────────────────────────────────

  /// All students, in insertion order.
  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  /// Retrieve a student by id. Returns `None` if not found.
  fn get_student(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  /// Persist a new student and return it with its assigned id.
  fn insert_student(
    &self,
    input: NewStudent,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  /// Replace a student's scores and recompute the derived fields.
  ///
  /// Returns `None`, without touching any row, if `id` does not exist.
  fn update_scores(
    &self,
    id: i64,
    scores: Scores,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create a user. A taken username is reported as
  /// [`CreateUserOutcome::UsernameTaken`], not as an error.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<CreateUserOutcome, Self::Error>> + Send + '_;

  /// Look a user up by exact username.
  fn find_user_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;
}
