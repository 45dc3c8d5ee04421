//! [`SqliteStore`], the SQLite implementation of [`GradebookStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use gradebook_core::{
  grade::Scores,
  store::GradebookStore,
  student::{NewStudent, Student},
  user::{CreateUserOutcome, NewUser, User},
};

use crate::{
  Result,
  encode::{RawStudent, RawUser, STUDENT_COLUMNS, USER_COLUMNS},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A gradebook store backed by a single SQLite file.
///
/// Clones share the same database connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn select_student(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawStudent>> {
  conn
    .query_row(
      &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"),
      rusqlite::params![id],
      RawStudent::from_row,
    )
    .optional()
}

// ─── GradebookStore impl ─────────────────────────────────────────────────────

impl GradebookStore for SqliteStore {
  type Error = crate::Error;

  // ── Students ──────────────────────────────────────────────────────────────

  async fn list_students(&self) -> Result<Vec<Student>> {
    let raws: Vec<RawStudent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"
        ))?;
        let rows = stmt
          .query_map([], RawStudent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  async fn get_student(&self, id: i64) -> Result<Option<Student>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_student(conn, id)?))
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  async fn insert_student(&self, input: NewStudent) -> Result<Student> {
    let NewStudent { name, scores } = input;
    let total      = scores.total();
    let percentage = scores.percentage();
    let grade      = scores.grade();

    let row_name = name.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO students (
             name, math, science, english, total_marks, percentage, grade
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            row_name,
            scores.math,
            scores.science,
            scores.english,
            total,
            percentage,
            grade.label(),
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Student { id, name, scores, total, percentage, grade })
  }

  async fn update_scores(
    &self,
    id:     i64,
    scores: Scores,
  ) -> Result<Option<Student>> {
    let total      = scores.total();
    let percentage = scores.percentage();
    let grade      = scores.grade();

    let raw = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE students
           SET math = ?1, science = ?2, english = ?3,
               total_marks = ?4, percentage = ?5, grade = ?6
           WHERE id = ?7",
          rusqlite::params![
            scores.math,
            scores.science,
            scores.english,
            total,
            percentage,
            grade.label(),
            id,
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(select_student(conn, id)?)
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<CreateUserOutcome> {
    let NewUser { username, password_hash, role } = input;

    let row_username = username.clone();
    let row_hash     = password_hash.clone();
    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3)",
          rusqlite::params![row_username, row_hash, role.as_str()],
        );
        match inserted {
          Ok(_) => Ok(Some(conn.last_insert_rowid())),
          Err(rusqlite::Error::SqliteFailure(err, _))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
          {
            Ok(None)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    Ok(match id {
      Some(id) => CreateUserOutcome::Created(User {
        id,
        username,
        password_hash,
        role,
      }),
      None => CreateUserOutcome::UsernameTaken,
    })
  }

  async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
    let username = username.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
            rusqlite::params![username],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }
}
