//! Student records.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  grade::{Grade, Scores},
};

/// A persisted student row.
///
/// `total`, `percentage` and `grade` are always the values derived from
/// `scores` at the time of the last insert or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
  pub id:         i64,
  pub name:       String,
  pub scores:     Scores,
  pub total:      f64,
  pub percentage: f64,
  pub grade:      Grade,
}

/// Input for [`GradebookStore::insert_student`](crate::store::GradebookStore::insert_student).
#[derive(Debug, Clone)]
pub struct NewStudent {
  pub name:   String,
  pub scores: Scores,
}

impl NewStudent {
  /// Trims the name and rejects it if nothing is left.
  pub fn new(name: &str, scores: Scores) -> Result<Self> {
    let name = name.trim();
    if name.is_empty() {
      return Err(Error::EmptyName);
    }
    Ok(Self { name: name.to_owned(), scores })
  }
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Number of students per grade, best grade first. Grades nobody holds are
/// omitted.
pub fn grade_distribution(students: &[Student]) -> Vec<(Grade, usize)> {
  Grade::ALL
    .into_iter()
    .map(|g| (g, students.iter().filter(|s| s.grade == g).count()))
    .filter(|(_, n)| *n > 0)
    .collect()
}

/// Mean percentage across `students`, or `0.0` when there are none.
pub fn average_percentage(students: &[Student]) -> f64 {
  if students.is_empty() {
    return 0.0;
  }
  students.iter().map(|s| s.percentage).sum::<f64>() / students.len() as f64
}
