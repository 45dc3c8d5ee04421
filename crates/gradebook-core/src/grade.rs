//! Grade thresholds and subject scores.
//!
//! A student's total, percentage and grade are never entered directly; they
//! are always derived from the three subject scores held in [`Scores`].

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Highest score accepted for a single subject.
pub const MAX_SUBJECT_SCORE: f64 = 100.0;

/// Maximum attainable total across the three subjects.
pub const MAX_TOTAL: f64 = 3.0 * MAX_SUBJECT_SCORE;

// ─── Grade ───────────────────────────────────────────────────────────────────

/// Letter grade derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
  A,
  B,
  C,
  F,
}

impl Grade {
  /// Every grade, best first.
  pub const ALL: [Grade; 4] = [Grade::A, Grade::B, Grade::C, Grade::F];

  /// Map a percentage onto a grade using inclusive lower bounds.
  ///
  /// Defined for every `f64`: values above 100 are still `A`, negative values
  /// and NaN fall through to `F`.
  pub fn from_percentage(percentage: f64) -> Self {
    if percentage >= 90.0 {
      Grade::A
    } else if percentage >= 75.0 {
      Grade::B
    } else if percentage >= 50.0 {
      Grade::C
    } else {
      Grade::F
    }
  }

  /// Human-readable label, as stored in the `students.grade` column.
  pub fn label(self) -> &'static str {
    match self {
      Grade::A => "A, First Class Distinction",
      Grade::B => "B, Distinction",
      Grade::C => "C, Pass",
      Grade::F => "F, Failed",
    }
  }

  pub fn from_label(label: &str) -> Result<Self> {
    Grade::ALL
      .into_iter()
      .find(|g| g.label() == label)
      .ok_or_else(|| Error::UnknownGrade(label.to_owned()))
  }
}

impl std::fmt::Display for Grade {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

// ─── Scores ──────────────────────────────────────────────────────────────────

/// The three subject scores of a student.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
  pub math:    f64,
  pub science: f64,
  pub english: f64,
}

impl Scores {
  /// Build scores without any range checking.
  pub fn new(math: f64, science: f64, english: f64) -> Self {
    Self { math, science, english }
  }

  /// Build scores, rejecting non-finite values and values outside
  /// `0..=100`.
  pub fn validated(math: f64, science: f64, english: f64) -> Result<Self> {
    let scores = Self::new(math, science, english);
    for (subject, value) in scores.subjects() {
      if !value.is_finite() {
        return Err(Error::InvalidScore { subject });
      }
      if !(0.0..=MAX_SUBJECT_SCORE).contains(&value) {
        return Err(Error::ScoreOutOfRange { subject, value });
      }
    }
    Ok(scores)
  }

  /// Parse the three scores from raw form input, then validate them.
  pub fn parse(math: &str, science: &str, english: &str) -> Result<Self> {
    Self::validated(
      parse_score("math", math)?,
      parse_score("science", science)?,
      parse_score("english", english)?,
    )
  }

  pub fn subjects(&self) -> [(&'static str, f64); 3] {
    [
      ("math", self.math),
      ("science", self.science),
      ("english", self.english),
    ]
  }

  pub fn total(&self) -> f64 { self.math + self.science + self.english }

  pub fn percentage(&self) -> f64 { self.total() * 100.0 / MAX_TOTAL }

  pub fn grade(&self) -> Grade { Grade::from_percentage(self.percentage()) }
}

fn parse_score(subject: &'static str, raw: &str) -> Result<f64> {
  raw
    .trim()
    .parse::<f64>()
    .map_err(|_| Error::InvalidScore { subject })
}
