//! Chart rendering for the gradebook stats page.
//!
//! Charts are rendered to SVG with [`plotters`] and returned as base64
//! `data:` URIs, ready to drop into an `<img src>` attribute. Nothing is
//! cached or written to disk; every call redraws from the given students.
//!
//! # Quick start
//!
//! ```no_run
//! let charts = gradebook_charts::render(&[]).unwrap();
//! assert!(charts.is_empty());
//! ```

mod bar;
pub mod error;
mod pie;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use gradebook_core::student::Student;

pub use error::{Error, Result};

/// Pixel size shared by both charts.
pub(crate) const CHART_SIZE: (u32, u32) = (500, 300);

// ─── Public types ───────────────────────────────────────────────────────────

/// The two stats-page charts, each as a `data:image/svg+xml;base64,…` URI.
///
/// Both fields are empty strings when there was nothing to plot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Charts {
  /// Percentage per student.
  pub bar: String,
  /// Number of students per grade.
  pub pie: String,
}

impl Charts {
  pub fn is_empty(&self) -> bool { self.bar.is_empty() && self.pie.is_empty() }
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Render both charts for `students`, in the order given.
pub fn render(students: &[Student]) -> Result<Charts> {
  if students.is_empty() {
    return Ok(Charts::default());
  }

  Ok(Charts {
    bar: data_uri(&bar::render(students)?),
    pie: data_uri(&pie::render(students)?),
  })
}

fn data_uri(svg: &str) -> String {
  format!("data:image/svg+xml;base64,{}", B64.encode(svg))
}
