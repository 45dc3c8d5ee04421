//! Askama page templates and the row types they display.
//!
//! Numbers are formatted here rather than in the templates so every page
//! shows them the same way.

use askama::Template;
use gradebook_core::{grade::Grade, student::Student};

use crate::{flash::Flash, session::Session};

// ─── Shared layout ───────────────────────────────────────────────────────────

/// Data every page needs for the navigation bar and flash area.
pub struct Layout {
  pub signed_in: bool,
  pub username:  String,
  pub role:      &'static str,
  pub is_admin:  bool,
  pub flashes:   Vec<FlashView>,
}

pub struct FlashView {
  pub level:   &'static str,
  pub message: String,
}

impl Layout {
  pub fn new(session: Option<&Session>, flash: Option<Flash>) -> Self {
    let flashes = flash
      .into_iter()
      .map(|f| FlashView { level: f.level.as_str(), message: f.message })
      .collect();

    match session {
      Some(s) => Self {
        signed_in: true,
        username: s.username.clone(),
        role: s.role.as_str(),
        is_admin: s.is_admin(),
        flashes,
      },
      None => Self {
        signed_in: false,
        username: String::new(),
        role: "",
        is_admin: false,
        flashes,
      },
    }
  }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

pub struct StudentRow {
  pub id:         i64,
  pub name:       String,
  pub math:       String,
  pub science:    String,
  pub english:    String,
  pub total:      String,
  pub percentage: String,
  pub grade:      &'static str,
}

impl From<&Student> for StudentRow {
  fn from(s: &Student) -> Self {
    Self {
      id:         s.id,
      name:       s.name.clone(),
      math:       format_score(s.scores.math),
      science:    format_score(s.scores.science),
      english:    format_score(s.scores.english),
      total:      format_score(s.total),
      percentage: format!("{:.2}", s.percentage),
      grade:      s.grade.label(),
    }
  }
}

pub struct GradeCount {
  pub label: &'static str,
  pub count: usize,
}

impl From<(Grade, usize)> for GradeCount {
  fn from((grade, count): (Grade, usize)) -> Self {
    Self { label: grade.label(), count }
  }
}

/// Whole scores print without a fraction; anything else keeps two places.
pub fn format_score(value: f64) -> String {
  if value.fract() == 0.0 {
    format!("{value:.0}")
  } else {
    format!("{value:.2}")
  }
}

// ─── Pages ───────────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
  pub layout: Layout,
}

#[derive(Template)]
#[template(path = "students.html")]
pub struct StudentsPage {
  pub layout:   Layout,
  pub students: Vec<StudentRow>,
}

#[derive(Template)]
#[template(path = "stats.html")]
pub struct StatsPage {
  pub layout:         Layout,
  pub student_count:  usize,
  pub grade_counts:   Vec<GradeCount>,
  pub avg_percentage: String,
  /// `data:` URI, empty when there are no students.
  pub bar_chart:      String,
  /// `data:` URI, empty when there are no students.
  pub pie_chart:      String,
}

#[derive(Template)]
#[template(path = "add_student.html")]
pub struct AddStudentPage {
  pub layout: Layout,
}

#[derive(Template)]
#[template(path = "update_student.html")]
pub struct UpdateStudentPage {
  pub layout:  Layout,
  pub student: StudentRow,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
  pub layout: Layout,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
  pub layout: Layout,
}
