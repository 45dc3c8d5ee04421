//! Grade distribution, class average and charts.

use axum::{extract::State, response::Response};
use axum_extra::extract::cookie::SignedCookieJar;
use gradebook_core::{
  store::GradebookStore,
  student::{average_percentage, grade_distribution},
};

use crate::{
  AppState,
  auth::CurrentUser,
  error::Error,
  handlers::{layout, render},
  views::StatsPage,
};

pub async fn show<S>(
  State(state): State<AppState<S>>,
  CurrentUser(session): CurrentUser,
  jar: SignedCookieJar,
) -> Result<Response, Error>
where
  S: GradebookStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let students = state.store.list_students().await.map_err(Error::store)?;
  let charts = gradebook_charts::render(&students)?;

  let (jar, layout) = layout(jar, Some(&session));
  render(jar, StatsPage {
    layout,
    student_count: students.len(),
    grade_counts: grade_distribution(&students).into_iter().map(Into::into).collect(),
    avg_percentage: format!("{:.2}", average_percentage(&students)),
    bar_chart: charts.bar,
    pie_chart: charts.pie,
  })
}
