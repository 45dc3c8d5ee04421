pub mod accounts;
pub mod home;
pub mod stats;
pub mod students;

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{error::Error, flash, session::Session, views::Layout};

/// Pop the pending flash and build the page layout around it.
pub(super) fn layout(
  jar: SignedCookieJar,
  session: Option<&Session>,
) -> (SignedCookieJar, Layout) {
  let (jar, flash) = flash::take(jar);
  (jar, Layout::new(session, flash))
}

/// Render `page`, sending `jar` along so a consumed flash is cleared.
pub(super) fn render(jar: SignedCookieJar, page: impl Template) -> Result<Response, Error> {
  let html = page.render()?;
  Ok((jar, Html(html)).into_response())
}
