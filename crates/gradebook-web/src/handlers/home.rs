//! Landing page for signed-in users.

use axum::response::Response;
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{
  auth::CurrentUser,
  error::Error,
  handlers::{layout, render},
  views::HomePage,
};

pub async fn show(
  CurrentUser(session): CurrentUser,
  jar: SignedCookieJar,
) -> Result<Response, Error> {
  let (jar, layout) = layout(jar, Some(&session));
  render(jar, HomePage { layout })
}
