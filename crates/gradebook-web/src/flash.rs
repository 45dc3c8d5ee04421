//! One-shot status messages carried across a redirect.
//!
//! A handler that redirects calls [`push`]; the next page that renders calls
//! [`take`], which returns the message and removes the cookie so it is shown
//! exactly once.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::{Deserialize, Serialize};

use crate::session::{build_cookie, decode_value, encode_value, removal_cookie};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Success,
  Warning,
  Error,
}

impl Level {
  pub fn as_str(self) -> &'static str {
    match self {
      Level::Success => "success",
      Level::Warning => "warning",
      Level::Error => "error",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
  pub level:   Level,
  pub message: String,
}

impl Flash {
  pub fn success(message: impl Into<String>) -> Self {
    Self { level: Level::Success, message: message.into() }
  }

  pub fn warning(message: impl Into<String>) -> Self {
    Self { level: Level::Warning, message: message.into() }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self { level: Level::Error, message: message.into() }
  }
}

/// Queue `flash` for the next rendered page.
pub fn push(jar: SignedCookieJar, flash: &Flash) -> SignedCookieJar {
  jar.add(build_cookie(FLASH_COOKIE, encode_value(flash)))
}

/// Pop the pending flash, if any.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<Flash>) {
  match jar.get(FLASH_COOKIE) {
    Some(cookie) => {
      let flash = decode_value(cookie.value());
      (jar.remove(removal_cookie(FLASH_COOKIE)), flash)
    }
    None => (jar, None),
  }
}

/// `303 See Other` to `to`, showing `flash` on arrival.
pub fn redirect(jar: SignedCookieJar, to: &str, flash: Flash) -> Response {
  (push(jar, &flash), Redirect::to(to)).into_response()
}
