//! The signed `session` cookie.
//!
//! The cookie value is the base64url-encoded JSON form of [`Session`]. It is
//! signed (not encrypted) through [`SignedCookieJar`], so clients can read it
//! but any modification makes it fail verification and the request is
//! treated as signed out.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use gradebook_core::user::{Role, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub const SESSION_COOKIE: &str = "session";

/// Identity of the signed-in user for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub user_id:  i64,
  pub username: String,
  pub role:     Role,
}

impl Session {
  pub fn for_user(user: &User) -> Self {
    Self {
      user_id:  user.id,
      username: user.username.clone(),
      role:     user.role,
    }
  }

  pub fn is_admin(&self) -> bool { self.role.is_admin() }

  /// Read the session from `jar`. Missing, tampered or undecodable cookies
  /// all yield `None`.
  pub fn from_jar(jar: &SignedCookieJar) -> Option<Self> {
    jar
      .get(SESSION_COOKIE)
      .and_then(|c| decode_value(c.value()))
  }

  /// Store this session in `jar`, replacing any previous one.
  pub fn save(&self, jar: SignedCookieJar) -> SignedCookieJar {
    jar.add(build_cookie(SESSION_COOKIE, encode_value(self)))
  }

  /// Remove the session cookie from the browser.
  pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(removal_cookie(SESSION_COOKIE))
  }
}

// ─── Cookie helpers ──────────────────────────────────────────────────────────

/// A site-wide, HTTP-only cookie that lives for the browser session.
pub(crate) fn build_cookie(name: &'static str, value: String) -> Cookie<'static> {
  Cookie::build((name, value))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .build()
}

/// Removal cookies must carry the same path the cookie was set with.
pub(crate) fn removal_cookie(name: &'static str) -> Cookie<'static> {
  Cookie::build(name).path("/").build()
}

pub(crate) fn encode_value<T: Serialize>(value: &T) -> String {
  // Serialising plain structs of strings and integers cannot fail.
  let json = serde_json::to_vec(value).unwrap_or_default();
  B64.encode(json)
}

pub(crate) fn decode_value<T: DeserializeOwned>(raw: &str) -> Option<T> {
  let json = B64.decode(raw).ok()?;
  serde_json::from_slice(&json).ok()
}
