//! Router-level tests driving full request/redirect flows against an
//! in-memory store.

use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use axum_extra::extract::cookie::Cookie;
use gradebook_core::{
  grade::Scores,
  store::GradebookStore,
  student::NewStudent,
  user::Role,
};
use gradebook_store_sqlite::SqliteStore;
use tower::ServiceExt as _;

use crate::{
  AppState, ServerConfig,
  auth::{self, ADMIN_ONLY_ADD, ADMIN_ONLY_UPDATE, INVALID_CREDENTIALS},
  handlers::{
    accounts::{MISSING_CREDENTIALS, USERNAME_TAKEN},
    students::STUDENT_NOT_FOUND,
  },
  router,
};

async fn make_state() -> AppState<SqliteStore> {
  let store = SqliteStore::open_in_memory().await.unwrap();
  let secret = "a-test-secret-that-is-long-enough-for-derivation";
  let config = ServerConfig {
    host:           "127.0.0.1".to_string(),
    port:           5000,
    database_path:  PathBuf::from(":memory:"),
    session_secret: secret.to_string(),
  };
  AppState {
    store: Arc::new(store),
    key:   config.signing_key().unwrap(),
  }
}

/// Sends requests through the router, keeping cookies between them.
struct Browser {
  state:   AppState<SqliteStore>,
  cookies: BTreeMap<String, String>,
}

impl Browser {
  async fn new() -> Self {
    Self { state: make_state().await, cookies: BTreeMap::new() }
  }

  async fn seed_user(&self, username: &str, password: &str, role: Role) {
    auth::register_user(&*self.state.store, username, password, role)
      .await
      .unwrap();
  }

  async fn send(&mut self, method: &str, uri: &str, form: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if !self.cookies.is_empty() {
      let cookie = self
        .cookies
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("; ");
      builder = builder.header(header::COOKIE, cookie);
    }
    let body = match form {
      Some(form) => {
        builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        Body::from(form.to_string())
      }
      None => Body::empty(),
    };

    let resp = router(self.state.clone())
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();

    for value in resp.headers().get_all(header::SET_COOKIE) {
      let cookie = Cookie::parse(value.to_str().unwrap().to_owned()).unwrap();
      if cookie.value().is_empty() {
        self.cookies.remove(cookie.name());
      } else {
        self.cookies.insert(cookie.name().to_owned(), cookie.value().to_owned());
      }
    }
    resp
  }

  async fn get(&mut self, uri: &str) -> Response { self.send("GET", uri, None).await }

  async fn post(&mut self, uri: &str, form: &str) -> Response {
    self.send("POST", uri, Some(form)).await
  }

  /// GET `uri` and return the page body, asserting it rendered.
  async fn page(&mut self, uri: &str) -> String {
    let resp = self.get(uri).await;
    assert_eq!(resp.status(), StatusCode::OK, "GET {uri}");
    body_text(resp).await
  }

  /// Follow a redirect and return the body of the page it lands on.
  async fn follow(&mut self, resp: Response) -> String {
    let to = location(&resp).to_owned();
    self.page(&to).await
  }

  async fn login(&mut self, username: &str, password: &str) -> Response {
    self
      .post("/login", &format!("username={username}&password={password}"))
      .await
  }
}

fn location(resp: &Response) -> &str {
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

async fn body_text(resp: Response) -> String {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}

async fn admin_browser() -> Browser {
  let mut b = Browser::new().await;
  b.seed_user("alice", "secret", Role::Admin).await;
  let resp = b.login("alice", "secret").await;
  b.follow(resp).await;
  b
}

async fn user_browser() -> Browser {
  let mut b = Browser::new().await;
  b.seed_user("bob", "hunter2", Role::User).await;
  let resp = b.login("bob", "hunter2").await;
  b.follow(resp).await;
  b
}

// ── Session gate ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn signed_out_requests_redirect_to_login() {
  let mut b = Browser::new().await;
  for uri in ["/", "/student_list", "/home", "/stats", "/add_student", "/update/1"] {
    let resp = b.get(uri).await;
    assert_eq!(location(&resp), "/login", "GET {uri}");
  }
  let resp = b.post("/add_student", "name=Ann&math=1&science=1&english=1").await;
  assert_eq!(location(&resp), "/login");
  assert!(b.state.store.list_students().await.unwrap().is_empty());
}

#[tokio::test]
async fn public_pages_render_without_session() {
  let mut b = Browser::new().await;
  assert!(b.page("/login").await.contains("<form"));
  assert!(b.page("/register").await.contains("name=\"role\""));
}

#[tokio::test]
async fn tampered_session_is_treated_as_signed_out() {
  let mut b = admin_browser().await;
  let value = b.cookies.get("session").unwrap().clone();
  let mut tampered = value.into_bytes();
  let last = tampered.len() - 1;
  tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
  b.cookies.insert("session".into(), String::from_utf8(tampered).unwrap());

  let resp = b.get("/home").await;
  assert_eq!(location(&resp), "/login");
}

// ── Login / logout ────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_welcomes_user_and_opens_gated_pages() {
  let mut b = Browser::new().await;
  b.seed_user("alice", "secret", Role::Admin).await;

  let resp = b.login("alice", "secret").await;
  assert_eq!(location(&resp), "/home");
  let home = b.follow(resp).await;
  assert!(home.contains("Welcome alice!"));
  assert!(home.contains("admin"));
}

#[tokio::test]
async fn failed_logins_share_one_message() {
  let mut b = Browser::new().await;
  b.seed_user("alice", "secret", Role::Admin).await;

  let wrong_password = b.login("alice", "nope").await;
  assert_eq!(location(&wrong_password), "/login");
  let first = b.follow(wrong_password).await;

  let unknown_user = b.login("mallory", "secret").await;
  assert_eq!(location(&unknown_user), "/login");
  let second = b.follow(unknown_user).await;

  assert!(first.contains(INVALID_CREDENTIALS));
  assert_eq!(first, second);
  assert_eq!(location(&b.get("/home").await), "/login");
}

#[tokio::test]
async fn empty_credentials_are_rejected() {
  let mut b = Browser::new().await;
  let resp = b.post("/login", "username=&password=").await;
  assert_eq!(location(&resp), "/login");
  assert!(b.follow(resp).await.contains(MISSING_CREDENTIALS));

  let resp = b.post("/login", "username=alice").await;
  assert!(b.follow(resp).await.contains(MISSING_CREDENTIALS));
}

#[tokio::test]
async fn logout_clears_session() {
  let mut b = admin_browser().await;
  let resp = b.get("/logout").await;
  assert_eq!(location(&resp), "/login");
  assert!(b.follow(resp).await.contains("Logged out successfully!"));
  assert_eq!(location(&b.get("/home").await), "/login");
}

#[tokio::test]
async fn flash_is_shown_once() {
  let mut b = Browser::new().await;
  b.seed_user("alice", "secret", Role::Admin).await;
  let resp = b.login("alice", "secret").await;
  assert!(b.follow(resp).await.contains("Welcome alice!"));
  assert!(!b.page("/home").await.contains("Welcome alice!"));
}

// ── Registration ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_then_login() {
  let mut b = Browser::new().await;
  let resp = b.post("/register", "username=carol&password=pw&role=user").await;
  assert_eq!(location(&resp), "/login");
  assert!(b.follow(resp).await.contains("Registration successful! Please login."));

  let resp = b.login("carol", "pw").await;
  assert_eq!(location(&resp), "/home");
}

#[tokio::test]
async fn duplicate_username_keeps_first_account() {
  let mut b = Browser::new().await;
  b.post("/register", "username=carol&password=first&role=admin").await;

  let resp = b.post("/register", "username=carol&password=second&role=user").await;
  assert_eq!(location(&resp), "/login");
  assert!(b.follow(resp).await.contains(USERNAME_TAKEN));

  let user = b.state.store.find_user_by_username("carol").await.unwrap().unwrap();
  assert_eq!(user.role, Role::Admin);
  assert_eq!(location(&b.login("carol", "first").await), "/home");
}

#[tokio::test]
async fn padded_username_logs_in_as_registered() {
  let mut b = Browser::new().await;
  let resp = b.post("/register", "username=+carol+&password=pw&role=user").await;
  assert_eq!(location(&resp), "/login");

  let resp = b.post("/login", "username=+carol+&password=pw").await;
  assert_eq!(location(&resp), "/home");
  assert!(b.follow(resp).await.contains("Welcome carol!"));

  let resp = b.login("carol", "pw").await;
  assert_eq!(location(&resp), "/home");
}

#[tokio::test]
async fn register_rejects_unknown_role_and_blank_fields() {
  let mut b = Browser::new().await;
  let resp = b.post("/register", "username=dave&password=pw&role=root").await;
  assert_eq!(location(&resp), "/register");
  assert!(b.follow(resp).await.contains("unknown role"));

  let resp = b.post("/register", "username=&password=pw&role=user").await;
  assert_eq!(location(&resp), "/register");

  assert!(b.state.store.find_user_by_username("dave").await.unwrap().is_none());
}

// ── Students ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_adds_and_updates_student() {
  let mut b = admin_browser().await;

  let resp = b.post("/add_student", "name=Ann&math=80&science=90&english=70").await;
  assert_eq!(location(&resp), "/");
  let list = b.follow(resp).await;
  assert!(list.contains("Student Ann added successfully!"));
  assert!(list.contains("<td>240</td>"));
  assert!(list.contains("80.00%"));
  assert!(list.contains("B, Distinction"));
  assert!(list.contains("/update/1"));

  let form = b.page("/update/1").await;
  assert!(form.contains("value=\"80\""));

  let resp = b.post("/update/1", "math=95&science=90&english=85").await;
  assert_eq!(location(&resp), "/");
  let list = b.follow(resp).await;
  assert!(list.contains("Student Ann updated successfully!"));
  assert!(list.contains("A, First Class Distinction"));

  let ann = b.state.store.get_student(1).await.unwrap().unwrap();
  assert_eq!(ann.total, 270.0);
}

#[tokio::test]
async fn invalid_scores_write_nothing() {
  let mut b = admin_browser().await;

  let resp = b.post("/add_student", "name=Ann&math=abc&science=90&english=70").await;
  assert_eq!(location(&resp), "/add_student");
  assert!(b.follow(resp).await.contains("math score must be a number"));

  let resp = b.post("/add_student", "name=Ann&math=80&science=150&english=70").await;
  assert_eq!(location(&resp), "/add_student");

  let resp = b.post("/add_student", "name=+&math=80&science=90&english=70").await;
  assert_eq!(location(&resp), "/add_student");

  assert!(b.state.store.list_students().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_update_leaves_student_unchanged() {
  let mut b = admin_browser().await;
  b.post("/add_student", "name=Ann&math=80&science=90&english=70").await;

  let resp = b.post("/update/1", "math=-5&science=90&english=70").await;
  assert_eq!(location(&resp), "/update/1");

  let ann = b.state.store.get_student(1).await.unwrap().unwrap();
  assert_eq!(ann.scores, Scores::new(80.0, 90.0, 70.0));
}

#[tokio::test]
async fn unknown_student_is_reported() {
  let mut b = admin_browser().await;

  let resp = b.get("/update/42").await;
  assert_eq!(location(&resp), "/student_list");
  assert!(b.follow(resp).await.contains(STUDENT_NOT_FOUND));

  let resp = b.post("/update/42", "math=1&science=2&english=3").await;
  assert_eq!(location(&resp), "/student_list");
  assert!(b.state.store.list_students().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_numeric_student_id_is_404() {
  let mut b = admin_browser().await;
  assert_eq!(b.get("/update/abc").await.status(), StatusCode::NOT_FOUND);

  let resp = b.post("/update/abc", "math=1&science=2&english=3").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_admin_cannot_change_students() {
  let mut b = user_browser().await;

  let resp = b.get("/add_student").await;
  assert_eq!(location(&resp), "/home");
  assert!(b.follow(resp).await.contains(ADMIN_ONLY_ADD));

  let resp = b.get("/update/1").await;
  assert_eq!(location(&resp), "/home");
  assert!(b.follow(resp).await.contains(ADMIN_ONLY_UPDATE));

  let resp = b.post("/add_student", "name=Ann&math=80&science=90&english=70").await;
  assert_eq!(location(&resp), "/home");
  assert!(b.state.store.list_students().await.unwrap().is_empty());

  let resp = b.post("/update/1", "math=1&science=2&english=3").await;
  assert_eq!(location(&resp), "/home");
}

#[tokio::test]
async fn non_admin_sees_list_without_update_links() {
  let mut b = user_browser().await;
  let input = NewStudent::new("Ann", Scores::new(80.0, 90.0, 70.0)).unwrap();
  b.state.store.insert_student(input).await.unwrap();

  let list = b.page("/student_list").await;
  assert!(list.contains("Ann"));
  assert!(!list.contains("/update/1"));
}

#[tokio::test]
async fn root_and_student_list_render_the_same_table() {
  let mut b = admin_browser().await;
  b.post("/add_student", "name=Ann&math=80&science=90&english=70").await;
  b.get("/home").await;

  let root = b.page("/").await;
  let list = b.page("/student_list").await;
  assert_eq!(root, list);
}

// ── Stats ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stats_without_students() {
  let mut b = user_browser().await;
  let stats = b.page("/stats").await;
  assert!(stats.contains("No data available for charts."));
  assert!(stats.contains("0.00%"));
  assert!(!stats.contains("data:image/svg+xml"));
}

#[tokio::test]
async fn stats_with_students() {
  let mut b = user_browser().await;
  for (name, scores) in [
    ("Ann", Scores::new(80.0, 90.0, 70.0)),
    ("Ben", Scores::new(95.0, 92.0, 91.0)),
    ("Cy", Scores::new(40.0, 30.0, 20.0)),
  ] {
    let input = NewStudent::new(name, scores).unwrap();
    b.state.store.insert_student(input).await.unwrap();
  }

  let stats = b.page("/stats").await;
  assert!(stats.contains("Students: 3"));
  // (80 + 92.67 + 30) / 3
  assert!(stats.contains("67.56%"));
  assert!(stats.contains("<td>A, First Class Distinction</td><td>1</td>"));
  assert_eq!(stats.matches("data:image/svg+xml;base64,").count(), 2);
}

#[test]
fn short_secret_is_rejected() {
  let config = ServerConfig {
    host:           "127.0.0.1".to_string(),
    port:           5000,
    database_path:  PathBuf::from(":memory:"),
    session_secret: "too-short".to_string(),
  };
  assert!(matches!(config.signing_key(), Err(crate::Error::WeakSecret(32))));
}
