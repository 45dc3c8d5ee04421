//! gradebook server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite database, and serves the gradebook site over HTTP.
//!
//! # Seeding an admin
//!
//! Registration is open to anyone, so the first admin is usually created from
//! the command line:
//!
//! ```
//! cargo run -p gradebook-web --bin server -- --create-admin alice
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use gradebook_core::user::{CreateUserOutcome, Role};
use gradebook_store_sqlite::SqliteStore;
use gradebook_web::{AppState, ServerConfig, auth};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Student gradebook server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Create an admin account with a password read from stdin, then exit.
  #[arg(long, value_name = "USERNAME")]
  create_admin: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("GRADEBOOK"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Resolve `~` in the database path.
  let database_path = resolve_home(&server_cfg.database_path);

  // Open SQLite store.
  let store = SqliteStore::open(&database_path)
    .await
    .with_context(|| format!("failed to open database at {database_path:?}"))?;

  // Helper mode: create an admin and exit.
  if let Some(username) = cli.create_admin {
    let password = read_password()?;
    let outcome = auth::register_user(&store, &username, &password, Role::Admin)
      .await
      .context("failed to create admin")?;
    match outcome {
      CreateUserOutcome::Created(user) => {
        tracing::info!(username = %user.username, "admin created");
        return Ok(());
      }
      CreateUserOutcome::UsernameTaken => {
        anyhow::bail!("username {username:?} already exists");
      }
    }
  }

  let key = server_cfg
    .signing_key()
    .context("invalid session_secret")?;

  // Build application state.
  let state = AppState { store: Arc::new(store), key };

  let app = gradebook_web::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read one line from stdin as the new admin's password.
fn read_password() -> anyhow::Result<String> {
  eprint!("Password for the new admin: ");
  let line = std::io::stdin()
    .lines()
    .next()
    .transpose()
    .context("failed to read password")?;
  line.context("no password given on stdin")
}

/// Resolve a leading `~` component against `$HOME`.
fn resolve_home(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
