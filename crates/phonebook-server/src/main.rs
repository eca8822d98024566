//! phonebook server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! configured directory, and serves the JSON API over HTTP.
//!
//! ```
//! cargo run -p phonebook-server --bin phonebook -- --backend memory
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use phonebook_server::{Backend, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Phonebook contact API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the configured `backend`.
  #[arg(long, value_enum)]
  backend: Option<Backend>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  if let Some(backend) = cli.backend {
    cfg.backend = backend;
  }

  let app = phonebook_server::app(&cfg)
    .await
    .context("failed to open directory")?;
  let address = cfg.address();

  tracing::info!(profiles = ?cfg.profiles, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
