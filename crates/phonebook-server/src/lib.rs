//! Server assembly for the phonebook.
//!
//! Loads [`ServerConfig`], opens the configured backend, and mounts the
//! [`phonebook_api`] routers under `/api`.

pub mod error;

pub use error::{Error, Result};

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use phonebook_api::{contacts_router, phonebook_router, profile_router};
use phonebook_core::Logged;
use phonebook_store_memory::{IdAllocation, MemoryDirectory};
use phonebook_store_sqlite::SqliteDirectory;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which directory serves `/api/phonebook`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  #[default]
  Sqlite,
  Memory,
}

/// Runtime server configuration: defaults, then `config.toml`, then
/// `PHONEBOOK_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub backend:       Backend,
  pub store_path:    PathBuf,
  /// Mount the seeded, non-validating `/api/contacts` routes.
  pub contacts_demo: bool,
  /// Id policy of the `/api/contacts` directory.
  pub id_allocation: IdAllocation,
  pub profiles:      Vec<String>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_string(),
      port:          8080,
      backend:       Backend::default(),
      store_path:    PathBuf::from("phonebook.sqlite3"),
      contacts_demo: true,
      id_allocation: IdAllocation::default(),
      profiles:      Vec::new(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` and the environment over the
  /// defaults.
  pub fn load(path: &Path) -> Result<Self> {
    Self::from_builder(
      Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(environment()),
    )
  }

  pub(crate) fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
    Ok(builder.build()?.try_deserialize()?)
  }

  /// `host:port`, ready for binding.
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// `PHONEBOOK_PORT=9090`, `PHONEBOOK_PROFILES=dev,local`, ...
pub(crate) fn environment() -> Environment {
  Environment::with_prefix("PHONEBOOK")
    .try_parsing(true)
    .list_separator(",")
    .with_list_parse_key("profiles")
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Open the configured backend and build the full application router.
pub async fn app(cfg: &ServerConfig) -> Result<Router> {
  let phonebook = match cfg.backend {
    Backend::Sqlite => {
      let path = expand_tilde(&cfg.store_path);
      let store = SqliteDirectory::open(&path).await?;
      tracing::info!(path = %path.display(), "opened sqlite directory");
      phonebook_router(Arc::new(Logged::new(store)))
    }
    Backend::Memory => {
      tracing::info!("using in-memory directory; contacts will not survive a restart");
      phonebook_router(Arc::new(Logged::new(MemoryDirectory::default())))
    }
  };
  Ok(build_router(phonebook, cfg))
}

/// Mount `phonebook` alongside the demo and profile routes under `/api`.
pub fn build_router(phonebook: Router, cfg: &ServerConfig) -> Router {
  let mut api = phonebook.merge(profile_router(cfg.profiles.clone()));
  if cfg.contacts_demo {
    let demo = MemoryDirectory::seeded(cfg.id_allocation);
    api = api.merge(contacts_router(Arc::new(Logged::new(demo))));
  }

  Router::new()
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests;
