use std::path::{Path, PathBuf};

use axum::{
  body::Body,
  http::{Request, StatusCode},
};
use config::{Config, File, FileFormat, Map};
use serde_json::Value;
use tower::ServiceExt as _;

use super::*;

fn from_toml(toml: &str) -> ServerConfig {
  ServerConfig::from_builder(
    Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
  )
  .unwrap()
}

// ── Configuration ───────────────────────────────────────────────────────────

#[test]
fn empty_config_uses_defaults() {
  let cfg = from_toml("");
  assert_eq!(cfg.host, "127.0.0.1");
  assert_eq!(cfg.port, 8080);
  assert_eq!(cfg.backend, Backend::Sqlite);
  assert_eq!(cfg.store_path, PathBuf::from("phonebook.sqlite3"));
  assert!(cfg.contacts_demo);
  assert_eq!(cfg.id_allocation, IdAllocation::Monotonic);
  assert!(cfg.profiles.is_empty());
  assert_eq!(cfg.address(), "127.0.0.1:8080");
}

#[test]
fn toml_overrides_defaults() {
  let cfg = from_toml(
    r#"
      port          = 9000
      backend       = "memory"
      contacts_demo = false
      id_allocation = "collection_size"
      profiles      = ["dev", "local"]
    "#,
  );
  assert_eq!(cfg.port, 9000);
  assert_eq!(cfg.backend, Backend::Memory);
  assert!(!cfg.contacts_demo);
  assert_eq!(cfg.id_allocation, IdAllocation::CollectionSize);
  assert_eq!(cfg.profiles, ["dev", "local"]);
  assert_eq!(cfg.host, "127.0.0.1");
}

#[test]
fn environment_overrides_file() {
  let vars: Map<String, String> = [
    ("PHONEBOOK_PORT", "9090"),
    ("PHONEBOOK_BACKEND", "memory"),
    ("PHONEBOOK_PROFILES", "dev,local"),
  ]
  .into_iter()
  .map(|(k, v)| (k.to_string(), v.to_string()))
  .collect();

  let cfg = ServerConfig::from_builder(
    Config::builder()
      .add_source(File::from_str("port = 9000", FileFormat::Toml))
      .add_source(environment().source(Some(vars))),
  )
  .unwrap();
  assert_eq!(cfg.port, 9090);
  assert_eq!(cfg.backend, Backend::Memory);
  assert_eq!(cfg.profiles, ["dev", "local"]);
}

#[test]
fn unknown_backend_is_rejected() {
  let result = ServerConfig::from_builder(
    Config::builder().add_source(File::from_str(r#"backend = "oracle""#, FileFormat::Toml)),
  );
  assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn missing_config_file_is_not_an_error() {
  let cfg = ServerConfig::load(Path::new("/nonexistent/phonebook.toml")).unwrap();
  assert_eq!(cfg.port, 8080);
}

#[test]
fn expand_tilde_uses_home() {
  let Ok(home) = std::env::var("HOME") else { return };
  assert_eq!(
    expand_tilde(Path::new("~/contacts.sqlite3")),
    PathBuf::from(home).join("contacts.sqlite3")
  );
}

#[test]
fn expand_tilde_leaves_other_paths() {
  assert_eq!(expand_tilde(Path::new("/tmp/a.db")), PathBuf::from("/tmp/a.db"));
  assert_eq!(expand_tilde(Path::new("a/~/b")), PathBuf::from("a/~/b"));
}

// ── Router ──────────────────────────────────────────────────────────────────

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
  let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  (status, bytes.to_vec())
}

fn memory_config() -> ServerConfig {
  ServerConfig {
    backend: Backend::Memory,
    profiles: vec!["test".to_string()],
    ..ServerConfig::default()
  }
}

#[tokio::test]
async fn app_mounts_every_route_under_api() {
  let app = app(&memory_config()).await.unwrap();

  let (status, body) = get(&app, "/api/contacts").await;
  assert_eq!(status, StatusCode::OK);
  let list: Value = serde_json::from_slice(&body).unwrap();
  assert_eq!(list.as_array().unwrap().len(), 2);

  let (status, body) = get(&app, "/api/phonebook").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, b"[]");

  let (status, body) = get(&app, "/api/profile").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, b"[test]");

  let (status, _) = get(&app, "/phonebook").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn demo_routes_can_be_disabled() {
  let cfg = ServerConfig { contacts_demo: false, ..memory_config() };
  let app = app(&cfg).await.unwrap();
  let (status, _) = get(&app, "/api/contacts").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sqlite_backend_opens_configured_path() {
  let path = std::env::temp_dir().join(format!(
    "phonebook-server-test-{}.sqlite3",
    std::process::id()
  ));
  let cfg = ServerConfig { store_path: path.clone(), ..ServerConfig::default() };
  let app = app(&cfg).await.unwrap();

  let (status, _) = get(&app, "/api/phonebook/1").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(path.exists());

  drop(app);
  let _ = std::fs::remove_file(&path);
}
