//! Handler for `GET /profile`.

use std::sync::Arc;

use axum::extract::State;

/// `GET /profile`: the active configuration profiles as `[a, b]`.
pub async fn handler(State(profiles): State<Arc<Vec<String>>>) -> String {
  format!("[{}]", profiles.join(", "))
}
