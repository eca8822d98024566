//! API error type and [`axum::response::IntoResponse`] implementation.

use std::collections::BTreeMap;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use phonebook_core::ValidationErrors;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Rendered as a bare 404 with no body.
  #[error("not found")]
  NotFound,

  #[error("validation failed: {0}")]
  Validation(ValidationErrors),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a directory failure.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl From<phonebook_core::Error> for ApiError {
  fn from(e: phonebook_core::Error) -> Self {
    match e {
      phonebook_core::Error::Validation(v) => Self::Validation(v),
    }
  }
}

/// Body of every 500: `An error occurred: <message>`, with `null` standing
/// in for an empty message.
pub fn internal_error_body(message: &str) -> String {
  let message = if message.is_empty() { "null" } else { message };
  format!("An error occurred: {message}")
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
      ApiError::Validation(v) => {
        let fields: BTreeMap<&str, &str> =
          v.fields().iter().map(|e| (e.field, e.message)).collect();
        (
          StatusCode::BAD_REQUEST,
          Json(json!({ "error": "validation failed", "fields": fields })),
        )
          .into_response()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "directory operation failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          internal_error_body(&e.to_string()),
        )
          .into_response()
      }
    }
  }
}
