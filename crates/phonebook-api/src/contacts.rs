//! Handlers for the `/contacts` demo endpoints.
//!
//! Bodies are stored without validation.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | `?limit=N`, default `2` when absent or blank; junk means no limit |
//! | `GET`    | `/contacts/{id}` | 404 if not found |
//! | `POST`   | `/contacts` | 201 |
//! | `PUT`    | `/contacts/{id}` | 404 if not found |
//! | `DELETE` | `/contacts/{id}` | 204, or 404 if nothing was removed |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use phonebook_core::{
  Contact, ContactDirectory, ContactId, ContactInput,
  limit::{DEFAULT_LIMIT, parse_limit},
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Kept as text so that malformed values degrade instead of rejecting.
  pub limit: Option<String>,
}

/// `GET /contacts[?limit=<n>]`
pub async fn list<D>(
  State(dir): State<Arc<D>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  D: ContactDirectory,
{
  let raw = params
    .limit
    .as_deref()
    .filter(|s| !s.trim().is_empty())
    .unwrap_or(DEFAULT_LIMIT);
  let limit = parse_limit(raw);
  let contacts = dir.find_all(limit).await.map_err(ApiError::store)?;
  Ok(Json(contacts))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<D>(
  State(dir): State<Arc<D>>,
  Path(id): Path<ContactId>,
) -> Result<Json<Contact>, ApiError>
where
  D: ContactDirectory,
{
  let contact = dir
    .find_by_id(id)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(contact))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`
pub async fn create<D>(
  State(dir): State<Arc<D>>,
  Json(body): Json<ContactInput>,
) -> Result<impl IntoResponse, ApiError>
where
  D: ContactDirectory,
{
  let saved = dir
    .save(body.into_unchecked())
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(saved)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}`
pub async fn update_one<D>(
  State(dir): State<Arc<D>>,
  Path(id): Path<ContactId>,
  Json(body): Json<ContactInput>,
) -> Result<Json<Contact>, ApiError>
where
  D: ContactDirectory,
{
  let updated = dir
    .update(id, body.into_unchecked())
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(updated))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}`
pub async fn delete_one<D>(
  State(dir): State<Arc<D>>,
  Path(id): Path<ContactId>,
) -> Result<StatusCode, ApiError>
where
  D: ContactDirectory,
{
  if dir.delete_by_id(id).await.map_err(ApiError::store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound)
  }
}
