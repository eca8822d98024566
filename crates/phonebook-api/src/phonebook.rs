//! Handlers for the validating `/phonebook` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/phonebook` | 201; 400 on invalid body |
//! | `GET`    | `/phonebook` | every contact |
//! | `GET`    | `/phonebook/{id}` | 404 if not found |
//! | `GET`    | `/phonebook/phone/{phone_number}` | 404 if not found |
//! | `GET`    | `/phonebook/search/name/{name}` | possibly empty list |
//! | `PUT`    | `/phonebook/{id}` | 400 on invalid body; 404 if not found |
//! | `DELETE` | `/phonebook/{id}` | always 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use phonebook_core::{Contact, ContactDirectory, ContactId, ContactInput};

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /phonebook`, body: `{"name":"Alice","phoneNumber":"123-456-7890"}`
pub async fn create<D>(
  State(dir): State<Arc<D>>,
  Json(body): Json<ContactInput>,
) -> Result<impl IntoResponse, ApiError>
where
  D: ContactDirectory,
{
  let draft = body.validate()?;
  let saved = dir.save(draft).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(saved)))
}

// ─── Reads ────────────────────────────────────────────────────────────────────

/// `GET /phonebook`
pub async fn list<D>(State(dir): State<Arc<D>>) -> Result<Json<Vec<Contact>>, ApiError>
where
  D: ContactDirectory,
{
  let contacts = dir.find_all(None).await.map_err(ApiError::store)?;
  Ok(Json(contacts))
}

/// `GET /phonebook/{id}`
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

/// `GET /phonebook/phone/{phone_number}`
pub async fn by_phone<D>(
  State(dir): State<Arc<D>>,
  Path(phone_number): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  D: ContactDirectory,
{
  let contact = dir
    .find_by_phone_number(&phone_number)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(contact))
}

/// `GET /phonebook/search/name/{name}`
pub async fn search_by_name<D>(
  State(dir): State<Arc<D>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  D: ContactDirectory,
{
  let contacts = dir
    .find_by_name_containing(&name)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(contacts))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /phonebook/{id}` overwrites name, phone number and email.
pub async fn update_one<D>(
  State(dir): State<Arc<D>>,
  Path(id): Path<ContactId>,
  Json(body): Json<ContactInput>,
) -> Result<Json<Contact>, ApiError>
where
  D: ContactDirectory,
{
  let fields = body.validate()?;
  let updated = dir
    .update(id, fields)
    .await
    .map_err(ApiError::store)?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(updated))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /phonebook/{id}` answers 204 whether or not the contact existed.
pub async fn delete_one<D>(
  State(dir): State<Arc<D>>,
  Path(id): Path<ContactId>,
) -> Result<StatusCode, ApiError>
where
  D: ContactDirectory,
{
  dir.delete_by_id(id).await.map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
