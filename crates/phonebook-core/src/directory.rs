//! The `ContactDirectory` trait.
//!
//! Implemented by the storage backends (`phonebook-store-sqlite`,
//! `phonebook-store-memory`) and by the [`crate::Logged`] decorator. The API
//! crate depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::contact::{Contact, ContactId, NewContact};

/// Abstraction over a phonebook backend.
///
/// "Not found" is never an error: lookups return `None` or an empty list,
/// `update` returns `None`, and `delete_by_id` returns `false`. Errors are
/// reserved for storage failures, which callers propagate without
/// interpretation.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContactDirectory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist `contact`. Without an id a fresh one is assigned; with an id
  /// the record holding it is overwritten, or created if there is none.
  fn save(
    &self,
    contact: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Overwrite `name`, `phone_number` and `email` of the contact with `id`.
  /// Returns `None`, and writes nothing, if there is no such contact.
  fn update(
    &self,
    id: ContactId,
    fields: NewContact,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Remove the contact with `id`. Returns whether anything was removed.
  fn delete_by_id(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every contact in directory order, truncated to `limit` if given.
  fn find_all(
    &self,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  fn find_by_id(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Exact-match lookup. Phone numbers are not unique; when several
  /// contacts share one, the lowest id wins.
  fn find_by_phone_number<'a>(
    &'a self,
    phone_number: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// Contacts whose name contains `fragment`, ignoring ASCII case, ordered
  /// by id. An empty fragment matches everything.
  fn find_by_name_containing<'a>(
    &'a self,
    fragment: &'a str,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + 'a;
}
