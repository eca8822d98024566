//! [`SqliteDirectory`]: the SQLite implementation of [`ContactDirectory`].

use std::path::Path;

use phonebook_core::{Contact, ContactDirectory, ContactId, NewContact};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{CONTACT_COLUMNS, contact_from_row, encode_limit},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A phonebook backed by a single SQLite file.
///
/// Every operation is one SQL statement, so each is atomic on its own; the
/// connection thread serialises concurrent callers.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteDirectory {
  conn: tokio_rusqlite::Connection,
}

impl SqliteDirectory {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened sqlite contact store");
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of stored contacts.
  pub async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))?)
      })
      .await?;
    Ok(n as usize)
  }
}

// ─── ContactDirectory impl ───────────────────────────────────────────────────

impl ContactDirectory for SqliteDirectory {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn save(&self, contact: NewContact) -> Result<Contact> {
    let stored = self
      .conn
      .call(move |conn| {
        let NewContact { id, name, phone_number, email } = contact;
        let row = match id {
          None => conn.query_row(
            &format!(
              "INSERT INTO contacts (name, phone_number, email)
               VALUES (?1, ?2, ?3)
               RETURNING {CONTACT_COLUMNS}"
            ),
            rusqlite::params![name, phone_number, email],
            contact_from_row,
          )?,
          Some(id) => conn.query_row(
            &format!(
              "INSERT INTO contacts (id, name, phone_number, email)
               VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT(id) DO UPDATE SET
                 name         = excluded.name,
                 phone_number = excluded.phone_number,
                 email        = excluded.email
               RETURNING {CONTACT_COLUMNS}"
            ),
            rusqlite::params![id, name, phone_number, email],
            contact_from_row,
          )?,
        };
        Ok(row)
      })
      .await?;

    Ok(stored)
  }

  async fn update(&self, id: ContactId, fields: NewContact) -> Result<Option<Contact>> {
    let updated = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "UPDATE contacts
                 SET name = ?1, phone_number = ?2, email = ?3
                 WHERE id = ?4
                 RETURNING {CONTACT_COLUMNS}"
              ),
              rusqlite::params![fields.name, fields.phone_number, fields.email, id],
              contact_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(updated)
  }

  async fn delete_by_id(&self, id: ContactId) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM contacts WHERE id = ?1",
          rusqlite::params![id],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(removed)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_all(&self, limit: Option<usize>) -> Result<Vec<Contact>> {
    let limit_val = encode_limit(limit);

    let contacts = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id LIMIT ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit_val], contact_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(contacts)
  }

  async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
              rusqlite::params![id],
              contact_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(found)
  }

  async fn find_by_phone_number(&self, phone_number: &str) -> Result<Option<Contact>> {
    let phone = phone_number.to_owned();

    let found = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CONTACT_COLUMNS} FROM contacts
                 WHERE phone_number = ?1
                 ORDER BY id
                 LIMIT 1"
              ),
              rusqlite::params![phone],
              contact_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(found)
  }

  async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<Contact>> {
    // instr() rather than LIKE so `%` and `_` in the fragment stay literal.
    // lower() folds ASCII only, matching `Contact::name_contains`.
    let fragment = fragment.to_owned();

    let contacts = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts
           WHERE instr(lower(name), lower(?1)) > 0
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![fragment], contact_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(contacts)
  }
}
