//! Contact types: the single record kept by a phonebook directory.
//!
//! [`Contact`] is what a directory stores and returns. [`NewContact`] is the
//! input to writes. [`ContactInput`] is the loosely-typed wire body that has
//! not been checked yet.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned contact identifier.
pub type ContactId = i64;

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A stored contact. `id` is assigned by the directory and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:           ContactId,
  pub name:         String,
  pub phone_number: String,
  pub email:        Option<String>,
}

impl Contact {
  /// Whether `name` contains `fragment`, ignoring ASCII case.
  ///
  /// The SQLite backend folds case with `lower()`, which is ASCII-only;
  /// matching here uses the same folding so both backends agree.
  pub fn name_contains(&self, fragment: &str) -> bool {
    self
      .name
      .to_ascii_lowercase()
      .contains(&fragment.to_ascii_lowercase())
  }

  /// Overwrite every mutable field from `fields`; `id` is left alone.
  pub fn apply(&mut self, fields: NewContact) {
    self.name = fields.name;
    self.phone_number = fields.phone_number;
    self.email = fields.email;
  }
}

impl fmt::Display for Contact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Contact(id={}, name={}, phoneNumber={}, email={})",
      self.id,
      self.name,
      self.phone_number,
      self.email.as_deref().unwrap_or("null"),
    )
  }
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Input to [`crate::directory::ContactDirectory::save`] and `update`.
///
/// `id` is only consulted by `save`: `None` inserts under a fresh id, `Some`
/// inserts or overwrites the record with that id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub id:           Option<ContactId>,
  pub name:         String,
  pub phone_number: String,
  pub email:        Option<String>,
}

impl NewContact {
  pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
    Self {
      id: None,
      name: name.into(),
      phone_number: phone_number.into(),
      email: None,
    }
  }

  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }

  pub fn with_id(mut self, id: ContactId) -> Self {
    self.id = Some(id);
    self
  }

  /// Materialise as a stored [`Contact`] under `id`.
  pub fn into_contact(self, id: ContactId) -> Contact {
    Contact {
      id,
      name: self.name,
      phone_number: self.phone_number,
      email: self.email,
    }
  }
}

impl fmt::Display for NewContact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.id {
      Some(id) => write!(f, "Contact(id={id}, ")?,
      None => write!(f, "Contact(id=null, ")?,
    }
    write!(
      f,
      "name={}, phoneNumber={}, email={})",
      self.name,
      self.phone_number,
      self.email.as_deref().unwrap_or("null"),
    )
  }
}

// ─── ContactInput ────────────────────────────────────────────────────────────

/// A contact body as received over HTTP. Every field is optional so that
/// validation can name each missing one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
  pub id:           Option<ContactId>,
  pub name:         Option<String>,
  pub phone_number: Option<String>,
  pub email:        Option<String>,
}

impl ContactInput {
  /// Accept the body as-is, without validation. Missing `name` or
  /// `phoneNumber` become empty strings; any body `id` is dropped.
  pub fn into_unchecked(self) -> NewContact {
    NewContact {
      id:           None,
      name:         self.name.unwrap_or_default(),
      phone_number: self.phone_number.unwrap_or_default(),
      email:        self.email,
    }
  }
}
