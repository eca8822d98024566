//! [`MemoryDirectory`]: the in-memory implementation of [`ContactDirectory`].

use std::sync::Arc;

use phonebook_core::{
  Contact, ContactDirectory, ContactId, NewContact, limit::apply_limit,
};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{Error, Result};

// ─── Id allocation ───────────────────────────────────────────────────────────

/// How a [`MemoryDirectory`] picks the id of a new contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdAllocation {
  /// A counter that only moves forward. Deleted ids are never reissued.
  #[default]
  Monotonic,
  /// Current collection size plus one. After a deletion this reissues a
  /// vacated id or collides with a live one; only for clients that depend on
  /// that numbering.
  CollectionSize,
}

/// The five contacts a seeded directory starts with.
pub fn sample_contacts() -> Vec<Contact> {
  [
    (1, "Alice", "123-456-7890"),
    (2, "Bob", "098-765-4321"),
    (3, "Frank", "555-123-4567"),
    (4, "Grace", "555-987-6543"),
    (5, "Judy", "555-111-2222"),
  ]
  .into_iter()
  .map(|(id, name, phone)| NewContact::new(name, phone).into_contact(id))
  .collect()
}

// ─── Store ───────────────────────────────────────────────────────────────────

struct Inner {
  /// Insertion order; this is the order `find_all` reports.
  contacts: Vec<Contact>,
  /// Next id handed out in [`IdAllocation::Monotonic`] mode; `None` once
  /// `ContactId::MAX` has been used.
  next_id:  Option<ContactId>,
}

impl Inner {
  fn allocate(&mut self, allocation: IdAllocation) -> Result<ContactId> {
    match allocation {
      IdAllocation::Monotonic => {
        let id = self.next_id.ok_or(Error::IdsExhausted)?;
        self.next_id = id.checked_add(1);
        Ok(id)
      }
      IdAllocation::CollectionSize => ContactId::try_from(self.contacts.len())
        .ok()
        .and_then(|n| n.checked_add(1))
        .ok_or(Error::IdsExhausted),
    }
  }

  /// Move the monotonic counter past an explicitly chosen `id`.
  fn reserve(&mut self, id: ContactId) {
    self.next_id = match (self.next_id, id.checked_add(1)) {
      (Some(next), Some(after)) => Some(next.max(after)),
      _ => None,
    };
  }

  fn position(&self, id: ContactId) -> Option<usize> {
    self.contacts.iter().position(|c| c.id == id)
  }
}

/// A phonebook held in process memory.
///
/// Every operation takes the lock for its whole duration, so each one is
/// atomic with respect to the others. Cloning is cheap; clones share the
/// same collection.
#[derive(Clone)]
pub struct MemoryDirectory {
  inner:      Arc<Mutex<Inner>>,
  allocation: IdAllocation,
}

impl MemoryDirectory {
  /// An empty directory.
  pub fn new(allocation: IdAllocation) -> Self {
    Self::with_contacts(Vec::new(), allocation)
  }

  /// A directory pre-populated with [`sample_contacts`].
  pub fn seeded(allocation: IdAllocation) -> Self {
    Self::with_contacts(sample_contacts(), allocation)
  }

  /// A directory starting from `contacts`. The monotonic counter starts
  /// after the highest id present.
  pub fn with_contacts(contacts: Vec<Contact>, allocation: IdAllocation) -> Self {
    let next_id = contacts.iter().map(|c| c.id).max().unwrap_or(0).checked_add(1);
    Self {
      inner: Arc::new(Mutex::new(Inner { contacts, next_id })),
      allocation,
    }
  }

  pub fn allocation(&self) -> IdAllocation { self.allocation }

  /// Number of contacts currently held.
  pub async fn len(&self) -> usize { self.inner.lock().await.contacts.len() }

  pub async fn is_empty(&self) -> bool { self.len().await == 0 }
}

impl Default for MemoryDirectory {
  fn default() -> Self { Self::new(IdAllocation::default()) }
}

// ─── ContactDirectory impl ───────────────────────────────────────────────────

impl ContactDirectory for MemoryDirectory {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn save(&self, contact: NewContact) -> Result<Contact> {
    let mut inner = self.inner.lock().await;

    if let Some(id) = contact.id {
      inner.reserve(id);
      if let Some(pos) = inner.position(id) {
        let existing = &mut inner.contacts[pos];
        existing.apply(contact);
        return Ok(existing.clone());
      }
      let stored = contact.into_contact(id);
      inner.contacts.push(stored.clone());
      return Ok(stored);
    }

    let id = inner.allocate(self.allocation)?;
    tracing::debug!(id, allocation = ?self.allocation, "allocated contact id");
    let stored = contact.into_contact(id);
    inner.contacts.push(stored.clone());
    Ok(stored)
  }

  async fn update(
    &self,
    id: ContactId,
    fields: NewContact,
  ) -> Result<Option<Contact>> {
    let mut inner = self.inner.lock().await;
    let Some(pos) = inner.position(id) else {
      return Ok(None);
    };
    let existing = &mut inner.contacts[pos];
    existing.apply(fields);
    Ok(Some(existing.clone()))
  }

  async fn delete_by_id(&self, id: ContactId) -> Result<bool> {
    let mut inner = self.inner.lock().await;
    let before = inner.contacts.len();
    // Size-based allocation can produce duplicate ids; remove them all.
    inner.contacts.retain(|c| c.id != id);
    Ok(inner.contacts.len() != before)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_all(&self, limit: Option<usize>) -> Result<Vec<Contact>> {
    let inner = self.inner.lock().await;
    Ok(apply_limit(inner.contacts.clone(), limit))
  }

  async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
    let inner = self.inner.lock().await;
    Ok(inner.contacts.iter().find(|c| c.id == id).cloned())
  }

  async fn find_by_phone_number(
    &self,
    phone_number: &str,
  ) -> Result<Option<Contact>> {
    let inner = self.inner.lock().await;
    Ok(
      inner
        .contacts
        .iter()
        .filter(|c| c.phone_number == phone_number)
        .min_by_key(|c| c.id)
        .cloned(),
    )
  }

  async fn find_by_name_containing(
    &self,
    fragment: &str,
  ) -> Result<Vec<Contact>> {
    let inner = self.inner.lock().await;
    let mut found: Vec<Contact> = inner
      .contacts
      .iter()
      .filter(|c| c.name_contains(fragment))
      .cloned()
      .collect();
    found.sort_by_key(|c| c.id);
    Ok(found)
  }
}
