//! Mapping between SQLite rows and phonebook domain types.

use phonebook_core::Contact;

/// Column list shared by every `SELECT` / `RETURNING` clause, in the order
/// [`contact_from_row`] reads them.
pub const CONTACT_COLUMNS: &str = "id, name, phone_number, email";

pub fn contact_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Contact> {
  Ok(Contact {
    id:           row.get(0)?,
    name:         row.get(1)?,
    phone_number: row.get(2)?,
    email:        row.get(3)?,
  })
}

/// SQLite treats a negative `LIMIT` as "no limit".
pub fn encode_limit(limit: Option<usize>) -> i64 {
  match limit {
    Some(n) => i64::try_from(n).unwrap_or(i64::MAX),
    None => -1,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn limit_encoding() {
    assert_eq!(encode_limit(None), -1);
    assert_eq!(encode_limit(Some(0)), 0);
    assert_eq!(encode_limit(Some(3)), 3);
    assert_eq!(encode_limit(Some(usize::MAX)), i64::MAX);
  }
}
