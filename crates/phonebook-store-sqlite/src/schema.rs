//! SQL schema for the phonebook SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps deleted ids from ever being handed out again.
CREATE TABLE IF NOT EXISTS contacts (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    phone_number  TEXT NOT NULL,   -- not unique; lookups take the lowest id
    email         TEXT
);

CREATE INDEX IF NOT EXISTS contacts_phone_idx ON contacts(phone_number);

PRAGMA user_version = 1;
";
