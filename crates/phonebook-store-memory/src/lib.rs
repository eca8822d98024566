//! In-memory backend for the phonebook.
//!
//! A process-lifetime list of contacts behind one async mutex, optionally
//! seeded with sample data. Intended for demos and ephemeral runs; nothing
//! survives a restart.

pub mod error;
mod store;

pub use error::{Error, Result};
pub use store::{IdAllocation, MemoryDirectory, sample_contacts};
