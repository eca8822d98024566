//! Core types and trait definitions for the phonebook.
//!
//! This crate has no HTTP or database dependencies.
//! Backends implement [`directory::ContactDirectory`]; the API crate depends
//! only on that abstraction.

pub mod contact;
pub mod directory;
pub mod error;
pub mod limit;
pub mod logged;
pub mod render;
pub mod validate;

pub use contact::{Contact, ContactId, ContactInput, NewContact};
pub use directory::ContactDirectory;
pub use error::{Error, Result};
pub use logged::Logged;
pub use validate::{FieldError, ValidationErrors};
