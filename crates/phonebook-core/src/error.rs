//! Error types for `phonebook-core`.

use thiserror::Error;

use crate::validate::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid contact: {0}")]
  Validation(#[from] ValidationErrors),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
