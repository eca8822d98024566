//! Error type for `phonebook-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Every id up to `i64::MAX` has been handed out.
  #[error("contact ids exhausted")]
  IdsExhausted,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
