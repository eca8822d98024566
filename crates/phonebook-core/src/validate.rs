//! Explicit validation of inbound contact bodies.
//!
//! Runs before a body reaches any directory. Only the validating HTTP surface
//! calls it; the demo surface stores bodies unchecked.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::{
  Result,
  contact::{ContactInput, NewContact},
};

/// `XXX-XXX-XXXX`, ASCII digits only, matched against the whole value.
static PHONE_PATTERN: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$").expect("valid phone regex"));

pub const NAME_NULL: &str = "Name cannot be null";
pub const NAME_EMPTY: &str = "Name cannot be empty";
pub const PHONE_NULL: &str = "Phone number cannot be null";
pub const PHONE_FORMAT: &str = "Phone number must be in format XXX-XXX-XXXX";

/// A single rejected field, keyed by its wire name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: &'static str,
}

/// Every field-level problem found in one body, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
  pub fn fields(&self) -> &[FieldError] { &self.0 }

  pub fn message_for(&self, field: &str) -> Option<&'static str> {
    self.0.iter().find(|e| e.field == field).map(|e| e.message)
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let parts: Vec<String> =
      self.0.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
    f.write_str(&parts.join("; "))
  }
}

/// Whether `phone` has the `XXX-XXX-XXXX` shape.
pub fn is_valid_phone_number(phone: &str) -> bool {
  PHONE_PATTERN.is_match(phone)
}

impl ContactInput {
  /// Check the body and turn it into a [`NewContact`]. Any body `id` is
  /// dropped; callers choose the id.
  pub fn validate(self) -> Result<NewContact> {
    let mut errors = Vec::new();

    match self.name.as_deref() {
      None => errors.push(FieldError { field: "name", message: NAME_NULL }),
      Some(n) if n.trim().is_empty() => {
        errors.push(FieldError { field: "name", message: NAME_EMPTY })
      }
      Some(_) => {}
    }

    match self.phone_number.as_deref() {
      None => errors.push(FieldError { field: "phoneNumber", message: PHONE_NULL }),
      Some(p) if !is_valid_phone_number(p) => {
        errors.push(FieldError { field: "phoneNumber", message: PHONE_FORMAT })
      }
      Some(_) => {}
    }

    if !errors.is_empty() {
      return Err(ValidationErrors(errors).into());
    }

    Ok(NewContact {
      id:           None,
      name:         self.name.unwrap_or_default(),
      phone_number: self.phone_number.unwrap_or_default(),
      email:        self.email,
    })
  }
}
