//! [`Logged`], a logging decorator for any [`ContactDirectory`].
//!
//! Every call produces an entry line, a timing line, and either an exit line
//! or a failure line:
//!
//! ```text
//! Entering find_by_id with args: [3]
//! find_by_id executed in 41250 ns
//! Exiting find_by_id with result: Contact(id=3, name=Frank, ...)
//! ```
//!
//! Arguments, results and errors pass through untouched.

use std::{fmt, future::Future, time::Instant};

use crate::{
  contact::{Contact, ContactId, NewContact},
  directory::ContactDirectory,
  render::{Render, render_args},
};

// ─── Message shapes ──────────────────────────────────────────────────────────

pub fn entering_message(method: &str, args: &str) -> String {
  format!("Entering {method} with args: {args}")
}

pub fn exiting_message(method: &str, result: &str) -> String {
  format!("Exiting {method} with result: {result}")
}

/// An error with an empty message is reported as `null`.
pub fn threw_message(method: &str, error: &dyn fmt::Display) -> String {
  let message = error.to_string();
  let message = if message.is_empty() { "null" } else { message.as_str() };
  format!("{method} threw exception: {message}")
}

pub fn executed_message(method: &str, nanos: u128) -> String {
  format!("{method} executed in {nanos} ns")
}

pub fn failed_message(method: &str, nanos: u128) -> String {
  format!("{method} failed in {nanos} ns")
}

/// Log around `call` and hand back its outcome unchanged.
pub async fn observe<T, E, F>(method: &'static str, args: String, call: F) -> Result<T, E>
where
  F: Future<Output = Result<T, E>>,
  T: Render,
  E: fmt::Display,
{
  tracing::info!("{}", entering_message(method, &args));
  let start = Instant::now();

  let outcome = call.await;
  let nanos = start.elapsed().as_nanos();

  match &outcome {
    Ok(value) => {
      tracing::info!("{}", executed_message(method, nanos));
      tracing::info!("{}", exiting_message(method, &value.render()));
    }
    Err(e) => {
      tracing::warn!("{}", failed_message(method, nanos));
      tracing::warn!("{}", threw_message(method, e));
    }
  }

  outcome
}

// ─── Decorator ───────────────────────────────────────────────────────────────

/// Wraps a directory and logs every call made through it.
#[derive(Debug, Clone)]
pub struct Logged<D> {
  inner: D,
}

impl<D> Logged<D> {
  pub fn new(inner: D) -> Self { Self { inner } }

  pub fn inner(&self) -> &D { &self.inner }

  pub fn into_inner(self) -> D { self.inner }
}

impl<D: ContactDirectory> ContactDirectory for Logged<D> {
  type Error = D::Error;

  async fn save(&self, contact: NewContact) -> Result<Contact, D::Error> {
    let args = render_args(&[&contact]);
    observe("save", args, self.inner.save(contact)).await
  }

  async fn update(
    &self,
    id: ContactId,
    fields: NewContact,
  ) -> Result<Option<Contact>, D::Error> {
    let args = render_args(&[&id, &fields]);
    observe("update", args, self.inner.update(id, fields)).await
  }

  async fn delete_by_id(&self, id: ContactId) -> Result<bool, D::Error> {
    let args = render_args(&[&id]);
    observe("delete_by_id", args, self.inner.delete_by_id(id)).await
  }

  async fn find_all(&self, limit: Option<usize>) -> Result<Vec<Contact>, D::Error> {
    let args = render_args(&[&limit]);
    observe("find_all", args, self.inner.find_all(limit)).await
  }

  async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, D::Error> {
    let args = render_args(&[&id]);
    observe("find_by_id", args, self.inner.find_by_id(id)).await
  }

  async fn find_by_phone_number(
    &self,
    phone_number: &str,
  ) -> Result<Option<Contact>, D::Error> {
    let args = render_args(&[&phone_number]);
    observe(
      "find_by_phone_number",
      args,
      self.inner.find_by_phone_number(phone_number),
    )
    .await
  }

  async fn find_by_name_containing(
    &self,
    fragment: &str,
  ) -> Result<Vec<Contact>, D::Error> {
    let args = render_args(&[&fragment]);
    observe(
      "find_by_name_containing",
      args,
      self.inner.find_by_name_containing(fragment),
    )
    .await
  }
}

#[cfg(test)]
mod tests {
  use std::{
    io,
    sync::{Arc, Mutex},
  };

  use thiserror::Error;
  use tracing_subscriber::fmt::MakeWriter;

  use super::*;

  // ─── Capturing subscriber ──────────────────────────────────────────────────

  #[derive(Clone, Default)]
  struct Captured(Arc<Mutex<Vec<u8>>>);

  impl Captured {
    fn text(&self) -> String {
      String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
  }

  impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.lock().unwrap().extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
  }

  impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer { self.clone() }
  }

  fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
      .with_writer(captured.clone())
      .with_ansi(false)
      .without_time()
      .with_level(false)
      .with_target(false)
      .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (captured, guard)
  }

  // ─── Scripted directory ────────────────────────────────────────────────────

  #[derive(Debug, Error)]
  enum StubError {
    #[error("disk on fire")]
    Loud,
    #[error("")]
    Silent,
  }

  /// Returns a fixed contact for id 1, fails for ids 13 and 14, and is empty
  /// otherwise.
  struct Scripted;

  fn frank() -> Contact {
    NewContact::new("Frank", "555-123-4567").into_contact(1)
  }

  impl ContactDirectory for Scripted {
    type Error = StubError;

    async fn save(&self, contact: NewContact) -> Result<Contact, StubError> {
      Ok(contact.into_contact(1))
    }

    async fn update(
      &self,
      _id: ContactId,
      _fields: NewContact,
    ) -> Result<Option<Contact>, StubError> {
      Ok(None)
    }

    async fn delete_by_id(&self, _id: ContactId) -> Result<bool, StubError> {
      Ok(false)
    }

    async fn find_all(&self, _limit: Option<usize>) -> Result<Vec<Contact>, StubError> {
      Ok(vec![frank()])
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, StubError> {
      match id {
        1 => Ok(Some(frank())),
        13 => Err(StubError::Loud),
        14 => Err(StubError::Silent),
        _ => Ok(None),
      }
    }

    async fn find_by_phone_number(
      &self,
      _phone_number: &str,
    ) -> Result<Option<Contact>, StubError> {
      Ok(None)
    }

    async fn find_by_name_containing(
      &self,
      _fragment: &str,
    ) -> Result<Vec<Contact>, StubError> {
      Ok(Vec::new())
    }
  }

  // ─── Message shapes ────────────────────────────────────────────────────────

  #[test]
  fn message_shapes() {
    assert_eq!(
      entering_message("testMethod", "[arg1, 123]"),
      "Entering testMethod with args: [arg1, 123]"
    );
    assert_eq!(
      exiting_message("testMethod", "successResult"),
      "Exiting testMethod with result: successResult"
    );
    assert_eq!(
      threw_message("testMethod", &"Test runtime exception"),
      "testMethod threw exception: Test runtime exception"
    );
    assert_eq!(threw_message("testMethod", &""), "testMethod threw exception: null");
    assert_eq!(executed_message("testMethod", 12), "testMethod executed in 12 ns");
    assert_eq!(failed_message("testMethod", 12), "testMethod failed in 12 ns");
  }

  // ─── Decorator ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn success_logs_entry_timing_and_result() {
    let (out, _guard) = capture();
    let dir = Logged::new(Scripted);

    let found = dir.find_by_id(1).await.unwrap();
    assert_eq!(found, Some(frank()));

    let text = out.text();
    assert!(text.contains("Entering find_by_id with args: [1]\n"), "{text}");
    assert!(text.contains("find_by_id executed in "), "{text}");
    assert!(text.contains(" ns\n"), "{text}");
    assert!(
      text.contains(
        "Exiting find_by_id with result: \
         Contact(id=1, name=Frank, phoneNumber=555-123-4567, email=null)\n"
      ),
      "{text}"
    );
    assert!(!text.contains("threw exception"), "{text}");
  }

  #[tokio::test]
  async fn absent_result_logs_null() {
    let (out, _guard) = capture();
    let dir = Logged::new(Scripted);

    assert_eq!(dir.find_by_id(2).await.unwrap(), None);
    assert!(out.text().contains("Exiting find_by_id with result: null\n"));
  }

  #[tokio::test]
  async fn failure_logs_and_propagates_the_same_error() {
    let (out, _guard) = capture();
    let dir = Logged::new(Scripted);

    let err = dir.find_by_id(13).await.unwrap_err();
    assert!(matches!(err, StubError::Loud));

    let text = out.text();
    assert!(text.contains("find_by_id failed in "), "{text}");
    assert!(text.contains("find_by_id threw exception: disk on fire\n"), "{text}");
    assert!(!text.contains("Exiting find_by_id"), "{text}");
  }

  #[tokio::test]
  async fn failure_without_message_logs_null() {
    let (out, _guard) = capture();
    let dir = Logged::new(Scripted);

    assert!(matches!(dir.find_by_id(14).await, Err(StubError::Silent)));
    assert!(out.text().contains("find_by_id threw exception: null\n"));
  }

  #[tokio::test]
  async fn calls_on_the_unwrapped_directory_are_not_logged() {
    let (out, _guard) = capture();
    let dir = Logged::new(Scripted);

    assert_eq!(dir.inner().find_by_id(1).await.unwrap(), Some(frank()));
    let bare: Scripted = dir.into_inner();
    assert_eq!(bare.find_all(None).await.unwrap(), vec![frank()]);

    assert!(out.text().is_empty(), "{}", out.text());
  }

  #[tokio::test]
  async fn arguments_are_rendered_and_passed_through() {
    let (out, _guard) = capture();
    let dir = Logged::new(Scripted);

    let saved = dir
      .save(NewContact::new("Alice", "123-456-7890").with_email("a@example.com"))
      .await
      .unwrap();
    assert_eq!(saved.email.as_deref(), Some("a@example.com"));

    dir.find_all(None).await.unwrap();
    dir.find_by_phone_number("098-765-4321").await.unwrap();

    let text = out.text();
    assert!(
      text.contains(
        "Entering save with args: \
         [Contact(id=null, name=Alice, phoneNumber=123-456-7890, email=a@example.com)]\n"
      ),
      "{text}"
    );
    assert!(text.contains("Entering find_all with args: [null]\n"), "{text}");
    assert!(
      text.contains("Entering find_by_phone_number with args: [098-765-4321]\n"),
      "{text}"
    );
  }
}
