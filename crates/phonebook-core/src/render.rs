//! Log rendering of directory arguments and results.
//!
//! Existing log consumers expect absent values as `null` and sequences as
//! `[a, b]`, so this is a separate trait rather than `Debug`.

use crate::contact::{Contact, NewContact};

pub trait Render {
  fn render(&self) -> String;
}

/// Render a call's arguments as `[a, b, c]`.
pub fn render_args(args: &[&dyn Render]) -> String {
  let parts: Vec<String> = args.iter().map(|a| a.render()).collect();
  format!("[{}]", parts.join(", "))
}

impl Render for str {
  fn render(&self) -> String { self.to_owned() }
}

impl Render for String {
  fn render(&self) -> String { self.clone() }
}

impl<T: Render + ?Sized> Render for &T {
  fn render(&self) -> String { (**self).render() }
}

impl Render for i64 {
  fn render(&self) -> String { self.to_string() }
}

impl Render for usize {
  fn render(&self) -> String { self.to_string() }
}

impl Render for bool {
  fn render(&self) -> String { self.to_string() }
}

/// Operations with nothing to return log their result as `null`.
impl Render for () {
  fn render(&self) -> String { "null".to_owned() }
}

impl Render for Contact {
  fn render(&self) -> String { self.to_string() }
}

impl Render for NewContact {
  fn render(&self) -> String { self.to_string() }
}

impl<T: Render> Render for Option<T> {
  fn render(&self) -> String {
    match self {
      Some(v) => v.render(),
      None => "null".to_owned(),
    }
  }
}

impl<T: Render> Render for Vec<T> {
  fn render(&self) -> String {
    let parts: Vec<String> = self.iter().map(Render::render).collect();
    format!("[{}]", parts.join(", "))
  }
}
