//! Parsing of the textual `limit` query parameter.

/// Default applied by the demo listing when no `limit` is supplied.
pub const DEFAULT_LIMIT: &str = "2";

/// Parse `raw` as a result count.
///
/// Anything that is not exactly a non-negative integer means "no limit",
/// including surrounding whitespace. The failure is logged and never
/// surfaced to the caller.
pub fn parse_limit(raw: &str) -> Option<usize> {
  match raw.parse::<usize>() {
    Ok(n) => Some(n),
    Err(e) => {
      tracing::error!(limit = raw, "Illegal argument of limit parameter: {e}");
      None
    }
  }
}

/// Truncate `items` to at most `limit` entries.
pub fn apply_limit<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
  if let Some(n) = limit {
    items.truncate(n);
  }
  items
}
