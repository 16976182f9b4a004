//! Analytics log validation.

use serde_json::Value;

use crate::{Error, Result};

/// An analytics write must carry at least one entry.
pub fn validate(entries: &[Value]) -> Result<()> {
  if entries.is_empty() {
    return Err(Error::EmptyAnalytics);
  }
  Ok(())
}
