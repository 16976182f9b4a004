//! Quotes, the status map, and the quote-delete correlation rule.
//!
//! Quotes are client-defined: the store accepts any JSON shape and only ever
//! looks at a quote's `date` field. History and analytics entries are linked
//! to a quote by nothing more than an equal `date` value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// A single client-supplied quote record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quote(pub Value);

impl Quote {
  /// The quote's `date` field, if it has a non-null one.
  pub fn date(&self) -> Option<&Value> {
    self.0.get("date").filter(|d| !d.is_null())
  }
}

/// Quote ID → [`Quote`], stored as the status file.
pub type QuoteMap = BTreeMap<String, Quote>;

/// Parse a `POST /status` body: must be a JSON object keyed by quote ID.
pub fn parse_status(body: Value) -> Result<QuoteMap> {
  match body {
    Value::Object(map) => Ok(map.into_iter().map(|(id, q)| (id, Quote(q))).collect()),
    _ => Err(Error::InvalidStatus),
  }
}

/// Parse a body that must be a JSON array (history, analytics).
pub fn parse_list(kind: &'static str, body: Value) -> Result<Vec<Value>> {
  match body {
    Value::Array(entries) => Ok(entries),
    _ => Err(Error::NotAList(kind)),
  }
}

/// Remove every entry whose `date` equals `date`. Returns how many went.
///
/// Entries without a `date`, or with a different one, are kept.
pub fn remove_dated(entries: &mut Vec<Value>, date: &Value) -> usize {
  let before = entries.len();
  entries.retain(|e| e.get("date") != Some(date));
  before - entries.len()
}

/// What a quote deletion removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteDeletion {
  pub quote_id:          String,
  pub quote:             Quote,
  pub history_removed:   usize,
  pub analytics_removed: usize,
}
