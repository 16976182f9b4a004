//! Price records and the price-book merge rule.
//!
//! A price book maps product IDs to their current price plus an append-only
//! history of changes. Prices are kept as raw JSON values: clients have sent
//! both numbers and strings over the years and the store never rejects either.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

fn zero_price() -> Value { Value::from(0) }

fn empty_name() -> Value { Value::from("") }

// ─── Records ─────────────────────────────────────────────────────────────────

/// One entry in a product's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
  pub price: Value,
  pub date:  String,
}

/// The stored state for a single product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
  #[serde(default = "empty_name")]
  pub name:          Value,
  #[serde(default = "zero_price")]
  pub price:         Value,
  #[serde(default)]
  pub history:       Vec<PriceEntry>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_modified: Option<String>,
  /// Fields written by older clients; carried through untouched.
  #[serde(flatten)]
  pub extra:         Map<String, Value>,
}

/// A client-submitted price for one product.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceUpdate {
  #[serde(default = "empty_name")]
  pub name:  Value,
  #[serde(default = "zero_price")]
  pub price: Value,
}

/// The body of `POST /prices`: product ID → submitted price.
pub type PriceUpdates = BTreeMap<String, PriceUpdate>;

/// Parse a `POST /prices` body. Anything other than a non-empty object is
/// rejected with [`Error::NoPriceData`].
pub fn parse_updates(body: Value) -> Result<PriceUpdates> {
  match &body {
    Value::Object(map) if !map.is_empty() => Ok(serde_json::from_value(body)?),
    _ => Err(Error::NoPriceData),
  }
}

/// Compare two stored prices. Numbers compare by numeric value so that `10`
/// and `10.0` are the same price; everything else compares structurally.
pub fn prices_equal(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
      (Some(x), Some(y)) => x == y,
      _ => x == y,
    },
    _ => a == b,
  }
}

// ─── Price book ──────────────────────────────────────────────────────────────

/// Product ID → [`PriceRecord`], serialised as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceBook(pub BTreeMap<String, PriceRecord>);

impl PriceBook {
  pub fn get(&self, product_id: &str) -> Option<&PriceRecord> {
    self.0.get(product_id)
  }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Merge submitted prices into the book, stamping changes with `stamp`.
  ///
  /// - An unknown product is created with the submitted name and price and an
  ///   empty history.
  /// - A known product whose price differs gets one history entry, and its
  ///   price and name are replaced.
  /// - A known product with an equal price is left alone, including its name.
  ///
  /// Returns the number of history entries appended.
  pub fn apply(&mut self, updates: PriceUpdates, stamp: &str) -> usize {
    let mut changed = 0;
    for (product_id, update) in updates {
      let record = self.0.entry(product_id).or_insert_with(|| PriceRecord {
        name:          update.name.clone(),
        price:         update.price.clone(),
        history:       Vec::new(),
        last_modified: Some(stamp.to_owned()),
        extra:         Map::new(),
      });

      if prices_equal(&record.price, &update.price) {
        continue;
      }

      record.history.push(PriceEntry {
        price: update.price.clone(),
        date:  stamp.to_owned(),
      });
      record.price = update.price;
      record.name = update.name;
      record.last_modified = Some(stamp.to_owned());
      changed += 1;
    }
    changed
  }
}
