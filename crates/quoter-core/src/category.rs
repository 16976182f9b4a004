//! Category taxonomy entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Category identifiers arrive as either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryId {
  Number(i64),
  Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
  pub id:    CategoryId,
  pub name:  String,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Category {
  pub fn new(id: i64, name: &str) -> Self {
    Self {
      id:    CategoryId::Number(id),
      name:  name.to_owned(),
      extra: Map::new(),
    }
  }
}

/// The taxonomy written the first time categories are read from an empty
/// data directory.
pub fn defaults() -> Vec<Category> {
  ["General", "Hardware", "Software", "Services", "Accessories"]
    .into_iter()
    .zip(1..)
    .map(|(name, id)| Category::new(id, name))
    .collect()
}
