//! Error types for `quoter-core`.
//!
//! Display strings are client-facing: the API layer returns them verbatim in
//! the `message` field of a 400 response.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("No price data provided")]
  NoPriceData,

  #[error("Status data must be an object keyed by quote ID")]
  InvalidStatus,

  #[error("{0} data must be a list")]
  NotAList(&'static str),

  #[error("Analytics data must be a non-empty list")]
  EmptyAnalytics,

  #[error("invalid payload: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
