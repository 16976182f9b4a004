//! HTTP API for Quoter.
//!
//! Exposes an axum [`Router`] backed by any [`quoter_core::store::QuoteStore`].
//! Transport concerns (binding, tracing layers, body limits) are the caller's
//! responsibility.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`/`POST` | `/products` | CSV catalog |
//! | `GET`/`POST` | `/prices` | Price book with history |
//! | `GET`/`POST` | `/status` | Quote map keyed by ID |
//! | `DELETE` | `/status/{id}` | Also prunes history/analytics by date |
//! | `GET`/`POST` | `/history` | Free-form list |
//! | `GET`/`POST` | `/analytics` | Free-form non-empty list |
//! | `GET`/`POST` | `/categories` | Seeded with defaults |
//! | `GET` | `/health` | Liveness |
//! | `GET` | `/debug` | HTML overview |
//! | `GET` | `/backup` | Zip of every data file |

pub mod backup;
pub mod categories;
pub mod debug;
pub mod error;
pub mod etag;
pub mod health;
pub mod prices;
pub mod products;
pub mod quotes;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get},
};
use bytes::Bytes;
use quoter_core::store::QuoteStore;
use serde_json::Value;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: QuoteStore + 'static,
{
  Router::new()
    // Catalog and prices
    .route("/products", get(products::get_csv::<S>).post(products::upload::<S>))
    .route("/prices", get(prices::list::<S>).post(prices::update::<S>))
    // Quotes
    .route("/status", get(quotes::status::<S>).post(quotes::update_status::<S>))
    .route("/status/{id}", delete(quotes::delete_one::<S>))
    .route("/history", get(quotes::history::<S>).post(quotes::replace_history::<S>))
    .route(
      "/analytics",
      get(quotes::analytics::<S>).post(quotes::replace_analytics::<S>),
    )
    // Taxonomy
    .route("/categories", get(categories::list::<S>).post(categories::replace::<S>))
    // Operations
    .route("/health", get(health::handler))
    .route("/debug", get(debug::handler::<S>))
    .route("/backup", get(backup::handler::<S>))
    .with_state(store)
}

/// Parse a request body as JSON regardless of its `Content-Type`.
///
/// Clients of this service are not consistent about sending
/// `application/json`, so the body is read raw and parsed here.
pub(crate) fn json_body(body: &Bytes) -> Result<Value, ApiError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(Value::Null);
  }
  serde_json::from_slice(body)
    .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))
}

#[cfg(test)]
mod tests;
