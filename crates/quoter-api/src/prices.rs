//! Handlers for `/prices`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/prices` | Whole price book, history included |
//! | `POST` | `/prices` | Body: `{"<product id>": {"price": .., "name": ".."}}` |

use std::sync::Arc;

use axum::{Json, extract::State};
use bytes::Bytes;
use quoter_core::{
  price::{self, PriceBook},
  store::QuoteStore,
};
use serde_json::{Value, json};

use crate::{error::ApiError, json_body};

/// `GET /prices`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<PriceBook>, ApiError>
where
  S: QuoteStore,
{
  let book = store.prices().await.map_err(ApiError::store)?;
  tracing::debug!(products = book.len(), "sending price book");
  Ok(Json(book))
}

/// `POST /prices` — merge submitted prices; history grows only on change.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<Value>, ApiError>
where
  S: QuoteStore,
{
  let updates = price::parse_updates(json_body(&body)?)?;
  store.update_prices(updates).await.map_err(ApiError::store)?;
  Ok(Json(json!({ "message": "Prices updated successfully" })))
}
