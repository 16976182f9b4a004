//! Handlers for quote status, history and analytics.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/status` | Quote map keyed by quote ID |
//! | `POST`   | `/status` | Body: `{"<quote id>": {...}}`; upserts each quote |
//! | `DELETE` | `/status/{id}` | Removes the quote and same-`date` history/analytics entries |
//! | `GET`    | `/history` | |
//! | `POST`   | `/history` | Body: JSON array; replaces the log |
//! | `GET`    | `/analytics` | |
//! | `POST`   | `/analytics` | Body: non-empty JSON array; replaces the log |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use bytes::Bytes;
use quoter_core::{
  analytics,
  quote::{self, QuoteMap},
  store::QuoteStore,
};
use serde_json::{Value, json};

use crate::{error::ApiError, json_body};

// ─── Status ───────────────────────────────────────────────────────────────────

/// `GET /status`
pub async fn status<S>(State(store): State<Arc<S>>) -> Result<Json<QuoteMap>, ApiError>
where
  S: QuoteStore,
{
  Ok(Json(store.quotes().await.map_err(ApiError::store)?))
}

/// `POST /status`
pub async fn update_status<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<Value>, ApiError>
where
  S: QuoteStore,
{
  let quotes = quote::parse_status(json_body(&body)?)?;
  let stored = store.upsert_quotes(quotes).await.map_err(ApiError::store)?;
  Ok(Json(json!({
    "message": "Status updated successfully",
    "quotes": stored.len(),
  })))
}

/// `DELETE /status/{id}`
///
/// Status, history and analytics are rewritten one after another. A failure
/// part-way leaves the earlier files already updated.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: QuoteStore,
{
  let deletion = store
    .delete_quote(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("Quote {id} not found")))?;

  tracing::info!(quote_id = %id, "quote deleted");
  Ok(Json(json!({
    "message": "Quote deleted successfully",
    "history_removed": deletion.history_removed,
    "analytics_removed": deletion.analytics_removed,
  })))
}

// ─── History ──────────────────────────────────────────────────────────────────

/// `GET /history`
pub async fn history<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Value>>, ApiError>
where
  S: QuoteStore,
{
  Ok(Json(store.history().await.map_err(ApiError::store)?))
}

/// `POST /history`
pub async fn replace_history<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<Value>, ApiError>
where
  S: QuoteStore,
{
  let entries = quote::parse_list("History", json_body(&body)?)?;
  let count = entries.len();
  store.replace_history(entries).await.map_err(ApiError::store)?;
  Ok(Json(json!({ "message": "History updated successfully", "entries": count })))
}

// ─── Analytics ────────────────────────────────────────────────────────────────

/// `GET /analytics`
pub async fn analytics<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Value>>, ApiError>
where
  S: QuoteStore,
{
  Ok(Json(store.analytics().await.map_err(ApiError::store)?))
}

/// `POST /analytics` — an empty list is a 400, never written.
pub async fn replace_analytics<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<Value>, ApiError>
where
  S: QuoteStore,
{
  let entries = quote::parse_list("Analytics", json_body(&body)?)?;
  analytics::validate(&entries)?;
  let count = entries.len();
  store.replace_analytics(entries).await.map_err(ApiError::store)?;
  Ok(Json(json!({ "message": "Analytics updated successfully", "entries": count })))
}
