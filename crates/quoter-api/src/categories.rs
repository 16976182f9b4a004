//! Handlers for `/categories`.

use std::sync::Arc;

use axum::{Json, extract::State};
use bytes::Bytes;
use quoter_core::{category::Category, store::QuoteStore};
use serde_json::{Value, json};

use crate::{error::ApiError, json_body};

/// `GET /categories` — seeds and returns the defaults on first use.
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Category>>, ApiError>
where
  S: QuoteStore,
{
  Ok(Json(store.categories().await.map_err(ApiError::store)?))
}

/// `POST /categories` — body: `[{"id": .., "name": ".."}, ...]`
pub async fn replace<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<Value>, ApiError>
where
  S: QuoteStore,
{
  let categories: Vec<Category> = serde_json::from_value(json_body(&body)?)
    .map_err(|e| ApiError::BadRequest(format!("Invalid category list: {e}")))?;
  let count = categories.len();
  store.replace_categories(categories).await.map_err(ApiError::store)?;
  Ok(Json(json!({ "message": "Categories updated successfully", "categories": count })))
}
