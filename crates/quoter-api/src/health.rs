//! Handler for `GET /health`.

use axum::Json;
use chrono::Local;
use serde_json::{Value, json};

pub async fn handler() -> Json<Value> {
  Json(json!({
    "status": "healthy",
    "timestamp": Local::now().to_rfc3339(),
  }))
}
