//! Handlers for `/products`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/products` | Stored CSV with an `ETag`; 404 if never uploaded |
//! | `POST` | `/products` | Raw CSV body; header validated, content stored as sent |

use std::{borrow::Cow, sync::Arc};

use axum::{
  Json,
  extract::State,
  http::header,
  response::{IntoResponse, Response},
};
use bytes::Bytes;
use csv::StringRecord;
use quoter_core::{product, store::QuoteStore};
use serde_json::{Map, Value, json};

use crate::{error::ApiError, etag::compute_etag};

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const PREVIEW_CHARS: usize = 200;

// ─── Get ──────────────────────────────────────────────────────────────────────

/// `GET /products`
pub async fn get_csv<S>(State(store): State<Arc<S>>) -> Result<Response, ApiError>
where
  S: QuoteStore,
{
  let csv = store
    .products_csv()
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("No products found".to_owned()))?;

  let etag = compute_etag(csv.as_bytes());
  Ok(
    (
      [
        (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_owned()),
        (header::ETAG, etag),
      ],
      csv,
    )
      .into_response(),
  )
}

// ─── Upload ───────────────────────────────────────────────────────────────────

/// `POST /products` — body is the whole catalog as CSV text.
pub async fn upload<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<Value>, ApiError>
where
  S: QuoteStore,
{
  let text = decode_body(&body);
  let content = text.trim();
  if content.is_empty() {
    return Err(ApiError::BadRequest("Empty CSV content received".to_owned()));
  }

  let rows = parse_rows(content)?;
  let Some(first) = rows.first() else {
    return Err(ApiError::BadRequest("No data in CSV content".to_owned()));
  };

  let header: Vec<String> = first.iter().map(|c| c.trim().to_owned()).collect();
  let missing = product::missing_columns(&header);
  if !missing.is_empty() {
    tracing::warn!(?missing, "rejected catalog upload");
    let mut details = Map::new();
    details.insert("details".to_owned(), json!(format!("Missing columns: {missing:?}")));
    details.insert("received_header".to_owned(), json!(header));
    return Err(ApiError::Rejected {
      message: "Invalid CSV format".to_owned(),
      details,
    });
  }

  let rows_processed = rows.len() - 1;
  store
    .replace_products(text.into_owned())
    .await
    .map_err(ApiError::store)?;
  tracing::info!(rows_processed, "product catalog updated");

  Ok(Json(json!({
    "message": "Products updated successfully",
    "rows_processed": rows_processed,
  })))
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Decode a request body as text, undoing a UTF-8 → Latin-1 round trip.
///
/// Some clients send UTF-8 bytes that an intermediary has already decoded as
/// Latin-1 and re-encoded, so `é` arrives as `Ã©`. If every char fits in one
/// byte and those bytes are valid UTF-8, that reading wins.
pub fn decode_body(body: &[u8]) -> Cow<'_, str> {
  let text = String::from_utf8_lossy(body);
  if text.is_ascii() {
    return text;
  }
  let narrowed: Option<Vec<u8>> = text
    .chars()
    .map(|c| u8::try_from(u32::from(c)).ok())
    .collect();
  match narrowed.map(String::from_utf8) {
    Some(Ok(repaired)) => Cow::Owned(repaired),
    _ => text,
  }
}

/// Parse every row of `content`, header included. Rows may differ in width
/// and `\` escapes a quote inside a quoted field.
pub fn parse_rows(content: &str) -> Result<Vec<StringRecord>, ApiError> {
  csv::ReaderBuilder::new()
    .has_headers(false)
    .flexible(true)
    .escape(Some(b'\\'))
    .from_reader(content.as_bytes())
    .records()
    .collect::<Result<Vec<_>, _>>()
    .map_err(|e| {
      let mut details = Map::new();
      details.insert("details".to_owned(), json!(e.to_string()));
      details.insert(
        "content_preview".to_owned(),
        json!(content.chars().take(PREVIEW_CHARS).collect::<String>()),
      );
      ApiError::Rejected {
        message: "CSV parsing error".to_owned(),
        details,
      }
    })
}
