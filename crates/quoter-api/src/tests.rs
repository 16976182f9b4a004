//! Router tests against a real `FsStore` in a temporary data directory.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use quoter_store_fs::FsStore;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt as _;

use crate::api_router;

async fn make_store() -> (TempDir, Arc<FsStore>) {
  let dir = TempDir::new().unwrap();
  let store = FsStore::open(dir.path()).await.unwrap();
  (dir, Arc::new(store))
}

async fn send(
  store:   &Arc<FsStore>,
  method:  &str,
  uri:     &str,
  headers: Vec<(header::HeaderName, &str)>,
  body:    &str,
) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  for (k, v) in headers {
    builder = builder.header(k, v);
  }
  let req = builder.body(Body::from(body.to_string())).unwrap();
  api_router(store.clone()).oneshot(req).await.unwrap()
}

async fn body_text(resp: Response) -> String {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(resp: Response) -> Value {
  serde_json::from_str(&body_text(resp).await).unwrap()
}

const CATALOG: &str = "\"ID\",\"Name\",\"Description\",\"Photo\",\"Category\"\r\n\
\"P1\",\"Bolt\",\"M6, zinc\",\"bolt.png\",\"1\"\r\n\
\"P2\",\"Nut\",\"M6\",\"\",\"1\"\r\n";

// ── Products ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn products_get_before_upload_is_404() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "GET", "/products", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(body_json(resp).await["message"], "No products found");
}

#[tokio::test]
async fn products_upload_then_get_is_byte_equivalent() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "POST", "/products", vec![(header::CONTENT_TYPE, "text/csv")], CATALOG).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_json(resp).await;
  assert_eq!(body["rows_processed"], 2);
  assert_eq!(body["message"], "Products updated successfully");

  let resp = send(&store, "GET", "/products", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::OK);
  let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
  assert_eq!(ct, "text/csv; charset=utf-8");
  assert!(resp.headers().contains_key(header::ETAG));
  assert_eq!(body_text(resp).await, CATALOG);
}

#[tokio::test]
async fn products_missing_columns_are_listed() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "POST", "/products", vec![], "ID,Name\n1,Bolt\n").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body = body_json(resp).await;
  assert_eq!(body["message"], "Invalid CSV format");
  assert_eq!(body["details"], "Missing columns: [\"Description\", \"Photo\"]");
  assert_eq!(body["received_header"], json!(["ID", "Name"]));

  // Nothing was written.
  let resp = send(&store, "GET", "/products", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn products_empty_body_is_400() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "POST", "/products", vec![], "  \n ").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(body_json(resp).await["message"], "Empty CSV content received");
}

#[tokio::test]
async fn products_etag_tracks_the_stored_bytes() {
  let (_dir, store) = make_store().await;
  send(&store, "POST", "/products", vec![], CATALOG).await;
  let first = send(&store, "GET", "/products", vec![], "").await;
  let first = first.headers().get(header::ETAG).unwrap().to_str().unwrap().to_owned();
  assert_eq!(first, crate::etag::compute_etag(CATALOG.as_bytes()));

  // Conditional headers are not interpreted; the full body always comes back.
  let resp = send(&store, "GET", "/products", vec![(header::IF_NONE_MATCH, first.as_str())], "").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_text(resp).await, CATALOG);

  let replacement = "ID,Name,Description,Photo
P9,Washer,M6,
";
  let resp = send(&store, "POST", "/products", vec![(header::IF_MATCH, "\"stale\"")], replacement).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let resp = send(&store, "GET", "/products", vec![], "").await;
  assert_ne!(resp.headers().get(header::ETAG).unwrap().to_str().unwrap(), first);
  assert_eq!(body_text(resp).await, replacement);
}

// ── Prices ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn prices_start_empty() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "GET", "/prices", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp).await, json!({}));
}

#[tokio::test]
async fn prices_history_appends_only_on_change() {
  let (_dir, store) = make_store().await;
  let post = |price: f64| json!({ "P1": { "name": "Bolt", "price": price } }).to_string();

  for price in [1.5, 1.5, 2.0] {
    let resp = send(&store, "POST", "/prices", vec![], &post(price)).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  let book = body_json(send(&store, "GET", "/prices", vec![], "").await).await;
  let history = book["P1"]["history"].as_array().unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0]["price"], json!(2.0));
  assert_eq!(book["P1"]["price"], json!(2.0));
}

#[tokio::test]
async fn prices_keep_a_null_name() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "POST", "/prices", vec![], r#"{"P1":{"price":5,"name":null}}"#).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = send(&store, "GET", "/prices", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::OK);
  let book = body_json(resp).await;
  assert_eq!(book["P1"]["name"], Value::Null);
  assert_eq!(book["P1"]["price"], json!(5));

  let resp = send(&store, "GET", "/debug", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(body_text(resp).await.contains("<td>P1</td><td>null</td>"));
}

#[tokio::test]
async fn prices_empty_body_is_400() {
  let (_dir, store) = make_store().await;
  for body in ["", "{}"] {
    let resp = send(&store, "POST", "/prices", vec![], body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "No price data provided");
  }
}

#[tokio::test]
async fn malformed_json_is_400() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "POST", "/prices", vec![], "{\"P1\":").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Quotes ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_quote_prunes_same_date_entries() {
  let (_dir, store) = make_store().await;
  let status = json!({
    "Q1": { "date": "2024-06-01 12:00", "client": "ACME" },
    "Q2": { "date": "2024-06-02 12:00", "client": "Initech" },
  });
  let history = json!([
    { "date": "2024-06-01 12:00", "event": "created" },
    { "date": "2024-06-01 12:05", "event": "sent" },
    { "date": "2024-06-02 12:00", "event": "created" },
  ]);
  let analytics = json!([
    { "date": "2024-06-01 12:00", "total": 10 },
    { "date": "2024-06-02 12:00", "total": 20 },
  ]);
  assert_eq!(send(&store, "POST", "/status", vec![], &status.to_string()).await.status(), StatusCode::OK);
  assert_eq!(send(&store, "POST", "/history", vec![], &history.to_string()).await.status(), StatusCode::OK);
  assert_eq!(send(&store, "POST", "/analytics", vec![], &analytics.to_string()).await.status(), StatusCode::OK);

  let resp = send(&store, "DELETE", "/status/Q1", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_json(resp).await;
  assert_eq!(body["history_removed"], 1);
  assert_eq!(body["analytics_removed"], 1);

  let status = body_json(send(&store, "GET", "/status", vec![], "").await).await;
  assert_eq!(status, json!({ "Q2": { "date": "2024-06-02 12:00", "client": "Initech" } }));

  let history = body_json(send(&store, "GET", "/history", vec![], "").await).await;
  assert_eq!(history, json!([
    { "date": "2024-06-01 12:05", "event": "sent" },
    { "date": "2024-06-02 12:00", "event": "created" },
  ]));

  let analytics = body_json(send(&store, "GET", "/analytics", vec![], "").await).await;
  assert_eq!(analytics, json!([{ "date": "2024-06-02 12:00", "total": 20 }]));
}

#[tokio::test]
async fn delete_unknown_quote_is_404() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "DELETE", "/status/missing", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(body_json(resp).await["message"], "Quote missing not found");
}

#[tokio::test]
async fn status_requires_an_object() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "POST", "/status", vec![], "[1, 2]").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_analytics_is_400() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "POST", "/analytics", vec![], "[]").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(body_json(resp).await["message"], "Analytics data must be a non-empty list");
}

#[tokio::test]
async fn history_requires_a_list() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "POST", "/history", vec![], "{\"a\": 1}").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(body_json(resp).await["message"], "History data must be a list");
}

// ── Categories ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn categories_default_then_replace() {
  let (dir, store) = make_store().await;
  let body = body_json(send(&store, "GET", "/categories", vec![], "").await).await;
  assert_eq!(body[0], json!({ "id": 1, "name": "General" }));
  assert!(dir.path().join(quoter_store_fs::CATEGORIES_FILE).exists());

  let custom = json!([{ "id": "tools", "name": "Tools" }]);
  let resp = send(&store, "POST", "/categories", vec![], &custom.to_string()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_json(send(&store, "GET", "/categories", vec![], "").await).await;
  assert_eq!(body, custom);
}

#[tokio::test]
async fn categories_reject_bad_shape() {
  let (_dir, store) = make_store().await;
  let resp = send(&store, "POST", "/categories", vec![], "[{\"name\": \"no id\"}]").await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Operations ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_healthy() {
  let (_dir, store) = make_store().await;
  let body = body_json(send(&store, "GET", "/health", vec![], "").await).await;
  assert_eq!(body["status"], "healthy");
  assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn debug_page_lists_products() {
  let (_dir, store) = make_store().await;
  send(&store, "POST", "/products", vec![], CATALOG).await;
  let resp = send(&store, "GET", "/debug", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::OK);
  let html = body_text(resp).await;
  assert!(html.contains("<h1>Products (2)</h1>"), "{html}");
  assert!(html.contains("M6, zinc"));
}

#[tokio::test]
async fn debug_page_leaves_an_empty_directory_untouched() {
  let (dir, store) = make_store().await;
  let resp = send(&store, "GET", "/debug", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(body_text(resp).await.contains("<h1>Prices (0)</h1>"));
  assert!(!dir.path().join(quoter_store_fs::PRICES_FILE).exists());
}

#[tokio::test]
async fn backup_is_a_zip_attachment() {
  let (_dir, store) = make_store().await;
  send(&store, "POST", "/products", vec![], CATALOG).await;
  let resp = send(&store, "GET", "/backup", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/zip");
  let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
  assert!(disposition.starts_with("attachment;"), "{disposition}");
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn corrupt_file_is_500_with_message() {
  let (dir, store) = make_store().await;
  std::fs::write(dir.path().join(quoter_store_fs::PRICES_FILE), "not json").unwrap();
  let resp = send(&store, "GET", "/prices", vec![], "").await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  let msg = body_json(resp).await["message"].as_str().unwrap().to_owned();
  assert!(msg.starts_with("Server error:"), "{msg}");
}
