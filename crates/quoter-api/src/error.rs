//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error renders as a JSON object with a `message` field; some carry
//! extra diagnostic fields alongside it.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  /// A 400 carrying structured diagnostics next to `message`.
  #[error("{message}")]
  Rejected {
    message: String,
    details: Map<String, Value>,
  },

  #[error("Server error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("Server error: {0}")]
  Archive(#[from] zip::result::ZipError),
}

impl ApiError {
  /// Box a backend error. Used as `.map_err(ApiError::store)`.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }
}

impl From<quoter_core::Error> for ApiError {
  fn from(e: quoter_core::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) | ApiError::Rejected { .. } => StatusCode::BAD_REQUEST,
      ApiError::Store(_) | ApiError::Archive(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }

    let message = self.to_string();
    let mut body = match self {
      ApiError::Rejected { details, .. } => details,
      _ => Map::new(),
    };
    body.insert("message".to_owned(), Value::String(message));
    (status, Json(Value::Object(body))).into_response()
  }
}
