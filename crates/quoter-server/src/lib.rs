//! Server assembly for Quoter.
//!
//! Wraps the [`quoter_api`] router with the transport-level layers (request
//! tracing, body limit) and holds the runtime configuration.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, extract::DefaultBodyLimit};
use quoter_core::store::QuoteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `QUOTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub data_dir:   PathBuf,
  /// Maximum accepted request body, in bytes.
  pub body_limit: usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "0.0.0.0".to_string(),
      port:       5001,
      data_dir:   PathBuf::from("server_data"),
      body_limit: 8 * 1024 * 1024,
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete HTTP application for `store`.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: QuoteStore + 'static,
{
  quoter_api::api_router(store)
    .layer(DefaultBodyLimit::max(config.body_limit))
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  let Ok(home) = std::env::var("HOME") else {
    return path.to_path_buf();
  };
  if s == "~" {
    return PathBuf::from(home);
  }
  match s.strip_prefix("~/") {
    Some(rest) => PathBuf::from(home).join(rest),
    None => path.to_path_buf(),
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
