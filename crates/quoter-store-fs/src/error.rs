//! Error type for `quoter-store-fs`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] quoter_core::Error),

  #[error("io error on {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error in {file}: {source}")]
  Json {
    file:   &'static str,
    #[source]
    source: serde_json::Error,
  },

  #[error("{file} is not valid UTF-8")]
  Utf8 { file: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
