//! File names and the raw read/replace primitives.

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::{Error, Result};

pub const PRODUCTS_FILE: &str = "server_products.csv";
pub const PRICES_FILE: &str = "server_prices.json";
pub const STATUS_FILE: &str = "server_status.json";
pub const HISTORY_FILE: &str = "server_history.json";
pub const ANALYTICS_FILE: &str = "server_analytics.json";
pub const CATEGORIES_FILE: &str = "server_categories.json";

/// Every file the store may create, in backup order.
pub const DATA_FILES: [&str; 6] = [
  PRODUCTS_FILE,
  PRICES_FILE,
  STATUS_FILE,
  HISTORY_FILE,
  ANALYTICS_FILE,
  CATEGORIES_FILE,
];

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
  move |source| Error::Io { path: path.to_path_buf(), source }
}

/// Read a file's bytes. A missing file is `Ok(None)`.
pub(crate) async fn read_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
  match fs::read(path).await {
    Ok(bytes) => Ok(Some(bytes)),
    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
    Err(e) => Err(io_err(path)(e)),
  }
}

pub(crate) async fn read_json<T>(path: &Path, file: &'static str) -> Result<Option<T>>
where
  T: DeserializeOwned + Send,
{
  let Some(bytes) = read_bytes(path).await? else {
    return Ok(None);
  };
  serde_json::from_slice(&bytes)
    .map(Some)
    .map_err(|source| Error::Json { file, source })
}

/// Replace `path` with `bytes`: write a hidden sibling, then rename over.
pub(crate) async fn replace(path: &Path, bytes: &[u8]) -> Result<()> {
  let tmp = tmp_path(path);
  fs::write(&tmp, bytes).await.map_err(io_err(&tmp))?;
  fs::rename(&tmp, path).await.map_err(io_err(path))
}

pub(crate) async fn write_json<T>(path: &Path, file: &'static str, value: &T) -> Result<()>
where
  T: Serialize + Sync + ?Sized,
{
  let bytes = serde_json::to_vec_pretty(value)
    .map_err(|source| Error::Json { file, source })?;
  replace(path, &bytes).await
}

fn tmp_path(path: &Path) -> PathBuf {
  let name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  path.with_file_name(format!(".{name}.tmp"))
}
