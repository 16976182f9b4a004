//! Handler for `GET /backup` — every data file bundled into one zip.

use std::{
  io::{Cursor, Write as _},
  sync::Arc,
};

use axum::{
  extract::State,
  http::header,
  response::{IntoResponse, Response},
};
use chrono::Local;
use quoter_core::store::{ExportedFile, QuoteStore};
use zip::{CompressionMethod, ZipWriter, result::ZipResult, write::SimpleFileOptions};

use crate::error::ApiError;

/// `GET /backup`
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<Response, ApiError>
where
  S: QuoteStore,
{
  let files = store.export_files().await.map_err(ApiError::store)?;
  let archive = build_archive(&files)?;
  let filename = format!("quoter-backup-{}.zip", Local::now().format("%Y%m%d-%H%M"));
  tracing::info!(files = files.len(), bytes = archive.len(), "built backup archive");

  Ok(
    (
      [
        (header::CONTENT_TYPE, "application/zip".to_owned()),
        (
          header::CONTENT_DISPOSITION,
          format!("attachment; filename=\"{filename}\""),
        ),
      ],
      archive,
    )
      .into_response(),
  )
}

/// Write `files` into an in-memory, deflate-compressed zip.
pub fn build_archive(files: &[ExportedFile]) -> ZipResult<Vec<u8>> {
  let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
  let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
  for file in files {
    zip.start_file(file.name.as_str(), options)?;
    zip.write_all(&file.contents)?;
  }
  Ok(zip.finish()?.into_inner())
}
