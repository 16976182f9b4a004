//! [`FsStore`] — the flat-file implementation of [`QuoteStore`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use chrono::Local;
use serde_json::Value;
use tokio::{fs, sync::Mutex};

use quoter_core::{
  analytics,
  category::{self, Category},
  price::{PriceBook, PriceUpdates},
  quote::{self, QuoteDeletion, QuoteMap},
  store::{ExportedFile, QuoteStore},
};

use crate::{
  Error, Result,
  files::{
    ANALYTICS_FILE, CATEGORIES_FILE, DATA_FILES, HISTORY_FILE, PRICES_FILE,
    PRODUCTS_FILE, STATUS_FILE, read_bytes, read_json, replace, write_json,
  },
};

/// Timestamp format used for price history and `last_modified`.
pub(crate) const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Quoter store backed by files in one data directory.
///
/// Cloning is cheap. Clones share a write lock, so read-modify-write
/// sequences from concurrent requests in this process run one at a time.
#[derive(Clone)]
pub struct FsStore {
  root:  PathBuf,
  write: Arc<Mutex<()>>,
}

impl FsStore {
  /// Open a store rooted at `root`, creating the directory if needed.
  pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
    let root = root.as_ref().to_path_buf();
    fs::create_dir_all(&root)
      .await
      .map_err(|source| Error::Io { path: root.clone(), source })?;
    tracing::debug!(root = %root.display(), "opened data directory");
    Ok(Self { root, write: Arc::new(Mutex::new(())) })
  }

  pub fn root(&self) -> &Path { &self.root }

  fn path(&self, file: &str) -> PathBuf { self.root.join(file) }

  async fn load_list(&self, file: &'static str) -> Result<Vec<Value>> {
    Ok(read_json(&self.path(file), file).await?.unwrap_or_default())
  }

  async fn load_quotes(&self) -> Result<QuoteMap> {
    Ok(read_json(&self.path(STATUS_FILE), STATUS_FILE).await?.unwrap_or_default())
  }
}

fn stamp() -> String { Local::now().format(STAMP_FORMAT).to_string() }

// ─── QuoteStore impl ─────────────────────────────────────────────────────────

impl QuoteStore for FsStore {
  type Error = Error;

  // ── Products ──────────────────────────────────────────────────────────────

  async fn products_csv(&self) -> Result<Option<String>> {
    let Some(bytes) = read_bytes(&self.path(PRODUCTS_FILE)).await? else {
      return Ok(None);
    };
    String::from_utf8(bytes)
      .map(Some)
      .map_err(|_| Error::Utf8 { file: PRODUCTS_FILE })
  }

  async fn replace_products(&self, csv: String) -> Result<()> {
    let _guard = self.write.lock().await;
    replace(&self.path(PRODUCTS_FILE), csv.as_bytes()).await?;
    tracing::debug!(bytes = csv.len(), "replaced product catalog");
    Ok(())
  }

  // ── Prices ────────────────────────────────────────────────────────────────

  async fn prices(&self) -> Result<PriceBook> {
    let path = self.path(PRICES_FILE);
    if let Some(book) = read_json(&path, PRICES_FILE).await? {
      return Ok(book);
    }

    let _guard = self.write.lock().await;
    // Re-check under the lock; another request may have written meanwhile.
    if let Some(book) = read_json(&path, PRICES_FILE).await? {
      return Ok(book);
    }
    let book = PriceBook::default();
    write_json(&path, PRICES_FILE, &book).await?;
    tracing::debug!("initialised empty price book");
    Ok(book)
  }

  async fn stored_prices(&self) -> Result<Option<PriceBook>> {
    read_json(&self.path(PRICES_FILE), PRICES_FILE).await
  }

  async fn update_prices(&self, updates: PriceUpdates) -> Result<PriceBook> {
    let path = self.path(PRICES_FILE);
    let _guard = self.write.lock().await;

    let mut book: PriceBook = read_json(&path, PRICES_FILE).await?.unwrap_or_default();
    let submitted = updates.len();
    let changed = book.apply(updates, &stamp());
    write_json(&path, PRICES_FILE, &book).await?;

    tracing::debug!(submitted, changed, "merged price updates");
    Ok(book)
  }

  // ── Quotes ────────────────────────────────────────────────────────────────

  async fn quotes(&self) -> Result<QuoteMap> { self.load_quotes().await }

  async fn upsert_quotes(&self, quotes: QuoteMap) -> Result<QuoteMap> {
    let _guard = self.write.lock().await;
    let mut status = self.load_quotes().await?;
    status.extend(quotes);
    write_json(&self.path(STATUS_FILE), STATUS_FILE, &status).await?;
    Ok(status)
  }

  async fn delete_quote<'a>(&'a self, quote_id: &'a str) -> Result<Option<QuoteDeletion>> {
    let _guard = self.write.lock().await;

    let mut status = self.load_quotes().await?;
    let Some(quote) = status.remove(quote_id) else {
      return Ok(None);
    };
    write_json(&self.path(STATUS_FILE), STATUS_FILE, &status).await?;

    let mut history_removed = 0;
    let mut analytics_removed = 0;
    if let Some(date) = quote.date() {
      for (file, removed) in [
        (HISTORY_FILE, &mut history_removed),
        (ANALYTICS_FILE, &mut analytics_removed),
      ] {
        let mut entries = self.load_list(file).await?;
        *removed = quote::remove_dated(&mut entries, date);
        if *removed > 0 {
          write_json(&self.path(file), file, &entries).await?;
        }
      }
    }

    tracing::debug!(quote_id, history_removed, analytics_removed, "deleted quote");
    Ok(Some(QuoteDeletion {
      quote_id: quote_id.to_owned(),
      quote,
      history_removed,
      analytics_removed,
    }))
  }

  // ── History / analytics ───────────────────────────────────────────────────

  async fn history(&self) -> Result<Vec<Value>> { self.load_list(HISTORY_FILE).await }

  async fn replace_history(&self, entries: Vec<Value>) -> Result<()> {
    let _guard = self.write.lock().await;
    write_json(&self.path(HISTORY_FILE), HISTORY_FILE, &entries).await
  }

  async fn analytics(&self) -> Result<Vec<Value>> { self.load_list(ANALYTICS_FILE).await }

  async fn replace_analytics(&self, entries: Vec<Value>) -> Result<()> {
    analytics::validate(&entries)?;
    let _guard = self.write.lock().await;
    write_json(&self.path(ANALYTICS_FILE), ANALYTICS_FILE, &entries).await
  }

  // ── Categories ────────────────────────────────────────────────────────────

  async fn categories(&self) -> Result<Vec<Category>> {
    let path = self.path(CATEGORIES_FILE);
    if let Some(cats) = read_json(&path, CATEGORIES_FILE).await? {
      return Ok(cats);
    }

    let _guard = self.write.lock().await;
    if let Some(cats) = read_json(&path, CATEGORIES_FILE).await? {
      return Ok(cats);
    }
    let cats = category::defaults();
    write_json(&path, CATEGORIES_FILE, &cats).await?;
    tracing::info!(count = cats.len(), "seeded default categories");
    Ok(cats)
  }

  async fn replace_categories(&self, categories: Vec<Category>) -> Result<()> {
    let _guard = self.write.lock().await;
    write_json(&self.path(CATEGORIES_FILE), CATEGORIES_FILE, &categories).await
  }

  // ── Backup ────────────────────────────────────────────────────────────────

  async fn export_files(&self) -> Result<Vec<ExportedFile>> {
    let _guard = self.write.lock().await;
    let mut out = Vec::new();
    for file in DATA_FILES {
      if let Some(contents) = read_bytes(&self.path(file)).await? {
        out.push(ExportedFile { name: file.to_owned(), contents });
      }
    }
    Ok(out)
  }
}
