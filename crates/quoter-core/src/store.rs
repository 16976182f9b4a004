//! The `QuoteStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `quoter-store-fs`).
//! The HTTP layer (`quoter-api`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use serde_json::Value;

use crate::{
  category::Category,
  price::{PriceBook, PriceUpdates},
  quote::{QuoteDeletion, QuoteMap},
};

/// One persisted file, as handed to the backup exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
  pub name:     String,
  pub contents: Vec<u8>,
}

/// Abstraction over a Quoter storage backend.
///
/// Every write is a whole-document replace of one logical collection, except
/// [`update_prices`](QuoteStore::update_prices) (merge) and
/// [`delete_quote`](QuoteStore::delete_quote), which touches status, history
/// and analytics in turn with no atomicity across them.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait QuoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Products ──────────────────────────────────────────────────────────

  /// The stored catalog CSV, or `None` if none has been uploaded.
  fn products_csv(
    &self,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;

  /// Replace the catalog with `csv`, stored exactly as given.
  fn replace_products(
    &self,
    csv: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Prices ────────────────────────────────────────────────────────────

  /// The full price book. A backend with no price data yet persists and
  /// returns an empty book.
  fn prices(&self) -> impl Future<Output = Result<PriceBook, Self::Error>> + Send + '_;

  /// The price book if one has been persisted. Never writes.
  fn stored_prices(
    &self,
  ) -> impl Future<Output = Result<Option<PriceBook>, Self::Error>> + Send + '_;

  /// Merge `updates` into the price book (see [`PriceBook::apply`]) and
  /// return the result.
  fn update_prices(
    &self,
    updates: PriceUpdates,
  ) -> impl Future<Output = Result<PriceBook, Self::Error>> + Send + '_;

  // ── Quotes ────────────────────────────────────────────────────────────

  fn quotes(&self) -> impl Future<Output = Result<QuoteMap, Self::Error>> + Send + '_;

  /// Insert or replace each quote in `quotes` by ID; returns the new map.
  fn upsert_quotes(
    &self,
    quotes: QuoteMap,
  ) -> impl Future<Output = Result<QuoteMap, Self::Error>> + Send + '_;

  /// Remove a quote and the history/analytics entries sharing its `date`.
  /// Returns `None` if no quote has this ID.
  fn delete_quote<'a>(
    &'a self,
    quote_id: &'a str,
  ) -> impl Future<Output = Result<Option<QuoteDeletion>, Self::Error>> + Send + 'a;

  // ── History / analytics ───────────────────────────────────────────────

  fn history(&self) -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send + '_;

  fn replace_history(
    &self,
    entries: Vec<Value>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn analytics(&self) -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send + '_;

  /// Replace the analytics log. Implementations must reject an empty list.
  fn replace_analytics(
    &self,
    entries: Vec<Value>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Categories ────────────────────────────────────────────────────────

  /// The category list, seeded with [`crate::category::defaults`] when the
  /// backend has none.
  fn categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  fn replace_categories(
    &self,
    categories: Vec<Category>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Backup ────────────────────────────────────────────────────────────

  /// Every persisted file that currently exists, for bundling into a backup.
  fn export_files(
    &self,
  ) -> impl Future<Output = Result<Vec<ExportedFile>, Self::Error>> + Send + '_;
}
