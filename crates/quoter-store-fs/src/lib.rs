//! Flat-file backend for the Quoter store.
//!
//! Every collection lives in its own file under a single data directory: the
//! product catalog as CSV, everything else as pretty-printed JSON. Files are
//! replaced whole via a temporary sibling and a rename.

mod files;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use files::{
  ANALYTICS_FILE, CATEGORIES_FILE, DATA_FILES, HISTORY_FILE, PRICES_FILE,
  PRODUCTS_FILE, STATUS_FILE,
};
pub use store::FsStore;
