//! ETag computation for the product catalog.
//!
//! The catalog is stored verbatim, so its ETag is simply the SHA-256 of the
//! stored bytes. Clients compare it between fetches to tell whether the
//! catalog changed.

use sha2::{Digest, Sha256};

/// Compute a quoted hex ETag over `bytes`.
pub fn compute_etag(bytes: &[u8]) -> String {
  format!("\"{}\"", hex::encode(Sha256::digest(bytes)))
}
