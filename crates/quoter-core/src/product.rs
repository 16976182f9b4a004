//! Product catalog header rules.
//!
//! The catalog itself is stored as the CSV text the client uploaded; only the
//! header row is inspected.

/// Columns every uploaded catalog must carry. `Category` is optional.
pub const REQUIRED_COLUMNS: [&str; 4] = ["ID", "Name", "Description", "Photo"];

/// Return the required columns absent from `header`, in canonical order.
/// Header cells are compared after trimming surrounding whitespace.
pub fn missing_columns<S: AsRef<str>>(header: &[S]) -> Vec<&'static str> {
  REQUIRED_COLUMNS
    .into_iter()
    .filter(|col| !header.iter().any(|h| h.as_ref().trim() == *col))
    .collect()
}
