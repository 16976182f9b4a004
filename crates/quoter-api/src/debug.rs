//! Handler for `GET /debug` — a plain HTML dump of the catalog and prices.
//!
//! Meant for eyeballing the data directory from a browser; it is not styled
//! and not linked from anywhere.

use std::{fmt::Write as _, sync::Arc};

use axum::{extract::State, response::Html};
use csv::StringRecord;
use quoter_core::{
  price::PriceBook,
  product::REQUIRED_COLUMNS,
  store::QuoteStore,
};
use serde_json::Value;

use crate::{error::ApiError, products::parse_rows};

/// `GET /debug`
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<Html<String>, ApiError>
where
  S: QuoteStore,
{
  let rows = match store.products_csv().await.map_err(ApiError::store)? {
    Some(csv) => parse_rows(csv.trim())?,
    None => Vec::new(),
  };
  let prices = store
    .stored_prices()
    .await
    .map_err(ApiError::store)?
    .unwrap_or_default();
  Ok(Html(render(&rows, &prices)))
}

/// Render the page. `rows[0]`, when present, is the catalog header.
fn render(rows: &[StringRecord], prices: &PriceBook) -> String {
  let mut out = String::from(
    "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Quoter debug</title></head><body>\n",
  );

  let _ = writeln!(out, "<h1>Products ({})</h1>", rows.len().saturating_sub(1));
  out.push_str("<table border=\"1\">\n<tr>");
  for col in REQUIRED_COLUMNS.iter().chain(&["Price", "Changes"]) {
    let _ = write!(out, "<th>{col}</th>");
  }
  out.push_str("</tr>\n");

  if let Some((header, products)) = rows.split_first() {
    let positions: Vec<Option<usize>> = REQUIRED_COLUMNS
      .iter()
      .map(|col| header.iter().position(|h| h.trim() == *col))
      .collect();

    for row in products {
      out.push_str("<tr>");
      for pos in &positions {
        let cell = pos.and_then(|i| row.get(i)).unwrap_or("");
        let _ = write!(out, "<td>{}</td>", escape(cell));
      }
      let id = positions[0].and_then(|i| row.get(i)).unwrap_or("");
      match prices.get(id) {
        Some(rec) => {
          let _ = write!(out, "<td>{}</td><td>{}</td>", value_cell(&rec.price), rec.history.len());
        }
        None => out.push_str("<td></td><td></td>"),
      }
      out.push_str("</tr>\n");
    }
  }
  out.push_str("</table>\n");

  let _ = writeln!(out, "<h1>Prices ({})</h1>", prices.len());
  out.push_str(
    "<table border=\"1\">\n<tr><th>ID</th><th>Name</th><th>Price</th><th>Changes</th><th>Last modified</th></tr>\n",
  );
  for (id, rec) in &prices.0 {
    let _ = writeln!(
      out,
      "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
      escape(id),
      value_cell(&rec.name),
      value_cell(&rec.price),
      rec.history.len(),
      escape(rec.last_modified.as_deref().unwrap_or("")),
    );
  }
  out.push_str("</table>\n</body></html>\n");
  out
}

/// Strings render bare, anything else as its JSON text.
fn value_cell(value: &Value) -> String {
  match value {
    Value::String(s) => escape(s),
    other => escape(&other.to_string()),
  }
}

fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}
