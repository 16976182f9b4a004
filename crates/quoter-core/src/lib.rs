//! Core types and trait definitions for the Quoter price-quotation store.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies. It
//! holds the record shapes persisted by a store, the pure mutation rules
//! (price merging, quote-delete correlation), and the [`store::QuoteStore`]
//! abstraction that the API layer is written against.

pub mod analytics;
pub mod category;
pub mod error;
pub mod price;
pub mod product;
pub mod quote;
pub mod store;

pub use error::{Error, Result};
