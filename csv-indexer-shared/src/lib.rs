//! # CSV Indexer Shared
//!
//! This crate defines the data structures shared across the CSV indexer crates:
//! the document shape produced from CSV rows and the outcome record returned
//! by a bulk load.

pub mod types;

pub use types::bulk_result::BulkResult;
pub use types::document::{document_from_pairs, Document};
