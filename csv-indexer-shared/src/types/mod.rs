//! Core data structures used across the CSV indexer.

pub mod bulk_result;
pub mod document;

pub use bulk_result::BulkResult;
pub use document::Document;
