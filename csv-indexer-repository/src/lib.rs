//! # CSV Indexer Repository
//!
//! This crate provides the search engine side of the CSV indexer: the
//! `SearchEngineClient` interface, its OpenSearch implementation, and the
//! `IndexLoader` that bulk-loads documents and recovers from field-count
//! overflows.

pub mod config;
pub mod errors;
pub mod field_limit;
pub mod index_loader;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use config::SearchClientConfig;
pub use errors::SearchIndexError;
pub use field_limit::{is_field_overflow_error, next_total_fields_limit, parse_total_fields_limit};
pub use index_loader::IndexLoader;
pub use interfaces::SearchEngineClient;
pub use opensearch::OpenSearchClient;
pub use types::{BulkAction, BulkOpType, BulkResponse};
