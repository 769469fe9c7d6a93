//! Processor module for the CSV indexer ingest.
//!
//! Transforms CSV content into search documents.

mod csv_processor;

pub use csv_processor::{
    CsvOptions, CsvProcessor, OverflowStrategy, DEFAULT_FIELD_LIMIT, EXTRA_COLUMNS_FIELD,
};
