//! CSV processor implementation.
//!
//! Turns the raw bytes of a CSV file into documents, one per data row.

use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use csv_indexer_shared::Document;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::errors::IngestError;

/// Field holding the collapsed overflow columns.
pub const EXTRA_COLUMNS_FIELD: &str = "extra_columns";

/// Default maximum number of top-level columns per document.
pub const DEFAULT_FIELD_LIMIT: usize = 1000;

/// What to do with columns beyond the field limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowStrategy {
    /// Nest the non-empty overflow values under `extra_columns`.
    #[default]
    Collapse,
    /// Drop the overflow columns.
    Prune,
}

impl OverflowStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collapse => "collapse",
            Self::Prune => "prune",
        }
    }
}

impl FromStr for OverflowStrategy {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "collapse" => Ok(Self::Collapse),
            "prune" => Ok(Self::Prune),
            other => Err(IngestError::config(format!(
                "Invalid CSV overflow strategy '{}', expected 'collapse' or 'prune'",
                other
            ))),
        }
    }
}

/// Options for the CSV processor.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Maximum number of header columns kept as top-level fields.
    pub field_limit: usize,
    /// Handling of the columns past `field_limit`.
    pub overflow_strategy: OverflowStrategy,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            field_limit: DEFAULT_FIELD_LIMIT,
            overflow_strategy: OverflowStrategy::default(),
        }
    }
}

/// Processor that transforms CSV content into search documents.
///
/// - The first row is the header; each following row becomes one document.
/// - Empty cells, and cells missing from short rows, become `null`.
/// - Cells beyond the header width are dropped.
/// - When a header name repeats, the later column wins.
/// - Headers wider than `field_limit` are collapsed or pruned.
#[derive(Debug, Clone, Default)]
pub struct CsvProcessor {
    options: CsvOptions,
}

impl CsvProcessor {
    /// Create a new CSV processor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new CSV processor with custom options.
    pub fn with_options(options: CsvOptions) -> Self {
        Self { options }
    }

    /// Parse CSV content into documents.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Document>)` - One document per data row, in file order
    /// * `Err(IngestError::ParseError)` - If the content is not valid UTF-8 CSV
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub fn process(&self, content: &[u8]) -> Result<Vec<Document>, IngestError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content);

        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let overflow_at = if header.len() > self.options.field_limit {
            warn!(
                columns = header.len(),
                limit = self.options.field_limit,
                strategy = self.options.overflow_strategy.as_str(),
                "CSV has more columns than the field limit"
            );
            if self.options.overflow_strategy == OverflowStrategy::Collapse
                && header[..self.options.field_limit]
                    .iter()
                    .any(|name| name == EXTRA_COLUMNS_FIELD)
            {
                warn!(
                    field = EXTRA_COLUMNS_FIELD,
                    "CSV column is overwritten by the collapsed overflow columns"
                );
            }
            Some(self.options.field_limit)
        } else {
            None
        };

        let mut documents = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| IngestError::parse(format!("row {}: {}", row + 1, e)))?;
            documents.push(self.row_to_document(&header, &record, overflow_at));
        }

        debug!(
            documents = documents.len(),
            columns = header.len(),
            "Processed CSV content"
        );
        Ok(documents)
    }

    fn row_to_document(
        &self,
        header: &[String],
        record: &StringRecord,
        overflow_at: Option<usize>,
    ) -> Document {
        let kept = overflow_at.unwrap_or(header.len());

        let mut doc: Document = header[..kept]
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), cell_value(record.get(i))))
            .collect();

        if overflow_at.is_some() && self.options.overflow_strategy == OverflowStrategy::Collapse {
            let extras: Map<String, Value> = header[kept..]
                .iter()
                .enumerate()
                .filter_map(|(offset, name)| match cell_value(record.get(kept + offset)) {
                    Value::Null => None,
                    value => Some((name.clone(), value)),
                })
                .collect();

            let extras = if extras.is_empty() {
                Value::Null
            } else {
                Value::Object(extras)
            };
            doc.insert(EXTRA_COLUMNS_FIELD.to_string(), extras);
        }

        doc
    }
}

fn cell_value(cell: Option<&str>) -> Value {
    match cell {
        Some(value) if !value.is_empty() => Value::String(value.to_string()),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn processor(field_limit: usize, overflow_strategy: OverflowStrategy) -> CsvProcessor {
        CsvProcessor::with_options(CsvOptions {
            field_limit,
            overflow_strategy,
        })
    }

    #[test]
    fn test_rows_become_documents() {
        let docs = CsvProcessor::new().process(b"a,b\n1,2\n3,4\n").unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(Value::Object(docs[0].clone()), json!({ "a": "1", "b": "2" }));
        assert_eq!(Value::Object(docs[1].clone()), json!({ "a": "3", "b": "4" }));
    }

    #[test]
    fn test_empty_cells_become_null() {
        let docs = CsvProcessor::new().process(b"a,b,c\n1,,3\n").unwrap();

        assert_eq!(Value::Object(docs[0].clone()), json!({ "a": "1", "b": null, "c": "3" }));
    }

    #[test]
    fn test_short_rows_fill_with_null() {
        let docs = CsvProcessor::new().process(b"a,b,c\n1\n").unwrap();

        assert_eq!(Value::Object(docs[0].clone()), json!({ "a": "1", "b": null, "c": null }));
    }

    #[test]
    fn test_long_rows_drop_unnamed_cells() {
        let docs = CsvProcessor::new().process(b"a,b\n1,2,3,4\n").unwrap();

        assert_eq!(Value::Object(docs[0].clone()), json!({ "a": "1", "b": "2" }));
    }

    #[test]
    fn test_quoted_values() {
        let docs = CsvProcessor::new()
            .process(b"name,notes\n\"Smith, J\",\"said \"\"hi\"\"\"\n")
            .unwrap();

        assert_eq!(docs[0]["name"], "Smith, J");
        assert_eq!(docs[0]["notes"], "said \"hi\"");
    }

    #[test]
    fn test_duplicate_header_keeps_last_column() {
        let docs = CsvProcessor::new().process(b"a,a\n1,2\n").unwrap();

        assert_eq!(docs[0].len(), 1);
        assert_eq!(docs[0]["a"], "2");
    }

    #[test]
    fn test_header_only_yields_no_documents() {
        assert!(CsvProcessor::new().process(b"a,b\n").unwrap().is_empty());
        assert!(CsvProcessor::new().process(b"").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let result = CsvProcessor::new().process(b"a,b\n\xff\xfe,2\n");
        assert!(matches!(result, Err(IngestError::ParseError(_))));
    }

    #[test]
    fn test_collapse_overflow_columns() {
        let docs = processor(2, OverflowStrategy::Collapse)
            .process(b"a,b,c,d\n1,2,3,\n")
            .unwrap();

        assert_eq!(
            Value::Object(docs[0].clone()),
            json!({ "a": "1", "b": "2", "extra_columns": { "c": "3" } })
        );
    }

    #[test]
    fn test_collapse_with_all_extras_empty() {
        let docs = processor(2, OverflowStrategy::Collapse)
            .process(b"a,b,c,d\n1,2,,\n")
            .unwrap();

        assert_eq!(
            Value::Object(docs[0].clone()),
            json!({ "a": "1", "b": "2", "extra_columns": null })
        );
    }

    #[test]
    fn test_collapse_replaces_column_named_like_overflow_field() {
        let docs = processor(2, OverflowStrategy::Collapse)
            .process(b"a,extra_columns,c\n1,kept?,3\n")
            .unwrap();

        assert_eq!(
            Value::Object(docs[0].clone()),
            json!({ "a": "1", "extra_columns": { "c": "3" } })
        );
    }

    #[test]
    fn test_prune_keeps_column_named_like_overflow_field() {
        let docs = processor(2, OverflowStrategy::Prune)
            .process(b"a,extra_columns,c\n1,kept,3\n")
            .unwrap();

        assert_eq!(docs[0]["extra_columns"], "kept");
    }

    #[test]
    fn test_prune_overflow_columns() {
        let docs = processor(2, OverflowStrategy::Prune)
            .process(b"a,b,c,d\n1,2,3,4\n")
            .unwrap();

        assert_eq!(Value::Object(docs[0].clone()), json!({ "a": "1", "b": "2" }));
    }

    #[test]
    fn test_header_at_limit_is_untouched() {
        let docs = processor(2, OverflowStrategy::Collapse)
            .process(b"a,b\n1,2\n")
            .unwrap();

        assert!(!docs[0].contains_key(EXTRA_COLUMNS_FIELD));
    }

    #[test]
    fn test_overflow_strategy_from_str() {
        assert_eq!("collapse".parse::<OverflowStrategy>().unwrap(), OverflowStrategy::Collapse);
        assert_eq!(" PRUNE ".parse::<OverflowStrategy>().unwrap(), OverflowStrategy::Prune);
        assert!("drop".parse::<OverflowStrategy>().is_err());
    }
}
