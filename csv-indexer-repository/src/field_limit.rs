//! Helpers for the field-count overflow remediation.
//!
//! Search engines cap the number of distinct fields an index mapping may hold.
//! Wide CSV files routinely exceed the default ceiling. These functions detect
//! that failure from its message, read the current ceiling out of an index
//! settings response, and compute a raised ceiling.

use serde_json::Value;

/// Dotted name of the field-count ceiling setting.
pub const TOTAL_FIELDS_LIMIT_SETTING: &str = "index.mapping.total_fields.limit";

/// Ceiling assumed when none can be read from the settings.
pub const DEFAULT_TOTAL_FIELDS_LIMIT: u64 = 1000;

/// Smallest ceiling the remediation will ever apply.
const MIN_RAISED_LIMIT: u64 = 2000;

/// Minimum absolute growth of the ceiling.
const LIMIT_STEP: u64 = 1000;

/// Whether an error message describes a field-count overflow.
///
/// Matches on the engine's wording: the text contains `"Limit of total fields"`,
/// or contains both `"total fields"` and `"exceeded"`.
///
/// # Example
///
/// ```
/// use csv_indexer_repository::is_field_overflow_error;
///
/// assert!(is_field_overflow_error(
///     "Limit of total fields [1000] in index [records] has been exceeded"
/// ));
/// assert!(!is_field_overflow_error("total fields: 12"));
/// ```
pub fn is_field_overflow_error(text: &str) -> bool {
    text.contains("Limit of total fields")
        || (text.contains("total fields") && text.contains("exceeded"))
}

/// Read the current field-count ceiling of `index` from a settings response.
///
/// Lookups are tried in order:
///
/// 1. `settings[index].settings.index.mapping.total_fields.limit`
/// 2. the flat key `index.mapping.total_fields.limit`, at the top level or
///    under `settings[index].settings` (the `flat_settings` shape)
/// 3. the first integer found by a depth-first scan of the whole response
///
/// Lookups 1 and 2 accept integers and integer strings, since the settings
/// API returns values as strings. The scan only looks at JSON integers and
/// skips string values. It may return an unrelated number (e.g. a shard
/// count) when the response has no limit at all.
///
/// Returns `None` when no integer is present anywhere.
pub fn parse_total_fields_limit(settings: &Value, index: &str) -> Option<u64> {
    let index_settings = settings.get(index).and_then(|v| v.get("settings"));

    let nested = index_settings
        .and_then(|v| v.get("index"))
        .and_then(|v| v.get("mapping"))
        .and_then(|v| v.get("total_fields"))
        .and_then(|v| v.get("limit"))
        .and_then(as_limit);
    if nested.is_some() {
        return nested;
    }

    let flat = settings
        .get(TOTAL_FIELDS_LIMIT_SETTING)
        .or_else(|| index_settings.and_then(|v| v.get(TOTAL_FIELDS_LIMIT_SETTING)))
        .and_then(as_limit);
    if flat.is_some() {
        return flat;
    }

    find_first_integer(settings)
}

/// Compute the raised ceiling: `max(2 * current, current + 1000, 2000)`.
pub fn next_total_fields_limit(current: u64) -> u64 {
    current
        .saturating_mul(2)
        .max(current.saturating_add(LIMIT_STEP))
        .max(MIN_RAISED_LIMIT)
}

fn as_limit(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn find_first_integer(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::Object(map) => map.values().find_map(find_first_integer),
        Value::Array(items) => items.iter().find_map(find_first_integer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overflow_signature_full_message() {
        assert!(is_field_overflow_error(
            "Limit of total fields [1000] in index [records] has been exceeded"
        ));
        assert!(is_field_overflow_error("Limit of total fields exceeded"));
    }

    #[test]
    fn test_overflow_signature_needs_both_phrases() {
        assert!(is_field_overflow_error(
            "the number of total fields has exceeded the mapping ceiling"
        ));
        assert!(!is_field_overflow_error("index has 1200 total fields"));
        assert!(!is_field_overflow_error("request size exceeded"));
        assert!(!is_field_overflow_error("connection refused"));
        assert!(!is_field_overflow_error(""));
    }

    #[test]
    fn test_overflow_signature_is_case_sensitive() {
        assert!(!is_field_overflow_error("limit of total fields"));
    }

    #[test]
    fn test_next_limit_growth() {
        assert_eq!(next_total_fields_limit(0), 2000);
        assert_eq!(next_total_fields_limit(500), 2000);
        assert_eq!(next_total_fields_limit(1000), 2000);
        assert_eq!(next_total_fields_limit(5000), 10000);
    }

    #[test]
    fn test_next_limit_never_below_any_bound() {
        for current in [0u64, 1, 500, 999, 1000, 1001, 1500, 5000, 100_000] {
            let next = next_total_fields_limit(current);
            assert!(next >= current * 2);
            assert!(next >= current + 1000);
            assert!(next >= 2000);
        }
    }

    #[test]
    fn test_next_limit_saturates() {
        assert_eq!(next_total_fields_limit(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_parse_nested_settings() {
        let settings = json!({
            "records": {
                "settings": {
                    "index": {
                        "number_of_shards": "1",
                        "mapping": { "total_fields": { "limit": "1500" } }
                    }
                }
            }
        });
        assert_eq!(parse_total_fields_limit(&settings, "records"), Some(1500));
    }

    #[test]
    fn test_parse_nested_settings_integer_value() {
        let settings = json!({
            "records": {
                "settings": { "index": { "mapping": { "total_fields": { "limit": 3000 } } } }
            }
        });
        assert_eq!(parse_total_fields_limit(&settings, "records"), Some(3000));
    }

    #[test]
    fn test_parse_flat_settings() {
        let settings = json!({ "index.mapping.total_fields.limit": "2500" });
        assert_eq!(parse_total_fields_limit(&settings, "records"), Some(2500));
    }

    #[test]
    fn test_parse_flat_settings_under_index() {
        let settings = json!({
            "records": {
                "settings": {
                    "index.mapping.total_fields.limit": "4000",
                    "index.number_of_shards": "1"
                }
            }
        });
        assert_eq!(parse_total_fields_limit(&settings, "records"), Some(4000));
    }

    #[test]
    fn test_parse_falls_back_to_scan() {
        let settings = json!({
            "other": { "deeply": { "buried": { "value": 42 } } }
        });
        assert_eq!(parse_total_fields_limit(&settings, "records"), Some(42));
    }

    #[test]
    fn test_parse_scan_ignores_string_numbers() {
        let settings = json!({
            "records": { "settings": { "index": { "number_of_shards": "1" } } }
        });
        assert_eq!(parse_total_fields_limit(&settings, "records"), None);

        let settings = json!({ "other": { "index": { "number_of_shards": "3" } } });
        assert_eq!(parse_total_fields_limit(&settings, "records"), None);
    }

    #[test]
    fn test_parse_no_integer_anywhere() {
        let settings = json!({
            "records": { "settings": { "index": { "provided_name": "records" } } }
        });
        assert_eq!(parse_total_fields_limit(&settings, "records"), None);
        assert_eq!(parse_total_fields_limit(&json!({}), "records"), None);
    }

    #[test]
    fn test_parse_prefers_nested_over_flat() {
        let settings = json!({
            "index.mapping.total_fields.limit": "9000",
            "records": {
                "settings": { "index": { "mapping": { "total_fields": { "limit": "1200" } } } }
            }
        });
        assert_eq!(parse_total_fields_limit(&settings, "records"), Some(1200));
    }
}
