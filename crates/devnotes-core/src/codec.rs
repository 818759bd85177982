//! Import/export of the snippet collection
//!
//! The portable document is a JSON array of snippet records, the same shape
//! as the persisted slot. Import is all-or-nothing: every record is parsed
//! into a full `Snippet` (synthesizing defaults for missing optional fields)
//! before anything is returned, and the first bad record aborts the whole
//! document.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::catalog::IMPORT_CATEGORY;
use crate::error::CodecError;
use crate::models::{dedup_tags, generate_id, Snippet};

/// Serialize the collection as a pretty-printed JSON array
pub fn export(snippets: &[Snippet]) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(snippets)?)
}

/// File name for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("devnotes-snippets-{}.json", date.format("%Y-%m-%d"))
}

/// Parse and normalize an import document
///
/// Duplicate ids are not filtered here; that is the merge step's job
/// (`SnippetRepository::merge_imported`).
pub fn import(document: &str) -> Result<Vec<Snippet>, CodecError> {
    let root: Value = serde_json::from_str(document)
        .map_err(|e| CodecError::Format(format!("not valid JSON ({})", e)))?;

    let records = match root {
        Value::Array(records) => records,
        _ => {
            return Err(CodecError::Format(
                "expected an array of snippets".to_string(),
            ))
        }
    };

    let now = Utc::now();
    records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record, now))
        .collect()
}

fn parse_record(index: usize, record: &Value, now: DateTime<Utc>) -> Result<Snippet, CodecError> {
    let obj = record
        .as_object()
        .ok_or_else(|| CodecError::invalid(index, "expected an object"))?;

    let (title, code, language) = match (
        required(obj, "title"),
        required(obj, "code"),
        required(obj, "language"),
    ) {
        (Some(title), Some(code), Some(language)) => (title, code, language),
        _ => return Err(CodecError::invalid(index, "missing required fields")),
    };

    let id = optional_string(obj, "id", index)?
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_id);
    let category = optional_string(obj, "category", index)?
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| IMPORT_CATEGORY.to_string());
    let description = optional_string(obj, "description", index)?.unwrap_or_default();
    let tags = parse_tags(obj, index)?;
    let created_at = parse_timestamp(obj, "createdAt", index)?.unwrap_or(now);
    let updated_at = parse_timestamp(obj, "updatedAt", index)?.unwrap_or(now);

    Ok(Snippet {
        id,
        title: title.to_string(),
        description,
        code: code.to_string(),
        language: language.to_string(),
        category,
        tags,
        created_at,
        updated_at,
    })
}

/// A required field: a string with some non-whitespace content
fn required<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// An optional string field; absent and `null` both read as `None`
fn optional_string(
    obj: &Map<String, Value>,
    key: &str,
    index: usize,
) -> Result<Option<String>, CodecError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(CodecError::invalid(index, format!("'{}' must be a string", key))),
    }
}

fn parse_tags(obj: &Map<String, Value>, index: usize) -> Result<Vec<String>, CodecError> {
    let items = match obj.get("tags") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(CodecError::invalid(index, "'tags' must be a list")),
    };

    let tags = items
        .iter()
        .map(|tag| {
            tag.as_str()
                .map(str::to_string)
                .ok_or_else(|| CodecError::invalid(index, "'tags' must only contain strings"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(dedup_tags(tags))
}

/// Accepts RFC 3339 strings, bare `YYYY-MM-DD` dates and epoch milliseconds
fn parse_timestamp(
    obj: &Map<String, Value>,
    key: &str,
    index: usize,
) -> Result<Option<DateTime<Utc>>, CodecError> {
    let invalid = || CodecError::invalid(index, format!("'{}' is not a valid timestamp", key));

    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => {
            if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
                return Ok(Some(ts.with_timezone(&Utc)));
            }
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
            let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
            Ok(Some(Utc.from_utc_datetime(&midnight)))
        }
        Some(Value::Number(n)) => {
            let millis = n.as_i64().ok_or_else(invalid)?;
            Utc.timestamp_millis_opt(millis)
                .single()
                .map(Some)
                .ok_or_else(invalid)
        }
        Some(_) => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_snippets;
    use serde_json::json;

    fn import_value(value: Value) -> Result<Vec<Snippet>, CodecError> {
        import(&value.to_string())
    }

    #[test]
    fn test_export_is_array_with_iso_timestamps() {
        let doc = export(&sample_snippets()).unwrap();
        let value: Value = serde_json::from_str(&doc).unwrap();

        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["createdAt"], "2024-01-15T00:00:00Z");
        assert_eq!(records[0]["title"], "Fetch Wrapper");
        // Pretty printed
        assert!(doc.starts_with("[\n  {"));
    }

    #[test]
    fn test_export_empty() {
        assert_eq!(export(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "devnotes-snippets-2026-03-07.json");
    }

    #[test]
    fn test_export_then_import_roundtrip() {
        let original = sample_snippets();
        let imported = import(&export(&original).unwrap()).unwrap();
        assert_eq!(imported, original);
    }

    #[test]
    fn test_not_json_is_format_error() {
        let err = import("this is not json").unwrap_err();
        assert!(matches!(err, CodecError::Format(_)));
    }

    #[test]
    fn test_non_array_is_format_error() {
        let err = import_value(json!({"title": "x"})).unwrap_err();
        assert!(matches!(err, CodecError::Format(_)));
        assert!(err.to_string().contains("expected an array"));
    }

    #[test]
    fn test_empty_array_imports_nothing() {
        assert!(import("[]").unwrap().is_empty());
    }

    #[test]
    fn test_missing_required_field_aborts_everything() {
        let doc = json!([
            {"title": "Ok", "code": "a()", "language": "js"},
            {"code": "b()", "language": "js"},
            {"title": "Also ok", "code": "c()", "language": "js"}
        ]);
        match import_value(doc).unwrap_err() {
            CodecError::Validation { index, reason } => {
                assert_eq!(index, 1);
                assert_eq!(reason, "missing required fields");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_required_field_is_missing() {
        let doc = json!([{"title": "T", "code": "   ", "language": "js"}]);
        assert!(matches!(
            import_value(doc).unwrap_err(),
            CodecError::Validation { index: 0, .. }
        ));

        let doc = json!([{"title": "T", "code": "x", "language": ""}]);
        assert!(import_value(doc).is_err());
    }

    #[test]
    fn test_non_object_record() {
        let doc = json!([{"title": "T", "code": "x", "language": "js"}, 42]);
        assert!(matches!(
            import_value(doc).unwrap_err(),
            CodecError::Validation { index: 1, .. }
        ));
    }

    #[test]
    fn test_defaults_are_synthesized() {
        let before = Utc::now();
        let doc = json!([{"title": "Bare", "code": "x()", "language": "python"}]);
        let snippets = import_value(doc).unwrap();
        let s = &snippets[0];

        assert!(uuid::Uuid::parse_str(&s.id).is_ok());
        assert_eq!(s.category, "General");
        assert_eq!(s.description, "");
        assert!(s.tags.is_empty());
        assert!(s.created_at >= before);
        assert_eq!(s.created_at, s.updated_at);
    }

    #[test]
    fn test_null_and_empty_optionals_use_defaults() {
        let doc = json!([{
            "id": "",
            "title": "T",
            "code": "x",
            "language": "go",
            "category": null,
            "description": null,
            "tags": null,
            "createdAt": null
        }]);
        let s = &import_value(doc).unwrap()[0];
        assert!(!s.id.is_empty());
        assert_eq!(s.category, "General");
        assert!(s.tags.is_empty());
    }

    #[test]
    fn test_synthesized_ids_are_distinct() {
        let doc = json!([
            {"title": "A", "code": "a", "language": "js"},
            {"title": "B", "code": "b", "language": "js"}
        ]);
        let snippets = import_value(doc).unwrap();
        assert_ne!(snippets[0].id, snippets[1].id);
    }

    #[test]
    fn test_supplied_fields_are_kept() {
        let doc = json!([{
            "id": "abc",
            "title": "Query",
            "description": "select all",
            "code": "SELECT * FROM t;",
            "language": "sql",
            "category": "Database",
            "tags": ["sql", "sql", "read"],
            "createdAt": "2024-02-01T10:30:00.000Z",
            "updatedAt": "2024-02-03"
        }]);
        let s = &import_value(doc).unwrap()[0];

        assert_eq!(s.id, "abc");
        assert_eq!(s.category, "Database");
        assert_eq!(s.tags, vec!["sql", "read"]);
        assert_eq!(
            s.created_at,
            Utc.with_ymd_and_hms(2024, 2, 1, 10, 30, 0).unwrap()
        );
        assert_eq!(
            s.updated_at,
            Utc.with_ymd_and_hms(2024, 2, 3, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_epoch_millis_timestamp() {
        let doc = json!([{
            "title": "T", "code": "x", "language": "js",
            "createdAt": 1705276800000i64
        }]);
        let s = &import_value(doc).unwrap()[0];
        assert_eq!(
            s.created_at,
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_malformed_optional_fields_are_rejected() {
        let bad_tags = json!([{"title": "T", "code": "x", "language": "js", "tags": "a,b"}]);
        assert!(import_value(bad_tags).is_err());

        let bad_tag_item = json!([{"title": "T", "code": "x", "language": "js", "tags": ["a", 1]}]);
        assert!(import_value(bad_tag_item).is_err());

        let bad_id = json!([{"title": "T", "code": "x", "language": "js", "id": 7}]);
        assert!(import_value(bad_id).is_err());

        let bad_date =
            json!([{"title": "T", "code": "x", "language": "js", "createdAt": "yesterday"}]);
        match import_value(bad_date).unwrap_err() {
            CodecError::Validation { reason, .. } => assert!(reason.contains("createdAt")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
