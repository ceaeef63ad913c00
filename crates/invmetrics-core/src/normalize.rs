//! Record normalizer: raw JSON objects / CSV rows -> `InventoryRecord`.
//!
//! Both source formats go through the same fixed alias table. CSV rows are
//! handed in as objects whose values are all strings, so a CSV header and a
//! JSON key with the same name map to the same field.
//!
//! Nothing in here fails as a whole. A row without an id (or a JSON element
//! that is not an object) is skipped and counted; any other malformed value
//! is zero-filled (counters) or left unset (text, dates).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use crate::record::{InventoryRecord, UNKNOWN_FORMAT};

/// One raw inventory row, keyed by source field name.
pub type RawRow = Map<String, Value>;

/// Source field names per record field, in priority order. The first alias
/// holding a usable value wins.
pub mod aliases {
    pub const ID: &[&str] = &["id", "resource_id", "identifier"];
    pub const TYPE: &[&str] = &["type", "asset_type", "resource_kind"];
    pub const TITLE: &[&str] = &["title", "name", "resource_name", "dataset"];
    pub const DESCRIPTION: &[&str] = &["description", "notes"];
    pub const LICENSE: &[&str] = &["license", "rights", "license_title", "commoncore_license"];
    pub const CONTACT: &[&str] = &[
        "contact_point",
        "contact",
        "contact_point_email",
        "commoncore_contactemail",
    ];
    pub const FORMAT: &[&str] = &[
        "format",
        "resource_format",
        "media_type",
        "mediaType",
        "filetype",
        "file_type",
        "mimetype",
        "mime_type",
        "distribution_format",
        "commoncore_format",
    ];
    pub const PUBLISHER: &[&str] = &[
        "organization",
        "publisher",
        "owner_org",
        "commoncore_publisher",
        "owner",
    ];
    pub const CATEGORY: &[&str] = &["category", "theme", "topic", "commoncore_theme"];
    pub const SIZE_BYTES: &[&str] = &["size", "size_bytes", "file_size"];
    pub const CREATED_AT: &[&str] = &[
        "metadata_created",
        "created_at",
        "date_created",
        "creation_date",
        "commoncore_issued",
    ];
    pub const UPDATED_AT: &[&str] = &[
        "metadata_modified",
        "updated_at",
        "date_modified",
        "last_metadata_updated_date",
        "last_data_updated_date",
        "commoncore_lastupdate",
    ];
    pub const DOWNLOADS: &[&str] = &["download_count", "downloads", "view_count", "views"];
    pub const ACCESSES: &[&str] = &["accesses", "access_count", "visits"];
    pub const SCHEMA: &[&str] = &["schema", "has_schema", "fields"];
    pub const APPROVAL_STATUS: &[&str] = &["approval_status", "approvalstatus", "approval"];
    pub const AUDIENCE: &[&str] = &["audience", "visibility"];
}

/// Strings that mean "no schema" in flag-like columns.
const FALSY_LITERALS: &[&str] = &["false", "0", "no", "none", "null"];

/// Output of a normalization pass.
#[derive(Debug, Default)]
pub struct Normalized {
    pub records: Vec<InventoryRecord>,
    pub skipped: usize,
}

/// Normalize a sequence of raw rows, preserving input order.
pub fn normalize_rows<I>(rows: I) -> Normalized
where
    I: IntoIterator<Item = Value>,
{
    let mut out = Normalized::default();
    for (idx, row) in rows.into_iter().enumerate() {
        let record = match &row {
            Value::Object(map) => normalize_record(map),
            _ => None,
        };
        match record {
            Some(r) => out.records.push(r),
            None => {
                tracing::debug!(row = idx, "skipping inventory row without object shape or id");
                out.skipped += 1;
            }
        }
    }
    out
}

/// Normalize a single row. Returns `None` when the row has no usable id.
pub fn normalize_record(row: &RawRow) -> Option<InventoryRecord> {
    let id = first_text(row, aliases::ID)?;

    Some(InventoryRecord {
        id,
        kind: first_text(row, aliases::TYPE),
        title: first_text(row, aliases::TITLE),
        description: first_text(row, aliases::DESCRIPTION),
        license: first_text(row, aliases::LICENSE),
        contact: first_text(row, aliases::CONTACT),
        schema: first_with(row, aliases::SCHEMA, schema_of),
        format: first_with(row, aliases::FORMAT, format_of)
            .map(|f| f.to_lowercase())
            .unwrap_or_else(|| UNKNOWN_FORMAT.to_string()),
        publisher: first_text(row, aliases::PUBLISHER),
        category: first_text(row, aliases::CATEGORY),
        created_at: first_with(row, aliases::CREATED_AT, date_of),
        updated_at: first_with(row, aliases::UPDATED_AT, date_of),
        size_bytes: first_with(row, aliases::SIZE_BYTES, count_of).unwrap_or(0),
        downloads: first_with(row, aliases::DOWNLOADS, count_of).unwrap_or(0),
        accesses: first_with(row, aliases::ACCESSES, count_of).unwrap_or(0),
        approval_status: first_text(row, aliases::APPROVAL_STATUS).map(|s| s.to_lowercase()),
        audience: first_text(row, aliases::AUDIENCE).map(|s| s.to_lowercase()),
    })
}

fn first_with<T>(row: &RawRow, keys: &[&str], f: impl Fn(&Value) -> Option<T>) -> Option<T> {
    keys.iter().filter_map(|k| row.get(*k)).find_map(f)
}

fn first_text(row: &RawRow, keys: &[&str]) -> Option<String> {
    first_with(row, keys, text_of)
}

/// Textual value of a raw field, `None` when empty.
fn text_of(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Bool(false) | Value::Null => None,
        Value::Array(items) => items.iter().find_map(text_of),
        Value::Object(map) if map.is_empty() => None,
        Value::Object(_) => Some(v.to_string()),
    }
}

fn format_of(v: &Value) -> Option<String> {
    match v {
        Value::Object(map) => ["format", "name", "type"]
            .iter()
            .filter_map(|k| map.get(*k))
            .find_map(text_of),
        Value::Array(items) => items.iter().find_map(format_of),
        other => text_of(other),
    }
}

fn schema_of(v: &Value) -> Option<String> {
    text_of(v).filter(|s| !FALSY_LITERALS.iter().any(|f| s.eq_ignore_ascii_case(f)))
}

/// Non-negative integer coercion. Negative numbers clamp to zero; text that
/// is not numeric yields `None` so the next alias can be tried.
fn count_of(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Some(u)
            } else if n.as_i64().is_some() {
                Some(0)
            } else {
                n.as_f64().filter(|f| f.is_finite()).map(float_count)
            }
        }
        Value::String(s) => parse_count(s),
        _ => None,
    }
}

fn parse_count(s: &str) -> Option<u64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(u) = cleaned.parse::<u64>() {
        return Some(u);
    }
    if cleaned.parse::<i64>().is_ok() {
        return Some(0);
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(float_count)
}

fn float_count(f: f64) -> u64 {
    if f <= 0.0 {
        0
    } else {
        // saturating cast
        f.trunc() as u64
    }
}

fn date_of(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::String(s) => parse_datetime(s),
        Value::Number(n) => {
            if let Some(secs) = n.as_i64() {
                DateTime::from_timestamp(secs, 0)
            } else {
                let f = n.as_f64().filter(|f| f.is_finite())?;
                let secs = f.trunc();
                let nanos = ((f - secs) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
                DateTime::from_timestamp(secs as i64, nanos)
            }
        }
        _ => None,
    }
}

/// Parse the date shapes found in asset inventories. Naive values are UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn row(v: Value) -> RawRow {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn counts_accept_numbers_and_numeric_text() {
        assert_eq!(count_of(&json!(42)), Some(42));
        assert_eq!(count_of(&json!("1,024")), Some(1024));
        assert_eq!(count_of(&json!(" 7 ")), Some(7));
        assert_eq!(count_of(&json!(12.9)), Some(12));
        assert_eq!(count_of(&json!("3.5")), Some(3));
        assert_eq!(count_of(&json!(-4)), Some(0));
        assert_eq!(count_of(&json!("n/a")), None);
        assert_eq!(count_of(&json!("")), None);
        assert_eq!(count_of(&json!(true)), None);
    }

    #[test]
    fn dates_in_common_shapes() {
        let z = parse_datetime("2023-04-05T06:07:08Z").unwrap();
        assert_eq!((z.year(), z.month(), z.day(), z.hour()), (2023, 4, 5, 6));

        let off = parse_datetime("2023-04-05T06:07:08+02:00").unwrap();
        assert_eq!(off.hour(), 4);

        let naive = parse_datetime("2023-04-05T06:07:08.123456").unwrap();
        assert_eq!(naive.minute(), 7);

        let spaced = parse_datetime("2023-04-05 06:07:08").unwrap();
        assert_eq!(spaced.second(), 8);

        let day = parse_datetime("2023-04-05").unwrap();
        assert_eq!((day.month(), day.hour()), (4, 0));

        assert!(parse_datetime("05/04/2023").is_none());
        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn epoch_seconds_are_dates() {
        let d = date_of(&json!(1_700_000_000)).unwrap();
        assert_eq!(d.year(), 2023);
    }

    #[test]
    fn row_without_id_is_skipped() {
        assert!(normalize_record(&row(json!({ "title": "orphan" }))).is_none());
        assert!(normalize_record(&row(json!({ "id": "   " }))).is_none());
    }

    #[test]
    fn aliases_resolve_in_priority_order() {
        let r = normalize_record(&row(json!({
            "resource_id": "r-1",
            "name": "Fallback title",
            "notes": "Described",
            "license_title": "CC-BY 4.0",
            "owner_org": "city",
            "theme": ["", "transport"],
            "download_count": "oops",
            "downloads": 9,
            "metadata_modified": "2024-01-02",
        })))
        .unwrap();
        assert_eq!(r.id, "r-1");
        assert_eq!(r.title.as_deref(), Some("Fallback title"));
        assert_eq!(r.description.as_deref(), Some("Described"));
        assert_eq!(r.license.as_deref(), Some("CC-BY 4.0"));
        assert_eq!(r.publisher.as_deref(), Some("city"));
        assert_eq!(r.category.as_deref(), Some("transport"));
        assert_eq!(r.downloads, 9);
        assert!(r.updated_at.is_some());
    }

    #[test]
    fn views_count_once() {
        let r = normalize_record(&row(json!({ "id": "v", "views": 10 }))).unwrap();
        assert_eq!(r.downloads, 10);
        assert_eq!(r.accesses, 0);
        assert_eq!(r.score(), 10);

        let both = normalize_record(&row(json!({ "id": "w", "views": 10, "visits": 4 }))).unwrap();
        assert_eq!((both.downloads, both.accesses), (10, 4));
    }

    #[test]
    fn mixed_case_type_is_kept_and_still_filters() {
        let out = normalize_rows(vec![json!({
            "id": "a", "type": "Dataset", "approval_status": "Approved", "audience": "Public"
        })]);
        assert_eq!(out.records[0].kind.as_deref(), Some("Dataset"));
        let matched = crate::filter::filter_by_type(&out.records, Some("dataset")).unwrap();
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn format_is_lowercased_or_unknown() {
        let r = normalize_record(&row(json!({ "id": "a", "format": "CSV" }))).unwrap();
        assert_eq!(r.format, "csv");

        let r = normalize_record(&row(json!({ "id": "b", "media_type": { "name": "JSON" } }))).unwrap();
        assert_eq!(r.format, "json");

        let r = normalize_record(&row(json!({ "id": "c", "format": "" }))).unwrap();
        assert_eq!(r.format, UNKNOWN_FORMAT);
    }

    #[test]
    fn schema_flags() {
        let yes = normalize_record(&row(json!({ "id": "a", "has_schema": true }))).unwrap();
        assert!(yes.schema.is_some());

        let no = normalize_record(&row(json!({ "id": "b", "has_schema": "False" }))).unwrap();
        assert!(no.schema.is_none());

        let empty = normalize_record(&row(json!({ "id": "c", "fields": [] }))).unwrap();
        assert!(empty.schema.is_none());
    }

    #[test]
    fn eligibility_fields_are_lowercased() {
        let r = normalize_record(&row(json!({
            "id": "a", "approval_status": " Approved ", "audience": "PUBLIC"
        })))
        .unwrap();
        assert_eq!(r.approval_status.as_deref(), Some("approved"));
        assert_eq!(r.audience.as_deref(), Some("public"));
    }

    #[test]
    fn non_object_rows_are_counted_as_skipped() {
        let out = normalize_rows(vec![json!({ "id": "a" }), json!(3), json!({ "x": 1 })]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.skipped, 2);
    }
}
