//! Filter stage: type + approved + public selection.

use std::collections::BTreeSet;

use crate::error::{MetricsError, Result};
use crate::record::InventoryRecord;

pub const APPROVED: &str = "approved";
pub const PUBLIC: &str = "public";

/// Approved and publicly visible, regardless of type.
pub fn is_eligible(record: &InventoryRecord) -> bool {
    record.approval_status.as_deref() == Some(APPROVED) && record.audience.as_deref() == Some(PUBLIC)
}

/// Trimmed, non-empty `type` request value.
pub fn require_type(kind: Option<&str>) -> Result<&str> {
    kind.map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| MetricsError::Validation("type is required".into()))
}

/// Keep records whose type equals `kind` (ASCII case-insensitive) and that
/// are eligible.
///
/// The output borrows from `records` and preserves input order.
pub fn filter_by_type<'a>(
    records: &'a [InventoryRecord],
    kind: Option<&str>,
) -> Result<Vec<&'a InventoryRecord>> {
    let kind = require_type(kind)?;

    Ok(records
        .iter()
        .filter(|r| r.kind.as_deref().is_some_and(|k| k.eq_ignore_ascii_case(kind)) && is_eligible(r))
        .collect())
}

/// Sorted distinct types among eligible records.
pub fn available_types(records: &[InventoryRecord]) -> Vec<String> {
    records
        .iter()
        .filter(|r| is_eligible(r))
        .filter_map(|r| r.kind.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
