//! Operational KPIs: open licensing and schema compliance.

use crate::record::InventoryRecord;

use super::percent;

/// Case-insensitive substrings that mark a license as open.
pub const DEFAULT_OPEN_LICENSE_MARKERS: &[&str] =
    &["cc-by", "cc0", "odc", "odbl", "pddl", "public domain", "open"];

#[derive(Debug, Clone, PartialEq)]
pub struct OperationalKpis {
    pub total_resources: usize,
    pub percent_open_license: f64,
    pub percent_schema_compliance: f64,
}

/// `markers` are compared lower-cased against the lower-cased license.
pub fn operational_kpis<S: AsRef<str>>(records: &[&InventoryRecord], markers: &[S]) -> OperationalKpis {
    let markers: Vec<String> = markers.iter().map(|m| m.as_ref().to_lowercase()).collect();
    let total = records.len();

    let open = records
        .iter()
        .filter(|r| r.license.as_deref().is_some_and(|l| is_open_license(l, &markers)))
        .count();
    let with_schema = records.iter().filter(|r| r.schema.is_some()).count();

    OperationalKpis {
        total_resources: total,
        percent_open_license: percent(open, total),
        percent_schema_compliance: percent(with_schema, total),
    }
}

fn is_open_license(license: &str, markers: &[String]) -> bool {
    let license = license.to_lowercase();
    markers.iter().any(|m| !m.is_empty() && license.contains(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn licensed(id: &str, license: Option<&str>, schema: bool) -> InventoryRecord {
        let mut r = InventoryRecord::new(id);
        r.license = license.map(String::from);
        r.schema = schema.then(|| "true".to_string());
        r
    }

    #[test]
    fn open_license_and_schema_shares() {
        let records = [
            licensed("a", Some("CC-BY 4.0"), true),
            licensed("b", Some("Open Government Licence"), false),
            licensed("c", Some("Proprietary"), true),
            licensed("d", None, false),
        ];
        let refs: Vec<_> = records.iter().collect();
        let k = operational_kpis(&refs, DEFAULT_OPEN_LICENSE_MARKERS);
        assert_eq!(k.percent_open_license, 50.0);
        assert_eq!(k.percent_schema_compliance, 50.0);
    }

    #[test]
    fn custom_markers() {
        let records = [licensed("a", Some("Proprietary"), false)];
        let refs: Vec<_> = records.iter().collect();
        let k = operational_kpis(&refs, &["PROPRIETARY"]);
        assert_eq!(k.percent_open_license, 100.0);
    }

    #[test]
    fn empty_input_is_zero() {
        let k = operational_kpis(&[], DEFAULT_OPEN_LICENSE_MARKERS);
        assert_eq!(k.percent_open_license, 0.0);
        assert_eq!(k.percent_schema_compliance, 0.0);
    }
}
