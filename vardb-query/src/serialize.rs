//! Transport-ready shapes of query results.
//!
//! Records are keyed by display names, never storage column names.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use vardb_core::models::{Field, VariantRecord};

///
/// A variant record as callers see it: every field, keyed by its display
/// name, in [Field::ALL] order. Null fields serialize as `null`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedRecord(pub VariantRecord);

impl SerializedRecord {
    pub fn record(&self) -> &VariantRecord {
        &self.0
    }
}

impl From<&VariantRecord> for SerializedRecord {
    fn from(record: &VariantRecord) -> Self {
        SerializedRecord(record.clone())
    }
}

impl Serialize for SerializedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::ALL.len()))?;
        for field in Field::ALL {
            map.serialize_entry(field.display_name(), &field.value(&self.0))?;
        }
        map.end()
    }
}

///
/// The public field identifier -> label mapping, in contract order.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap;

impl ColumnMap {
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        Field::LABELED
            .into_iter()
            .filter_map(|f| f.label().map(|label| (f.identifier(), label)))
    }
}

impl Serialize for ColumnMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::LABELED.len()))?;
        for (identifier, label) in self.entries() {
            map.serialize_entry(identifier, label)?;
        }
        map.end()
    }
}

/// Key used for a missing category or disease name in [DiseaseCounts].
pub const MISSING_KEY: &str = "null";

///
/// Category -> disease name -> record count, both levels ordered by key.
///
/// JSON object keys cannot be null, so a missing category or disease name is
/// keyed as [MISSING_KEY]. A stored value spelled `"null"` lands in the same
/// bucket; the two are indistinguishable in this shape.
///
pub type DiseaseCounts = BTreeMap<String, BTreeMap<String, u64>>;

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_serialized_record_uses_display_names() {
        let record = VariantRecord {
            chromosome: Some("17".to_string()),
            position: Some(43045000),
            alternate_allele: Some("G".to_string()),
            alt_value: Some("G".to_string()),
            origin: Some(1.0),
            ..VariantRecord::new(1012)
        };
        let json = serde_json::to_value(SerializedRecord::from(&record)).unwrap();

        assert_eq!(json["ID"], serde_json::json!(1012));
        assert_eq!(json["Chromosome"], serde_json::json!("17"));
        assert_eq!(json["Position"], serde_json::json!(43045000));
        assert_eq!(json["Value"], serde_json::json!("G"));
        assert_eq!(json["Alt Value"], serde_json::json!("G"));
        assert_eq!(json["Origin"], serde_json::json!(1.0));
        assert_eq!(json["Gene Info"], serde_json::Value::Null);
        assert_eq!(json.as_object().unwrap().len(), 16);
        assert_eq!(json.get("CHROM"), None);
    }

    #[rstest]
    fn test_serialized_record_key_order() {
        let json = serde_json::to_string(&SerializedRecord(VariantRecord::new(1))).unwrap();
        let id_at = json.find("\"ID\"").unwrap();
        let chrom_at = json.find("\"Chromosome\"").unwrap();
        let origin_at = json.find("\"Origin\"").unwrap();
        assert!(id_at < chrom_at && chrom_at < origin_at);
    }

    #[rstest]
    fn test_column_map() {
        let entries: Vec<(&str, &str)> = ColumnMap.entries().collect();
        assert_eq!(
            entries,
            vec![
                ("gene_info", "Gene Info"),
                ("chromosome", "Chromosome"),
                ("position", "Position"),
                ("alt_type", "Type"),
                ("reference_allele", "Reference"),
                ("alternate_allele", "Value"),
                ("clinical_significance", "Clinical Significance"),
                ("disease_name", "Disease"),
                ("category", "Category"),
            ]
        );

        let json = serde_json::to_string(&ColumnMap).unwrap();
        assert_eq!(json.starts_with("{\"gene_info\":\"Gene Info\""), true);
    }
}
