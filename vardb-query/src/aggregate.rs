//! Group-count aggregation over filtered records.

use fxhash::FxHashMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use vardb_core::models::{Field, FieldValue, VariantRecord};
use vardb_core::utils::compare_chromosomes;

use crate::criteria::Predicate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrder {
    /// Ascending group key, missing key first. Chromosomes use karyotype-then-store order.
    #[default]
    GroupKey,
    /// Descending count; equal counts keep group-key order.
    CountDesc,
}

/// One group: its key (null when the field was null) and its member count.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCount {
    pub key: Option<FieldValue>,
    pub count: u64,
}

///
/// Ordered aggregation result.
///
/// Serializes as a list of `{"<field>": key, "count": n}` objects.
///
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCounts {
    pub field: Field,
    pub groups: Vec<GroupCount>,
}

impl GroupCounts {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group keys in result order, with missing keys as `None`.
    pub fn keys(&self) -> Vec<Option<String>> {
        self.groups
            .iter()
            .map(|g| g.key.as_ref().map(|k| k.to_string()))
            .collect()
    }

    pub fn total(&self) -> u64 {
        self.groups.iter().map(|g| g.count).sum()
    }
}

struct GroupEntry<'a> {
    field: Field,
    group: &'a GroupCount,
}

impl Serialize for GroupEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.field.identifier(), &self.group.key)?;
        map.serialize_entry("count", &self.group.count)?;
        map.end()
    }
}

impl Serialize for GroupCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.groups.len()))?;
        for group in &self.groups {
            seq.serialize_element(&GroupEntry {
                field: self.field,
                group,
            })?;
        }
        seq.end()
    }
}

///
/// Groups records by one field and counts the members of each group.
///
/// Groups are ordered by key, except for [Field::Chromosome]: numeric labels
/// come first ascending by value, and every other label (or a missing one)
/// follows in the order its group first appears in the store.
///
#[derive(Debug, Clone)]
pub struct Aggregator {
    field: Field,
    order: GroupOrder,
    limit: Option<usize>,
}

impl Aggregator {
    pub fn new(field: Field) -> Self {
        Aggregator {
            field,
            order: GroupOrder::default(),
            limit: None,
        }
    }

    pub fn order(mut self, order: GroupOrder) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn aggregate(&self, records: &[VariantRecord], predicate: &Predicate) -> GroupCounts {
        // key -> (first appearance in scan order, count)
        let mut counts: FxHashMap<Option<FieldValue>, (usize, u64)> = FxHashMap::default();
        for (idx, record) in predicate.filter(records).enumerate() {
            counts.entry(self.field.value(record)).or_insert((idx, 0)).1 += 1;
        }

        let mut groups: Vec<(usize, GroupCount)> = counts
            .into_iter()
            .map(|(key, (first, count))| (first, GroupCount { key, count }))
            .collect();

        if self.field == Field::Chromosome {
            // numeric labels by value; everything else stays in store group order
            groups.sort_by_key(|(first, _)| *first);
            groups.sort_by(|(_, a), (_, b)| {
                compare_chromosomes(
                    a.key.as_ref().and_then(FieldValue::as_str),
                    b.key.as_ref().and_then(FieldValue::as_str),
                )
            });
        } else {
            groups.sort_by(|(_, a), (_, b)| a.key.cmp(&b.key));
        }

        let mut groups: Vec<GroupCount> = groups.into_iter().map(|(_, group)| group).collect();

        if self.order == GroupOrder::CountDesc {
            groups.sort_by(|a, b| b.count.cmp(&a.count));
        }

        if let Some(limit) = self.limit {
            groups.truncate(limit);
        }

        GroupCounts {
            field: self.field,
            groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::criteria::FilterCriteria;

    fn on_chromosome(id: u64, chrom: &str) -> VariantRecord {
        VariantRecord {
            chromosome: Some(chrom.to_string()),
            ..VariantRecord::new(id)
        }
    }

    fn with_gene(id: u64, gene: &str) -> VariantRecord {
        VariantRecord {
            gene_info: Some(gene.to_string()),
            ..VariantRecord::new(id)
        }
    }

    fn keys(counts: &GroupCounts) -> Vec<String> {
        counts
            .keys()
            .into_iter()
            .map(|k| k.unwrap_or_else(|| "<null>".to_string()))
            .collect()
    }

    #[rstest]
    fn test_chromosome_keys_sort_numerically() {
        let records = vec![
            on_chromosome(1, "2"),
            on_chromosome(2, "1"),
            on_chromosome(3, "X"),
            on_chromosome(4, "10"),
        ];
        let counts = Aggregator::new(Field::Chromosome).aggregate(&records, &Predicate::all());
        assert_eq!(keys(&counts), vec!["1", "2", "10", "X"]);
    }

    #[rstest]
    fn test_chromosome_counts_end_to_end() {
        let records = vec![
            on_chromosome(1, "1"),
            on_chromosome(2, "1"),
            on_chromosome(3, "2"),
            on_chromosome(4, "X"),
        ];
        let counts = Aggregator::new(Field::Chromosome).aggregate(&records, &Predicate::all());

        assert_eq!(
            counts.groups,
            vec![
                GroupCount { key: Some(FieldValue::from("1")), count: 2 },
                GroupCount { key: Some(FieldValue::from("2")), count: 1 },
                GroupCount { key: Some(FieldValue::from("X")), count: 1 },
            ]
        );
    }

    #[rstest]
    fn test_non_numeric_chromosomes_keep_store_order_after_numeric() {
        let records = vec![
            on_chromosome(1, "Y"),
            on_chromosome(2, "MT"),
            on_chromosome(3, "X"),
            on_chromosome(4, "3"),
            VariantRecord::new(5),
            on_chromosome(6, "MT"),
        ];
        let counts = Aggregator::new(Field::Chromosome).aggregate(&records, &Predicate::all());
        assert_eq!(keys(&counts), vec!["3", "Y", "MT", "X", "<null>"]);
        assert_eq!(counts.groups[2].count, 2);
    }

    #[rstest]
    fn test_store_order_is_taken_after_filtering() {
        let records = vec![
            on_chromosome(1, "Y"),
            on_chromosome(2, "X"),
            on_chromosome(3, "Y"),
            on_chromosome(4, "MT"),
        ];
        let criteria = FilterCriteria {
            chromosome: vec!["X".to_string(), "MT".to_string()],
            ..Default::default()
        };
        let counts =
            Aggregator::new(Field::Chromosome).aggregate(&records, &criteria.predicate());
        assert_eq!(keys(&counts), vec!["X", "MT"]);
    }

    #[rstest]
    fn test_default_order_is_group_key() {
        let records = vec![with_gene(1, "TP53"), with_gene(2, "BRCA1"), with_gene(3, "CFTR")];
        let counts = Aggregator::new(Field::GeneInfo).aggregate(&records, &Predicate::all());
        assert_eq!(keys(&counts), vec!["BRCA1", "CFTR", "TP53"]);
    }

    #[rstest]
    fn test_count_desc_with_limit() {
        let mut records = Vec::new();
        let mut id = 0;
        for (gene, n) in [("A", 1), ("B", 3), ("C", 2), ("D", 3), ("E", 1)] {
            for _ in 0..n {
                id += 1;
                records.push(with_gene(id, gene));
            }
        }

        let counts = Aggregator::new(Field::GeneInfo)
            .order(GroupOrder::CountDesc)
            .limit(3)
            .aggregate(&records, &Predicate::all());

        assert_eq!(keys(&counts), vec!["B", "D", "C"]);
        assert_eq!(
            counts.groups.iter().map(|g| g.count).collect::<Vec<_>>(),
            vec![3, 3, 2]
        );
    }

    #[rstest]
    fn test_predicate_is_applied_before_grouping() {
        let records = vec![
            on_chromosome(1, "1"),
            on_chromosome(2, "1"),
            on_chromosome(3, "2"),
        ];
        let criteria = FilterCriteria {
            chromosome: vec!["2".to_string()],
            ..Default::default()
        };
        let counts = Aggregator::new(Field::Chromosome).aggregate(&records, &criteria.predicate());
        assert_eq!(keys(&counts), vec!["2"]);
        assert_eq!(counts.total(), 1);
    }

    #[rstest]
    fn test_group_counts_serialize_with_field_name() {
        let records = vec![on_chromosome(1, "1"), VariantRecord::new(2)];
        let counts = Aggregator::new(Field::Chromosome).aggregate(&records, &Predicate::all());

        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"chromosome": "1", "count": 1},
                {"chromosome": null, "count": 1},
            ])
        );
    }
}
