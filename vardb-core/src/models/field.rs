use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::Serialize;

use crate::errors::UnknownFieldError;
use crate::models::VariantRecord;

///
/// The closed set of attributes on a [VariantRecord].
///
/// Every lookup by name goes through [Field::from_str] (identifiers) or
/// [Field::from_label] (public labels), so an unknown name is rejected once,
/// at the boundary, instead of deep inside a query.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Id,
    Chromosome,
    Position,
    ReferenceAllele,
    AlternateAllele,
    ClinicalSignificance,
    GeneInfo,
    VariantClass,
    SequenceOntology,
    DiseaseName,
    AltType,
    AltValue,
    NormalSequence,
    MutatedSequence,
    Category,
    Origin,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Field::Id,
        Field::Chromosome,
        Field::Position,
        Field::ReferenceAllele,
        Field::AlternateAllele,
        Field::ClinicalSignificance,
        Field::GeneInfo,
        Field::VariantClass,
        Field::SequenceOntology,
        Field::DiseaseName,
        Field::AltType,
        Field::AltValue,
        Field::NormalSequence,
        Field::MutatedSequence,
        Field::Category,
        Field::Origin,
    ];

    /// Fields exposed to callers under a human-readable label, in contract order.
    pub const LABELED: [Field; 9] = [
        Field::GeneInfo,
        Field::Chromosome,
        Field::Position,
        Field::AltType,
        Field::ReferenceAllele,
        Field::AlternateAllele,
        Field::ClinicalSignificance,
        Field::DiseaseName,
        Field::Category,
    ];

    pub fn identifier(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Chromosome => "chromosome",
            Field::Position => "position",
            Field::ReferenceAllele => "reference_allele",
            Field::AlternateAllele => "alternate_allele",
            Field::ClinicalSignificance => "clinical_significance",
            Field::GeneInfo => "gene_info",
            Field::VariantClass => "variant_class",
            Field::SequenceOntology => "sequence_ontology",
            Field::DiseaseName => "disease_name",
            Field::AltType => "alt_type",
            Field::AltValue => "alt_value",
            Field::NormalSequence => "normal_sequence",
            Field::MutatedSequence => "mutated_sequence",
            Field::Category => "category",
            Field::Origin => "origin",
        }
    }

    /// Column name in the seeding file.
    pub fn storage_name(&self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Chromosome => "CHROM",
            Field::Position => "POS",
            Field::ReferenceAllele => "REF",
            Field::AlternateAllele => "ALT",
            Field::ClinicalSignificance => "CLNSIG",
            Field::GeneInfo => "GENEINFO",
            Field::VariantClass => "CLNVC",
            Field::SequenceOntology => "CLNVCSO",
            Field::DiseaseName => "CLNDN",
            Field::AltType => "ALT_TYPE",
            Field::AltValue => "ALT_VALUE",
            Field::NormalSequence => "NormalSeq",
            Field::MutatedSequence => "MUTATED_SEQ",
            Field::Category => "Category",
            Field::Origin => "ORIGIN",
        }
    }

    ///
    /// Public label of the field, if it is part of the label mapping.
    ///
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Field::GeneInfo => Some("Gene Info"),
            Field::Chromosome => Some("Chromosome"),
            Field::Position => Some("Position"),
            Field::AltType => Some("Type"),
            Field::ReferenceAllele => Some("Reference"),
            Field::AlternateAllele => Some("Value"),
            Field::ClinicalSignificance => Some("Clinical Significance"),
            Field::DiseaseName => Some("Disease"),
            Field::Category => Some("Category"),
            _ => None,
        }
    }

    ///
    /// Key used for this field in serialized records: the public label when
    /// there is one, otherwise a fixed display name.
    ///
    pub fn display_name(&self) -> &'static str {
        if let Some(label) = self.label() {
            return label;
        }
        match self {
            Field::Id => "ID",
            Field::VariantClass => "Variant Class",
            Field::SequenceOntology => "Sequence Ontology",
            Field::AltValue => "Alt Value",
            Field::NormalSequence => "Normal Sequence",
            Field::MutatedSequence => "Mutated Sequence",
            Field::Origin => "Origin",
            _ => self.identifier(),
        }
    }

    pub fn from_label(label: &str) -> Result<Field, UnknownFieldError> {
        Field::LABELED
            .into_iter()
            .find(|f| f.label() == Some(label))
            .ok_or_else(|| UnknownFieldError(label.to_string()))
    }

    pub fn is_labeled(&self) -> bool {
        self.label().is_some()
    }

    ///
    /// Read this field off a record.
    ///
    /// Returns `None` when the record holds no value for the field.
    ///
    pub fn value(&self, record: &VariantRecord) -> Option<FieldValue> {
        match self {
            Field::Id => Some(FieldValue::Integer(record.id)),
            Field::Position => record.position.map(FieldValue::Integer),
            Field::Origin => record.origin.map(FieldValue::Float),
            _ => self.text(record).map(|s| FieldValue::Text(s.to_string())),
        }
    }

    ///
    /// Borrow a text field off a record without cloning it.
    ///
    /// Numeric fields always return `None` here; use [Field::value] for those.
    ///
    pub fn text<'a>(&self, record: &'a VariantRecord) -> Option<&'a str> {
        let text = match self {
            Field::Chromosome => &record.chromosome,
            Field::ReferenceAllele => &record.reference_allele,
            Field::AlternateAllele => &record.alternate_allele,
            Field::ClinicalSignificance => &record.clinical_significance,
            Field::GeneInfo => &record.gene_info,
            Field::VariantClass => &record.variant_class,
            Field::SequenceOntology => &record.sequence_ontology,
            Field::DiseaseName => &record.disease_name,
            Field::AltType => &record.alt_type,
            Field::AltValue => &record.alt_value,
            Field::NormalSequence => &record.normal_sequence,
            Field::MutatedSequence => &record.mutated_sequence,
            Field::Category => &record.category,
            Field::Id | Field::Position | Field::Origin => return None,
        };
        text.as_deref()
    }

    ///
    /// Parse a raw string into a value of this field's type.
    ///
    /// Returns `None` when the string is not a valid value for a numeric field.
    ///
    pub fn parse_value(&self, raw: &str) -> Option<FieldValue> {
        match self {
            Field::Id | Field::Position => raw.trim().parse::<u64>().ok().map(FieldValue::Integer),
            Field::Origin => raw.trim().parse::<f64>().ok().map(FieldValue::Float),
            _ => Some(FieldValue::Text(raw.to_string())),
        }
    }
}

impl FromStr for Field {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.identifier() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

///
/// A single typed cell of a [VariantRecord].
///
/// Values are totally ordered so they can be used as group keys: integers
/// compare numerically, floats by IEEE total order, text lexicographically.
/// Values of different kinds never share a field, but compare integer < float < text.
///
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Integer(_) => 0,
            FieldValue::Float(_) => 1,
            FieldValue::Text(_) => 2,
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            FieldValue::Integer(v) => v.hash(state),
            FieldValue::Float(v) => v.to_bits().hash(state),
            FieldValue::Text(v) => v.hash(state),
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Integer(value)
    }
}
