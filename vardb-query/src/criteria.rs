//! Filter composition.
//!
//! [FilterCriteria] is the typed, per-request set of optional constraints.
//! [Predicate] is what it composes into: a conjunction of [Constraint]s that
//! can be tested against any [VariantRecord].

use fxhash::FxHashSet;
use serde::Deserialize;

use vardb_core::models::{Field, FieldValue, VariantRecord};

use crate::errors::{QueryError, QueryResult};

///
/// Request parameters exactly as a transport receives them, before any typing.
///
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawCriteria {
    pub gene_info: Option<String>,
    pub position_start: Option<String>,
    pub position_stop: Option<String>,
    pub chromosome: Vec<String>,
    pub alt_type: Vec<String>,
    pub reference_allele: Vec<String>,
    pub alternate_allele: Vec<String>,
    pub clinical_significance: Vec<String>,
    pub disease_name: Vec<String>,
    pub category: Vec<String>,
}

///
/// Typed filter criteria. Every member is optional; an empty list or a
/// missing value puts no constraint on that field.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub gene_info: Option<String>,
    pub position_start: Option<u64>,
    pub position_stop: Option<u64>,
    pub chromosome: Vec<String>,
    pub alt_type: Vec<String>,
    pub reference_allele: Vec<String>,
    pub alternate_allele: Vec<String>,
    pub clinical_significance: Vec<String>,
    pub disease_name: Vec<String>,
    pub category: Vec<String>,
}

fn parse_position(name: &str, raw: Option<&str>) -> QueryResult<Option<u64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|_| QueryError::invalid_value(name, value)),
    }
}

impl FilterCriteria {
    ///
    /// Type raw request parameters.
    ///
    /// Positions must be non-negative integers; a blank position is treated
    /// as absent. A blank gene-info search is dropped.
    ///
    pub fn from_raw(raw: &RawCriteria) -> QueryResult<Self> {
        Ok(FilterCriteria {
            gene_info: raw
                .gene_info
                .as_deref()
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string),
            position_start: parse_position("position_start", raw.position_start.as_deref())?,
            position_stop: parse_position("position_stop", raw.position_stop.as_deref())?,
            chromosome: raw.chromosome.clone(),
            alt_type: raw.alt_type.clone(),
            reference_allele: raw.reference_allele.clone(),
            alternate_allele: raw.alternate_allele.clone(),
            clinical_significance: raw.clinical_significance.clone(),
            disease_name: raw.disease_name.clone(),
            category: raw.category.clone(),
        })
    }

    pub fn position_range(&self) -> Option<PositionRange> {
        PositionRange::from_bounds(self.position_start, self.position_stop)
    }

    /// Predicate with open-ended position bounds: a lone bound still filters.
    pub fn predicate(&self) -> Predicate {
        Predicate::from(self)
    }

    ///
    /// Predicate where position only constrains when both bounds are given.
    ///
    /// A lone `position_start` or `position_stop` is ignored. Record searches
    /// use this; group counts use [FilterCriteria::predicate].
    ///
    pub fn closed_range_predicate(&self) -> Predicate {
        self.compose(self.position_range().filter(PositionRange::is_closed))
    }

    fn compose(&self, range: Option<PositionRange>) -> Predicate {
        let mut predicate = Predicate::all();

        if let Some(gene) = self.gene_info.as_deref().filter(|g| !g.is_empty()) {
            predicate = predicate.and(Constraint::contains(Field::GeneInfo, gene));
        }

        if let Some(range) = range {
            predicate = predicate.and(Constraint::Range {
                field: Field::Position,
                range,
            });
        }

        for (field, values) in self.membership_sets() {
            if !values.is_empty() {
                predicate = predicate.and(Constraint::one_of(field, values));
            }
        }

        predicate
    }

    fn membership_sets(&self) -> [(Field, &Vec<String>); 7] {
        [
            (Field::Chromosome, &self.chromosome),
            (Field::AltType, &self.alt_type),
            (Field::ReferenceAllele, &self.reference_allele),
            (Field::AlternateAllele, &self.alternate_allele),
            (Field::ClinicalSignificance, &self.clinical_significance),
            (Field::DiseaseName, &self.disease_name),
            (Field::Category, &self.category),
        ]
    }
}

///
/// Position constraint. Both bounds give a closed range; a single bound is
/// open-ended on the other side.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionRange {
    Between(u64, u64),
    AtLeast(u64),
    AtMost(u64),
}

impl PositionRange {
    pub fn from_bounds(start: Option<u64>, stop: Option<u64>) -> Option<Self> {
        match (start, stop) {
            (Some(start), Some(stop)) => Some(PositionRange::Between(start, stop)),
            (Some(start), None) => Some(PositionRange::AtLeast(start)),
            (None, Some(stop)) => Some(PositionRange::AtMost(stop)),
            (None, None) => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, PositionRange::Between(..))
    }

    pub fn contains(&self, position: u64) -> bool {
        match *self {
            PositionRange::Between(start, stop) => start <= position && position <= stop,
            PositionRange::AtLeast(start) => position >= start,
            PositionRange::AtMost(stop) => position <= stop,
        }
    }
}

/// A single test against one field. A null field never satisfies it.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Case-insensitive substring match; `needle` is stored lower-cased.
    Contains { field: Field, needle: String },
    Range { field: Field, range: PositionRange },
    OneOf { field: Field, values: FxHashSet<String> },
    Equals { field: Field, value: FieldValue },
}

impl Constraint {
    pub fn contains(field: Field, needle: &str) -> Self {
        Constraint::Contains {
            field,
            needle: needle.to_lowercase(),
        }
    }

    pub fn one_of<'a, I: IntoIterator<Item = &'a String>>(field: Field, values: I) -> Self {
        Constraint::OneOf {
            field,
            values: values.into_iter().cloned().collect(),
        }
    }

    pub fn field(&self) -> Field {
        match self {
            Constraint::Contains { field, .. }
            | Constraint::Range { field, .. }
            | Constraint::OneOf { field, .. }
            | Constraint::Equals { field, .. } => *field,
        }
    }

    pub fn matches(&self, record: &VariantRecord) -> bool {
        match self {
            Constraint::Contains { field, needle } => field
                .text(record)
                .is_some_and(|text| text.to_lowercase().contains(needle.as_str())),
            Constraint::Range { field, range } => match field.value(record) {
                Some(FieldValue::Integer(v)) => range.contains(v),
                _ => false,
            },
            Constraint::OneOf { field, values } => field
                .text(record)
                .is_some_and(|text| values.contains(text)),
            Constraint::Equals {
                field,
                value: FieldValue::Text(expected),
            } => field.text(record) == Some(expected.as_str()),
            Constraint::Equals { field, value } => field.value(record).as_ref() == Some(value),
        }
    }
}

///
/// Conjunction of constraints. An empty predicate matches every record.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    constraints: Vec<Constraint>,
}

impl Predicate {
    pub fn all() -> Self {
        Predicate::default()
    }

    pub fn and(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn matches(&self, record: &VariantRecord) -> bool {
        self.constraints.iter().all(|c| c.matches(record))
    }

    pub fn filter<'a>(
        &'a self,
        records: &'a [VariantRecord],
    ) -> impl Iterator<Item = &'a VariantRecord> + 'a {
        records.iter().filter(move |r| self.matches(r))
    }
}

impl From<&FilterCriteria> for Predicate {
    fn from(criteria: &FilterCriteria) -> Self {
        criteria.compose(criteria.position_range())
    }
}
