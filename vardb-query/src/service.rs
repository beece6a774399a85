//! The query service: the only entry point transports use.
//!
//! A [QueryService] is built once at startup around a shared store and
//! handed to whatever serves requests. Every operation opens its own
//! [Session], works on it, and returns owned results, so nothing borrowed
//! from the store outlives the call.

use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, error};

use vardb_core::models::{Field, FieldValue, VariantRecord};
use vardb_core::store::RecordStore;
use vardb_core::utils::canonical_chromosome_rank;

use crate::aggregate::{Aggregator, GroupCounts, GroupOrder};
use crate::config::PaginationConfig;
use crate::criteria::{Constraint, FilterCriteria, Predicate};
use crate::errors::{QueryError, QueryResult};
use crate::paginate::{Page, PageRequest, paginate};
use crate::serialize::{ColumnMap, DiseaseCounts, MISSING_KEY, SerializedRecord};

/// Number of groups returned by the top-gene count.
pub const TOP_GENES: usize = 10;

///
/// Dimensions available to [QueryService::group_counts].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Chromosome,
    AltType,
    ClinicalSignificance,
    /// Top genes by descending count.
    Gene,
}

impl Dimension {
    pub fn field(&self) -> Field {
        match self {
            Dimension::Chromosome => Field::Chromosome,
            Dimension::AltType => Field::AltType,
            Dimension::ClinicalSignificance => Field::ClinicalSignificance,
            Dimension::Gene => Field::GeneInfo,
        }
    }

    pub fn aggregator(&self) -> Aggregator {
        match self {
            Dimension::Gene => Aggregator::new(self.field())
                .order(GroupOrder::CountDesc)
                .limit(TOP_GENES),
            _ => Aggregator::new(self.field()),
        }
    }
}

impl FromStr for Dimension {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromosome" | "chromosomes" => Ok(Dimension::Chromosome),
            "alt_type" | "alt-type" => Ok(Dimension::AltType),
            "clinical_significance" | "clinical-significance" => {
                Ok(Dimension::ClinicalSignificance)
            }
            "gene_info" | "genes" => Ok(Dimension::Gene),
            _ => Err(QueryError::InvalidField(s.to_string())),
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field())
    }
}

///
/// Scoped store access for one operation. Released on drop, whichever way
/// the operation ends.
///
pub struct Session<'a> {
    operation: &'static str,
    records: &'a [VariantRecord],
    opened: Instant,
}

impl<'a> Session<'a> {
    pub fn acquire<S: RecordStore + ?Sized>(
        store: &'a S,
        operation: &'static str,
    ) -> QueryResult<Self> {
        debug!("{}: opening session on {}", operation, store.describe());
        let records = store.scan().map_err(|e| {
            error!("{}: storage failure on {}: {}", operation, store.describe(), e);
            QueryError::Storage(e)
        })?;

        Ok(Session {
            operation,
            records,
            opened: Instant::now(),
        })
    }

    pub fn records(&self) -> &[VariantRecord] {
        self.records
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        debug!(
            "{}: session released after {:?}",
            self.operation,
            self.opened.elapsed()
        );
    }
}

pub struct QueryService<S: RecordStore + ?Sized> {
    store: Arc<S>,
    pagination: PaginationConfig,
}

impl<S: RecordStore + ?Sized> Clone for QueryService<S> {
    fn clone(&self) -> Self {
        QueryService {
            store: Arc::clone(&self.store),
            pagination: self.pagination,
        }
    }
}

impl<S: RecordStore + ?Sized> QueryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        QueryService::with_pagination(store, PaginationConfig::default())
    }

    pub fn with_pagination(store: Arc<S>, pagination: PaginationConfig) -> Self {
        QueryService { store, pagination }
    }

    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }

    ///
    /// Build a page request from optional transport parameters: a missing
    /// page is 1, a missing size is the configured default, and sizes above
    /// the configured maximum are clamped.
    ///
    pub fn page_request(
        &self,
        page: Option<usize>,
        page_size: Option<usize>,
    ) -> QueryResult<PageRequest> {
        let request = PageRequest::new(
            page.unwrap_or(1),
            page_size.unwrap_or(self.pagination.default_page_size),
        )?;
        Ok(request.clamped(self.pagination.max_page_size))
    }

    fn session(&self, operation: &'static str) -> QueryResult<Session<'_>> {
        Session::acquire(self.store.as_ref(), operation)
    }

    fn page_of(
        &self,
        operation: &'static str,
        predicate: &Predicate,
        request: &PageRequest,
    ) -> QueryResult<Page<SerializedRecord>> {
        let session = self.session(operation)?;
        debug!(
            "{}: filtering on {:?}, page {} of size {}",
            operation,
            predicate
                .constraints()
                .iter()
                .map(Constraint::field)
                .collect::<Vec<_>>(),
            request.page(),
            request.page_size()
        );

        let page = paginate(predicate.filter(session.records()), request);
        Ok(page.map(SerializedRecord::from))
    }

    /// Every record, paginated in store order.
    pub fn list_all(&self, request: &PageRequest) -> QueryResult<Page<SerializedRecord>> {
        self.page_of("list_all", &Predicate::all(), request)
    }

    ///
    /// Records whose labeled column equals `value` exactly.
    ///
    /// `column_label` is a public label such as `"Chromosome"` or `"Gene Info"`.
    ///
    pub fn filter_by_column(
        &self,
        column_label: &str,
        value: &str,
        request: &PageRequest,
    ) -> QueryResult<Page<SerializedRecord>> {
        let field = Field::from_label(column_label)?;
        let value = field
            .parse_value(value)
            .ok_or_else(|| QueryError::invalid_value(column_label, value))?;

        let predicate = Predicate::all().and(Constraint::Equals { field, value });
        self.page_of("filter_by_column", &predicate, request)
    }

    ///
    /// Records matching every supplied criterion, paginated in store order.
    ///
    /// Position only filters when both bounds are given; a lone bound is ignored.
    ///
    pub fn advanced_search(
        &self,
        criteria: &FilterCriteria,
        request: &PageRequest,
    ) -> QueryResult<Page<SerializedRecord>> {
        self.page_of("advanced_search", &criteria.closed_range_predicate(), request)
    }

    pub fn group_counts(
        &self,
        dimension: Dimension,
        criteria: &FilterCriteria,
    ) -> QueryResult<GroupCounts> {
        let session = self.session("group_counts")?;
        let counts = dimension
            .aggregator()
            .aggregate(session.records(), &criteria.predicate());
        debug!("group_counts: {} groups by {}", counts.len(), dimension);
        Ok(counts)
    }

    ///
    /// Unfiltered category x disease-name cross tabulation.
    ///
    /// Missing values are tallied under [MISSING_KEY], together with any
    /// stored value that is literally `"null"`.
    ///
    pub fn disease_counts(&self) -> QueryResult<DiseaseCounts> {
        let session = self.session("disease_counts")?;

        let mut output = DiseaseCounts::new();
        for record in session.records() {
            let category = record.category.as_deref().unwrap_or(MISSING_KEY);
            let disease = record.disease_name.as_deref().unwrap_or(MISSING_KEY);
            *output
                .entry(category.to_string())
                .or_default()
                .entry(disease.to_string())
                .or_insert(0) += 1;
        }

        Ok(output)
    }

    ///
    /// Sorted distinct non-null values of one labeled field.
    ///
    /// Chromosomes are restricted to "1".."22" and "X" and come back in
    /// karyotype order; anything else in storage is dropped.
    ///
    pub fn distinct_values(&self, field: &str) -> QueryResult<Vec<FieldValue>> {
        let field = Field::from_str(field)?;
        if !field.is_labeled() {
            return Err(QueryError::InvalidField(field.identifier().to_string()));
        }

        let session = self.session("distinct_values")?;

        if field == Field::Chromosome {
            let chromosomes: BTreeSet<(u64, &str)> = session
                .records()
                .iter()
                .filter_map(|r| field.text(r))
                .filter_map(|c| canonical_chromosome_rank(c).map(|rank| (rank, c)))
                .collect();
            return Ok(chromosomes
                .into_iter()
                .map(|(_, c)| FieldValue::from(c))
                .collect());
        }

        let values: BTreeSet<FieldValue> = session
            .records()
            .iter()
            .filter_map(|r| field.value(r))
            .collect();
        Ok(values.into_iter().collect())
    }

    pub fn columns(&self) -> ColumnMap {
        ColumnMap
    }
}
