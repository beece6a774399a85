//! Query and aggregation layer over vardb variant records.
//!
//! This crate turns optional, per-request criteria into record predicates
//! and answers the questions transports ask of a variant table:
//!
//! - Paginated listing, single-column equality filtering and multi-criteria search
//! - Group counts by chromosome, variant type, clinical significance and top genes
//! - A category x disease cross tabulation
//! - Distinct values of any labeled field, and the public column map
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use vardb_core::models::VariantTable;
//! use vardb_query::{Dimension, FilterCriteria, QueryService};
//!
//! let table = VariantTable::try_from("variants.tsv.gz").unwrap();
//! let service = QueryService::new(Arc::new(table));
//!
//! let criteria = FilterCriteria {
//!     chromosome: vec!["17".to_string()],
//!     ..Default::default()
//! };
//! let request = service.page_request(Some(1), Some(50)).unwrap();
//! let page = service.advanced_search(&criteria, &request).unwrap();
//! println!("{} of {} records", page.items.len(), page.total_items);
//!
//! let genes = service.group_counts(Dimension::Gene, &criteria).unwrap();
//! ```

pub mod aggregate;
pub mod config;
pub mod criteria;
pub mod errors;
pub mod paginate;
pub mod serialize;
pub mod service;

// re-exports
pub use aggregate::{Aggregator, GroupCount, GroupCounts, GroupOrder};
pub use config::{PaginationConfig, VardbConfig};
pub use criteria::{Constraint, FilterCriteria, PositionRange, Predicate, RawCriteria};
pub use errors::{QueryError, QueryResult};
pub use paginate::{Page, PageRequest, paginate};
pub use serialize::{ColumnMap, DiseaseCounts, SerializedRecord};
pub use service::{Dimension, QueryService, Session};
