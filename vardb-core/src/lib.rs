//! # vardb-core
//!
//! Core data model for vardb: a read-only table of clinical variant records.
//!
//! ## Main Components
//!
//! - **`VariantRecord`**: one row of the variant fact table (locus, alleles, clinical annotation)
//! - **`Field`**: the closed set of record attributes, with storage names and public labels
//! - **`VariantTable`**: an in-memory table seeded once from a (optionally gzipped) TSV file
//! - **`RecordStore`**: the read-only seam the query layer scans through
//! - **`classify`**: request validation and output labeling around a pluggable
//!   sequence classifier; library-only, the `vardb` binary does not expose it
//!
//! ## Example
//!
//! ```no_run
//! use vardb_core::models::VariantTable;
//! use vardb_core::store::RecordStore;
//!
//! let table = VariantTable::try_from("variants.tsv.gz").unwrap();
//! let records = table.scan().unwrap();
//! println!("{} variants loaded", records.len());
//! ```
//!
pub mod classify;
pub mod errors;
pub mod models;
pub mod store;
pub mod utils;

// re-exports
pub use errors::*;
pub use models::{Field, FieldValue, VariantRecord, VariantTable};
pub use store::RecordStore;
