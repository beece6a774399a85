//! Read-only record store seam.
//!
//! The query layer never touches a concrete table; it scans whatever
//! implements [RecordStore]. Records come back in store-native order, which
//! is the order pagination and tie-breaking rely on.

use crate::errors::StoreResult;
use crate::models::{VariantRecord, VariantTable};

pub trait RecordStore: Send + Sync {
    /// Short human-readable name, used in logs.
    fn describe(&self) -> String;

    /// Every record in store-native order.
    fn scan(&self) -> StoreResult<&[VariantRecord]>;
}

impl RecordStore for VariantTable {
    fn describe(&self) -> String {
        self.to_string()
    }

    fn scan(&self) -> StoreResult<&[VariantRecord]> {
        Ok(&self.records)
    }
}
