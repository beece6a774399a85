pub mod field;
pub mod variant_record;
pub mod variant_table;

// re-export for cleaner imports
pub use self::field::{Field, FieldValue};
pub use self::variant_record::VariantRecord;
pub use self::variant_table::VariantTable;
