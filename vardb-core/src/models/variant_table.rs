use std::collections::HashSet;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::{StoreError, StoreResult};
use crate::models::{Field, VariantRecord};
use crate::utils::get_dynamic_reader;

///
/// VariantTable struct, an in-memory, read-only table of variant records
/// seeded once from a tab-separated file.
///
#[derive(Clone, Debug, Default)]
pub struct VariantTable {
    pub records: Vec<VariantRecord>,
    pub path: Option<PathBuf>,
}

impl TryFrom<&Path> for VariantTable {
    type Error = StoreError;

    ///
    /// Create a new [VariantTable] from a TSV file (optionally gzipped).
    ///
    /// The first row must be a header of storage column names. Only `ID`
    /// is required; absent columns and empty cells load as null.
    ///
    /// # Arguments:
    /// - value: path to the variant file on disk.
    fn try_from(value: &Path) -> StoreResult<Self> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| StoreError::FileReadError(format!("{:#}", e)))?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let id_column = Field::Id.storage_name();
        if !csv_reader.headers()?.iter().any(|h| h == id_column) {
            return Err(StoreError::MissingColumn(id_column.to_string()));
        }

        let mut records: Vec<VariantRecord> = Vec::new();
        let mut seen: HashSet<u64> = HashSet::new();

        for (idx, row) in csv_reader.deserialize::<VariantRecord>().enumerate() {
            // header is line 1
            let line = idx as u64 + 2;
            let record = row.map_err(|err| StoreError::RecordParseError {
                line: err.position().map_or(line, |p| p.line()),
                message: err.to_string(),
            })?;

            if !seen.insert(record.id) {
                return Err(StoreError::DuplicateId {
                    id: record.id,
                    line,
                });
            }
            records.push(record);
        }

        info!(
            "Loaded {} variant records from {}",
            records.len(),
            value.display()
        );

        Ok(VariantTable {
            records,
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for VariantTable {
    type Error = StoreError;

    fn try_from(value: &str) -> StoreResult<Self> {
        VariantTable::try_from(Path::new(value))
    }
}

impl TryFrom<String> for VariantTable {
    type Error = StoreError;

    fn try_from(value: String) -> StoreResult<Self> {
        VariantTable::try_from(Path::new(&value))
    }
}

impl TryFrom<PathBuf> for VariantTable {
    type Error = StoreError;

    fn try_from(value: PathBuf) -> StoreResult<Self> {
        VariantTable::try_from(value.as_path())
    }
}

impl TryFrom<Vec<VariantRecord>> for VariantTable {
    type Error = StoreError;

    ///
    /// Build a table from records already in memory, checking ID uniqueness.
    ///
    fn try_from(records: Vec<VariantRecord>) -> StoreResult<Self> {
        let mut seen: HashSet<u64> = HashSet::new();
        for (idx, record) in records.iter().enumerate() {
            if !seen.insert(record.id) {
                return Err(StoreError::DuplicateId {
                    id: record.id,
                    line: idx as u64 + 1,
                });
            }
        }

        Ok(VariantTable {
            records,
            path: None,
        })
    }
}

impl VariantTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariantRecord> {
        self.records.iter()
    }
}

impl Display for VariantTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "VariantTable({} records, {})", self.len(), path.display()),
            None => write!(f, "VariantTable({} records)", self.len()),
        }
    }
}
