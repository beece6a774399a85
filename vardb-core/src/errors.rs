use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Can't read variant file: {0}")]
    FileReadError(String),

    #[error("Missing required column in header: {0}")]
    MissingColumn(String),

    #[error("Error parsing record on line {line}: {message}")]
    RecordParseError { line: u64, message: String },

    #[error("Duplicate variant ID {id} on line {line}")]
    DuplicateId { id: u64, line: u64 },

    #[error("Store is unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
#[error("Unknown field: '{0}'")]
pub struct UnknownFieldError(pub String);
