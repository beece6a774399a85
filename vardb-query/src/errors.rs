use thiserror::Error;

use vardb_core::errors::{StoreError, UnknownFieldError};

#[derive(Error, Debug)]
pub enum QueryError {
    /// Unknown column, label or dimension name.
    #[error("Column '{0}' does not exist.")]
    InvalidField(String),

    /// A value that does not fit the type of the field it targets.
    #[error("Invalid value for '{field}': '{value}'")]
    InvalidFilterValue { field: String, value: String },

    /// The store failed. Detail stays in the source and the logs, not the message.
    #[error("Database error occurred")]
    Storage(#[source] StoreError),
}

impl QueryError {
    pub fn invalid_value(field: impl Into<String>, value: impl ToString) -> Self {
        QueryError::InvalidFilterValue {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Client faults are the caller's to fix; anything else is ours.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidField(_) | QueryError::InvalidFilterValue { .. }
        )
    }
}

impl From<UnknownFieldError> for QueryError {
    fn from(err: UnknownFieldError) -> Self {
        QueryError::InvalidField(err.0)
    }
}

impl From<StoreError> for QueryError {
    fn from(err: StoreError) -> Self {
        QueryError::Storage(err)
    }
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;
