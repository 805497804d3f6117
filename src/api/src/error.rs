//! Error types for catalog queries.

use thiserror::Error;

/// Errors produced by the catalog query pipeline.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Requested sort field is not in the catalog's allow-list.
    #[error("order_by field incorrect")]
    InvalidOrderBy,

    /// Lookup by identifier matched no row.
    #[error("{0}")]
    NotFound(String),

    /// A row could not be decoded into a record.
    #[error("failed to decode row: {0}")]
    Mapping(#[source] rusqlite::Error),

    /// Query preparation, execution or row iteration failed.
    #[error("store error: {0}")]
    Store(#[source] rusqlite::Error),

    /// The shared connection lock was poisoned by a panicking holder.
    #[error("store connection is unavailable")]
    LockPoisoned,
}

impl CatalogError {
    /// Classify a rusqlite error raised while reading a row.
    ///
    /// Column conversion failures are mapping errors; anything else came
    /// from the store itself.
    pub fn from_row_error(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => CatalogError::Mapping(err),
            other => CatalogError::Store(other),
        }
    }

    /// Whether the error was caused by caller input rather than infrastructure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CatalogError::InvalidOrderBy | CatalogError::NotFound(_))
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        CatalogError::Store(err)
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
