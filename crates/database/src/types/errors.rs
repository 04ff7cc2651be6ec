//! Error types for the database layer

use mongodb::bson::oid;
use thiserror::Error;

/// General database error
///
/// Driver errors are carried as the source unchanged; the only errors created
/// by this crate are id conversion failures.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(#[source] mongodb::error::Error),

    #[error("Invalid member id {id:?}: {source}")]
    InvalidId {
        id: String,
        #[source]
        source: oid::Error,
    },

    #[error("Database store error: {0}")]
    StoreError(#[from] mongodb::error::Error),

    #[error("Store assigned an unexpected document id: {0}")]
    UnexpectedId(String),
}

impl DatabaseError {
    /// Whether the caller supplied a malformed identifier
    pub fn is_invalid_id(&self) -> bool {
        matches!(self, Self::InvalidId { .. })
    }

    /// Whether startup failed because the store was unreachable
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}
