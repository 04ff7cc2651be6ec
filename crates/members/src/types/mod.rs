//! Result and error types for member operations.

/// Errors surfaced by the member service.
///
/// Store failures pass through unchanged from the database layer.
pub use adressbook_database::DatabaseError as MemberError;

pub type MemberResult<T> = Result<T, MemberError>;
