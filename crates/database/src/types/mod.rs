//! Shared types and result types for the database layer

pub mod errors;

pub use errors::DatabaseError;

pub type DatabaseResult<T> = Result<T, DatabaseError>;

// Re-export request types from entities
pub use crate::entities::{CreateMemberRequest, MemberChanges, MemberFilter, UpdateMemberRequest};
