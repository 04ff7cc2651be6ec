//! Database repository implementations

pub mod member_repository;
pub mod memory_repository;

pub use member_repository::*;
pub use memory_repository::*;
