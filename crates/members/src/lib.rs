//! # Adressbook Members Crate
//!
//! Business logic for the member collection ("teilnehmer"): exact-match search,
//! create with empty-string defaults, read by id, partial update, and delete.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use adressbook_database::{DatabaseConnection, MemberFilter};
//! use adressbook_members::MemberService;
//!
//! # async fn example() -> Result<(), adressbook_members::MemberError> {
//! let connection = DatabaseConnection::init("mongodb://localhost:27017").await?;
//! let service = MemberService::new(&connection);
//! let scullys = service
//!     .search(&MemberFilter::default().with_last_name("Scully"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod services;
pub mod types;

pub use services::MemberService;
pub use types::{MemberError, MemberResult};

pub use adressbook_database::{CreateMemberRequest, Member, MemberFilter, UpdateMemberRequest};
