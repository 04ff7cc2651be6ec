//! Adressbook Database Crate
//!
//! This crate provides database functionality for the adressbook backend,
//! including connection management, demo data seeding, and the member
//! repository implementations.

use adressbook_config::DatabaseConfig;
use tracing::info;

pub mod connection;
pub mod entities;
pub mod fixtures;
pub mod repos;
pub mod types;

pub use connection::{prepare_database, DatabaseConnection, DATABASE_NAME};
pub use fixtures::{demo_members, seed_demo_data};

pub use repos::{InMemoryMemberRepository, MemberRepository, MongoMemberRepository};

pub use entities::{
    parse_member_id, CreateMemberRequest, Member, MemberChanges, MemberFilter, NewMember,
    UpdateMemberRequest, COLLECTION_NAME,
};

pub use types::{errors::DatabaseError, DatabaseResult};

/// Re-export commonly used types for convenience
pub use mongodb::bson::oid::ObjectId;

/// Initialize the database, seeding demo data when configured
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<DatabaseConnection> {
    let connection = DatabaseConnection::from_config(config).await?;
    info!(
        collection = COLLECTION_NAME,
        seeded = config.seed_demo_data,
        "database initialized"
    );
    Ok(connection)
}
