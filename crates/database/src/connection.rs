//! Database connection management

use adressbook_config::DatabaseConfig;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::info;

use crate::fixtures::seed_demo_data;
use crate::repos::MongoMemberRepository;
use crate::types::{DatabaseError, DatabaseResult};

/// Default name of the logical database holding the address book
pub const DATABASE_NAME: &str = "adressbook";

/// Prepare and establish a database connection.
///
/// The driver connects lazily, so a `ping` is issued to surface an
/// unreachable server here rather than on the first query.
pub async fn prepare_database(config: &DatabaseConfig) -> DatabaseResult<DatabaseConnection> {
    let mut options = ClientOptions::parse(&config.url)
        .await
        .map_err(DatabaseError::ConnectionError)?;
    options.app_name = config.app_name.clone();

    let client = Client::with_options(options).map_err(DatabaseError::ConnectionError)?;
    let connection = DatabaseConnection::from_client_with_name(client, &config.name);
    connection.test_connection().await?;

    info!(database = %config.name, "database connection established");
    Ok(connection)
}

/// Open connection plus the handle of the logical database.
///
/// A value of this type only exists once a connection has been established,
/// and cloning it shares the underlying driver client.
#[derive(Clone, Debug)]
pub struct DatabaseConnection {
    client: Client,
    database: Database,
}

impl DatabaseConnection {
    /// Connect to `connection_url` and seed the demo members into an empty collection
    pub async fn init(connection_url: &str) -> DatabaseResult<Self> {
        let config = DatabaseConfig {
            url: connection_url.to_string(),
            ..DatabaseConfig::default()
        };
        Self::from_config(&config).await
    }

    /// Connect using `config`, seeding demo data when enabled
    pub async fn from_config(config: &DatabaseConfig) -> DatabaseResult<Self> {
        let connection = prepare_database(config).await?;
        if config.seed_demo_data {
            seed_demo_data(&connection.members()).await?;
        }
        Ok(connection)
    }

    /// Wrap an existing driver client
    pub fn from_client(client: Client) -> Self {
        Self::from_client_with_name(client, DATABASE_NAME)
    }

    /// Wrap an existing driver client, using the logical database `name`
    pub fn from_client_with_name(client: Client, name: &str) -> Self {
        let database = client.database(name);
        Self { client, database }
    }

    /// Get a reference to the logical database
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Repository bound to the member collection
    pub fn members(&self) -> MongoMemberRepository {
        MongoMemberRepository::new(&self.database)
    }

    /// Test the database connection
    pub async fn test_connection(&self) -> DatabaseResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(DatabaseError::ConnectionError)?;
        Ok(())
    }

    /// Close the connection, waiting for in-flight operations
    pub async fn close(self) {
        self.client.shutdown().await;
    }
}
