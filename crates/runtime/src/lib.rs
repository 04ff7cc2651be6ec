use anyhow::{Context, Result};
use adressbook_config::AppConfig;
use adressbook_database::{initialize_database, DatabaseConnection};
use adressbook_members::MemberService;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub connection: DatabaseConnection,
    pub members: MemberService,
}

impl BackendServices {
    /// Connect to the store, seed demo data if configured, and build the services
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let connection = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let members = MemberService::new(&connection);
        info!("member service ready");

        Ok(Self {
            connection,
            members,
        })
    }
}
