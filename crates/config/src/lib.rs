use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "adressbook.toml",
    "config/adressbook.toml",
    "crates/config/adressbook.toml",
    "../adressbook.toml",
    "../config/adressbook.toml",
    "../crates/config/adressbook.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

/// Connection settings for the document store.
///
/// ```
/// use adressbook_config::DatabaseConfig;
///
/// let database = DatabaseConfig::default();
/// assert_eq!(database.url, "mongodb://localhost:27017");
/// assert_eq!(database.name, "adressbook");
/// assert!(database.seed_demo_data);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "DatabaseConfig::default_name")]
    pub name: String,
    #[serde(default = "DatabaseConfig::default_app_name")]
    pub app_name: Option<String>,
    #[serde(default = "DatabaseConfig::default_seed_demo_data")]
    pub seed_demo_data: bool,
}

impl DatabaseConfig {
    fn default_name() -> String {
        "adressbook".to_string()
    }

    fn default_app_name() -> Option<String> {
        Some("adressbook".to_string())
    }

    const fn default_seed_demo_data() -> bool {
        true
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            name: Self::default_name(),
            app_name: Self::default_app_name(),
            seed_demo_data: Self::default_seed_demo_data(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use adressbook_config::load;
///
/// std::env::remove_var("ADRESSBOOK_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.database.url.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default("database.url", defaults.database.url.clone())
        .context("unable to register configuration defaults")?
        .set_default("database.name", defaults.database.name.clone())
        .context("unable to register configuration defaults")?
        .set_default("database.seed_demo_data", defaults.database.seed_demo_data)
        .context("unable to register configuration defaults")?;

    if let Some(app_name) = defaults.database.app_name.clone() {
        builder = builder
            .set_default("database.app_name", app_name)
            .context("unable to register configuration defaults")?;
    }

    let environment_overrides =
        config::Environment::with_prefix("ADRESSBOOK").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ADRESSBOOK_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ADRESSBOOK_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    if config.database.url.trim().is_empty() {
        anyhow::bail!("invalid configuration: database.url must not be empty");
    }
    if config.database.name.trim().is_empty() {
        anyhow::bail!("invalid configuration: database.name must not be empty");
    }

    debug!(?config, "loaded adressbook configuration");
    Ok(config)
}
