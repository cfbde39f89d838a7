use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const SETTINGS_FILE_NAME: &str = "settings.toml";

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
    /// Load the demo rows right after the schema is created
    pub seed_demo_data: bool,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Load settings from `settings.toml` (current directory or
    /// `picfeed-store/`), then the environment.
    pub fn new() -> Result<Self, ConfigError> {
        let candidates = [
            PathBuf::from(SETTINGS_FILE_NAME),
            PathBuf::from("picfeed-store").join(SETTINGS_FILE_NAME),
        ];
        let file = candidates.iter().find(|path| path.exists());
        Self::load(file.map(PathBuf::as_path))
    }

    /// Load settings from an explicit file (if any), then the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("database.path", "picfeed.db")?
            .set_default("database.seed_demo_data", false)?
            .set_default("log.filter", "picfeed_admin=info,picfeed_store=info")?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(false));
        }

        // Environment variables win over the file
        if let Ok(db_path) = std::env::var("DATABASE_PATH") {
            builder = builder.set_override("database.path", db_path)?;
        }
        if let Ok(seed) = std::env::var("SEED_DEMO_DATA") {
            builder = builder.set_override("database.seed_demo_data", seed)?;
        }

        builder.build()?.try_deserialize()
    }
}
