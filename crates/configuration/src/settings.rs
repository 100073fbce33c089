use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// The root configuration structure for the loader.
///
/// Every section is optional in the file; missing values fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Connection settings for the target PostgreSQL database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection string. The `--db-uri` flag and `DB_URI` variable take precedence.
    pub url: Option<String>,
    /// Statements run one at a time, so one connection is enough.
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// The load refuses to start while migrations in this directory are
    /// unapplied. Defaults to `migrations`; `None` turns the check off.
    pub migrations_dir: Option<PathBuf>,
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 1,
            acquire_timeout_secs: 5,
            migrations_dir: Some(PathBuf::from("migrations")),
        }
    }
}

/// Where the Pokédex CSV sources live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub csv_dir: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            csv_dir: PathBuf::from("pokedex/pokedex/data/csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, used when `RUST_LOG` is not set.
    pub level: String,
    /// If set, logs are also written to `directory/file_name`.
    pub directory: Option<PathBuf>,
    pub file_name: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_name: "pokedex-loader.log".to_string(),
        }
    }
}
