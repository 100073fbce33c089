use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, DataSettings, DatabaseSettings, LoggingSettings};

const ENV_PREFIX: &str = "POKEDEX";

/// Loads the loader configuration.
///
/// Sources are layered in this order, later ones winning: built-in defaults,
/// the file at `path` (or an optional `config.toml` in the working directory
/// when no path is given), then `POKEDEX_<SECTION>__<KEY>` environment
/// variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    build_config(path, None)
}

fn build_config(
    path: Option<&Path>,
    env_override: Option<config::Map<String, String>>,
) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env_override),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be at least 1".to_string(),
        ));
    }
    if config.data.csv_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "data.csv_dir must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn no_env() -> Option<config::Map<String, String>> {
        Some(config::Map::new())
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let config = build_config(None, no_env()).unwrap();

        assert_eq!(config.database.url, None);
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.database.acquire_timeout_secs, 5);
        assert_eq!(config.database.migrations_dir, Some(PathBuf::from("migrations")));
        assert_eq!(config.data.csv_dir, PathBuf::from("pokedex/pokedex/data/csv"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[database]\nurl = \"postgres://localhost/dex\"\nmigrations_dir = \"db/migrations\"\n\n[data]\ncsv_dir = \"/srv/csv\""
        )
        .unwrap();

        let config = build_config(Some(file.path()), no_env()).unwrap();

        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/dex"));
        assert_eq!(config.database.migrations_dir, Some(PathBuf::from("db/migrations")));
        assert_eq!(config.data.csv_dir, PathBuf::from("/srv/csv"));
        assert_eq!(config.database.max_connections, 1);
    }

    #[test]
    fn environment_overrides_defaults() {
        let mut env = config::Map::new();
        env.insert("POKEDEX_DATABASE__MAX_CONNECTIONS".to_string(), "3".to_string());
        env.insert("POKEDEX_LOGGING__LEVEL".to_string(), "debug".to_string());

        let config = build_config(None, Some(env)).unwrap();

        assert_eq!(config.database.max_connections, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn zero_connections_is_rejected() {
        let mut env = config::Map::new();
        env.insert("POKEDEX_DATABASE__MAX_CONNECTIONS".to_string(), "0".to_string());

        let err = build_config(None, Some(env)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_csv_dir_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[data]\ncsv_dir = \"\"").unwrap();

        let err = build_config(Some(file.path()), no_env()).unwrap_err();
        match err {
            ConfigError::ValidationError(message) => assert!(message.contains("csv_dir")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = build_config(Some(Path::new("/nonexistent/pokedex.toml")), no_env()).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }
}
