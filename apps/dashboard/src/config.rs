//! Console dashboard configuration.
//!
//! Settings come from environment variables with defaults; command-line
//! flags override both.

use std::env;

/// Console dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// SQLite database path (env: `BALCAO_DB`).
    pub database_path: String,

    /// Free-text query to run against purchases and suppliers.
    pub search: Option<String>,
}

impl DashboardConfig {
    /// Loads configuration from the environment, then applies flags.
    ///
    /// Recognized flags: `--db/-d <path>`, `--search/-s <query>`.
    pub fn load(args: &[String]) -> Result<Self, ConfigError> {
        let mut config = DashboardConfig {
            database_path: env::var("BALCAO_DB").unwrap_or_else(|_| "./balcao.db".to_string()),
            search: None,
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--db" | "-d" => {
                    config.database_path = next_value(&mut iter, "--db")?;
                }
                "--search" | "-s" => {
                    config.search = Some(next_value(&mut iter, "--search")?);
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        Ok(config)
    }
}

fn next_value(
    iter: &mut std::slice::Iter<'_, String>,
    flag: &str,
) -> Result<String, ConfigError> {
    match iter.next() {
        Some(value) => Ok(value.clone()),
        None => Err(ConfigError::MissingValue(flag.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown argument: {0} (try --help)")]
    UnknownArgument(String),
}
