//! Configuration management.
//!
//! Provides typed configuration loaded from environment variables with validation.

use std::collections::HashMap;
use std::path::Path;

/// Configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Validation settings
    pub validation: ValidationConfig,

    /// Duplicate execution settings
    pub dedupe: DedupeConfig,
}

/// Validation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Log every violation of a rejected submission
    pub log_violations: bool,
}

/// Duplicate execution configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeConfig {
    /// Whether executions with an already seen content key are skipped
    pub enabled: bool,

    /// Number of content keys remembered, oldest evicted first
    pub capacity: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            log_violations: true,
        }
    }
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 1024,
        }
    }
}

/// Configuration loading error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Configuration error for '{}': {}",
            self.field, self.message
        )
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from the environment and a `.env` file found in the
    /// current directory or its parents. Process variables take precedence.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match dotenvy::dotenv_iter() {
            Ok(iter) => read_env_file(iter, ".env")?,
            Err(_) => HashMap::new(),
        };
        Self::from_env_and(file)
    }

    /// Load configuration from the environment and the env file at `path`.
    /// Process variables take precedence.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let iter = dotenvy::from_path_iter(path).map_err(|e| ConfigError {
            field: path.display().to_string(),
            message: format!("Cannot read env file: {}", e),
        })?;
        let file = read_env_file(iter, &path.display().to_string())?;
        Self::from_env_and(file)
    }

    fn from_env_and(file: HashMap<String, String>) -> Result<Self, ConfigError> {
        log::debug!("Loaded {} variable(s) from env file", file.len());
        Self::from_lookup(|name| std::env::var(name).ok().or_else(|| file.get(name).cloned()))
    }

    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `TASK_PARAMS_LOG_VIOLATIONS`: Log violations of rejected submissions (default: 1)
    /// - `TASK_PARAMS_DEDUPE_ENABLED`: Skip already executed parameters (default: 1)
    /// - `TASK_PARAMS_DEDUPE_CAPACITY`: Content keys remembered (default: 1024)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let validation = ValidationConfig {
            log_violations: parse_or(&lookup, "TASK_PARAMS_LOG_VIOLATIONS", 1)? != 0,
        };

        let dedupe = DedupeConfig {
            enabled: parse_or(&lookup, "TASK_PARAMS_DEDUPE_ENABLED", 1)? != 0,
            capacity: parse_or(&lookup, "TASK_PARAMS_DEDUPE_CAPACITY", 1024)?,
        };

        let config = Self { validation, dedupe };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.dedupe.capacity == 0 {
            return Err(ConfigError {
                field: "TASK_PARAMS_DEDUPE_CAPACITY".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Read every entry of an env file without touching the process environment.
fn read_env_file<R: std::io::Read>(
    iter: dotenvy::Iter<R>,
    source: &str,
) -> Result<HashMap<String, String>, ConfigError> {
    iter.map(|entry| {
        entry.map_err(|e| ConfigError {
            field: source.to_string(),
            message: format!("Invalid env file: {}", e),
        })
    })
    .collect()
}

/// Parse a variable or return a default value.
fn parse_or<T, F>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(val) => val.trim().parse().map_err(|_| ConfigError {
            field: name.to_string(),
            message: format!("Invalid value '{}', expected a valid number", val),
        }),
        None => Ok(default),
    }
}
