use std::path::PathBuf;
use std::str::FromStr;

use crate::auth::password::CredentialScheme;
use crate::error::{AppError, AppResult};

/// Output format of the tracing subscriber installed by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "LOG_FORMAT must be 'pretty' or 'json', got '{other}'"
            ))),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory for the file-backed blob store. `None` keeps the user
    /// directory in memory only.
    pub data_dir: Option<PathBuf>,
    /// How newly registered passwords are stored.
    pub credential_scheme: CredentialScheme,
    pub min_password_length: usize,
    /// Load the demo projects, staff and stock at boot.
    pub seed_demo_data: bool,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            credential_scheme: CredentialScheme::Plaintext,
            min_password_length: 6,
            seed_demo_data: true,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var               | Default     |
    /// |-----------------------|-------------|
    /// | `FIBERTRACK_DATA_DIR` | unset       |
    /// | `CREDENTIAL_SCHEME`   | `plaintext` |
    /// | `MIN_PASSWORD_LENGTH` | `6`         |
    /// | `SEED_DEMO_DATA`      | `true`      |
    /// | `LOG_FORMAT`          | `pretty`    |
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let defaults = Self::default();

        let data_dir = lookup("FIBERTRACK_DATA_DIR")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let credential_scheme = match lookup("CREDENTIAL_SCHEME") {
            Some(v) => v.parse()?,
            None => defaults.credential_scheme,
        };

        let min_password_length = match lookup("MIN_PASSWORD_LENGTH") {
            Some(v) => v.trim().parse::<usize>().map_err(|_| {
                AppError::Config(format!(
                    "MIN_PASSWORD_LENGTH must be a non-negative integer, got '{v}'"
                ))
            })?,
            None => defaults.min_password_length,
        };

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(v) => parse_bool("SEED_DEMO_DATA", &v)?,
            None => defaults.seed_demo_data,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            data_dir,
            credential_scheme,
            min_password_length,
            seed_demo_data,
            log_format,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}
