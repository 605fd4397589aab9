use std::path::PathBuf;

use axum::http::HeaderValue;
use formrule_core::types::DEFAULT_LANGUAGE;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Language messages are rendered in when a request names none.
    pub default_language: String,
    /// Optional JSON message catalog with per-locale translations.
    pub message_catalog_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DEFAULT_LANGUAGE`     | `en-US`                    |
    /// | `MESSAGE_CATALOG_PATH` | unset                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");

        let port_raw = env_or("PORT", "3000");
        let port: u16 = port_raw.parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::InvalidVar {
                name: "PORT",
                value: port_raw.clone(),
                reason: e.to_string(),
            }
        })?;

        let cors_origins = parse_origins(&env_or("CORS_ORIGINS", "http://localhost:5173"))?;

        let timeout_raw = env_or("REQUEST_TIMEOUT_SECS", "30");
        let request_timeout_secs: u64 =
            timeout_raw
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidVar {
                    name: "REQUEST_TIMEOUT_SECS",
                    value: timeout_raw.clone(),
                    reason: e.to_string(),
                })?;

        let default_language = env_or("DEFAULT_LANGUAGE", DEFAULT_LANGUAGE);

        let message_catalog_path = std::env::var("MESSAGE_CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_language,
            message_catalog_path,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.into())
}

/// Parse a comma-separated origin list, skipping blank entries.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            origin.parse().map_err(|e: axum::http::header::InvalidHeaderValue| {
                ConfigError::InvalidVar {
                    name: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: e.to_string(),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_split_and_trimmed() {
        let origins = parse_origins("http://a.test, ,http://b.test ").unwrap();
        assert_eq!(origins, ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn invalid_origin_rejected() {
        let err = parse_origins("http://ok.test,bad\norigin").unwrap_err();
        assert!(err.to_string().starts_with("CORS_ORIGINS"));
    }
}
