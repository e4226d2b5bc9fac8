use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::constants::auth::{DEFAULT_SESSION_TTL_SECS, DEV_SESSION_SECRET};
use crate::constants::database::DEFAULT_DATABASE_URL;
use crate::constants::server::{DEFAULT_HOST, DEFAULT_PORT};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret the session cookies are signed with. Must be at least 32 bytes.
    pub session_secret: String,
    /// Session cookie lifetime in seconds
    pub session_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[cfg(feature = "mocks")]
    pub mock_mode: bool,
}

/// Log output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Machine-readable JSON (Bunyan format)
    Json,
    /// Human-readable text
    Text,
    /// JSON when stdout is not a TTY, text otherwise
    Auto,
}

impl LogFormat {
    /// Resolve `Auto` into a concrete format based on whether stdout is a TTY
    pub fn resolve(self) -> Self {
        match self {
            LogFormat::Auto => {
                if std::io::stdout().is_terminal() {
                    LogFormat::Text
                } else {
                    LogFormat::Json
                }
            }
            other => other,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        // these are just some sane defaults, most likely we will
        // have them overridden
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_format: LogFormat::Auto,
            auth: AuthConfig {
                session_secret: DEV_SESSION_SECRET.to_string(),
                session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                #[cfg(feature = "mocks")]
                mock_mode: true,
            },
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.auth.session_secret.len() >= crate::constants::auth::MIN_SESSION_SECRET_LEN);
        assert_eq!(config.log_format, LogFormat::Auto);
    }

    #[test]
    fn resolve_never_returns_auto() {
        assert_ne!(LogFormat::Auto.resolve(), LogFormat::Auto);
        assert_eq!(LogFormat::Json.resolve(), LogFormat::Json);
        assert_eq!(LogFormat::Text.resolve(), LogFormat::Text);
    }

    #[test]
    fn parses_partial_toml() {
        let parsed: Result<Config, _> = toml::from_str(
            r#"
            host = "0.0.0.0"
            port = 9000
            log_format = "json"

            [auth]
            session_secret = "0123456789abcdef0123456789abcdef"
            session_ttl_secs = 3600

            [database]
            url = "postgres://localhost/wallet"
            mock_mode = false
            "#,
        );
        let config = parsed.expect("config should parse");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.auth.session_ttl_secs, 3600);
    }
}
