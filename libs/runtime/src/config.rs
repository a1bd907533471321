use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration: strongly-typed global sections with
/// defaults, overridden by an optional YAML file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub broker: BrokerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8087,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. "sqlite://convene.db?mode=rwc" or
    /// "sqlite::memory:".
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://convene.db?mode=rwc".to_string(),
        }
    }
}

/// Bounded fixed-backoff connect policy for the message broker.
/// Exhausting the budget aborts startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct BrokerConfig {
    pub connect_attempts: u32,
    pub connect_delay_secs: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            connect_attempts: 5,
            connect_delay_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is not set: "trace".."error" or "off".
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from a YAML file, or fall back to defaults when no path is
    /// given. A path that does not exist is an error, not a silent
    /// default.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .with_context(|| format!("failed to read config file {}", p.display()))?;
                serde_yaml::from_str(&raw)
                    .with_context(|| format!("failed to parse config file {}", p.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8087);
        assert_eq!(cfg.broker.connect_attempts, 5);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn partial_yaml_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 9000").unwrap();
        let cfg = AppConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.broker.connect_delay_secs, 5);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(AppConfig::load_or_default(Some(Path::new("/no/such/config.yaml"))).is_err());
    }
}
