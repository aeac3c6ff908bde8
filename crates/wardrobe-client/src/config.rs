use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::transport::TransportVersion;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown transport version: {0:?}")]
    UnknownTransportVersion(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub transport: TransportSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub cosmetics: CosmeticsSection,
}

#[derive(Debug, Deserialize)]
pub struct TransportSection {
    /// Host transport generation: "modern" or "legacy".
    #[serde(default = "default_transport_version")]
    pub version: String,
}

fn default_transport_version() -> String {
    "modern".into()
}

impl Default for TransportSection {
    fn default() -> Self {
        Self {
            version: default_transport_version(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CosmeticsSection {
    /// Log every applied outfit update at debug level.
    #[serde(default)]
    pub log_updates: bool,
}

impl ClientConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn transport_version(&self) -> Result<TransportVersion, ConfigError> {
        TransportVersion::parse(&self.transport.version)
            .ok_or_else(|| ConfigError::UnknownTransportVersion(self.transport.version.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let toml_str = r#"
            [transport]
            version = "legacy"

            [logging]
            level = "debug"

            [cosmetics]
            log_updates = true
        "#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.transport.version, "legacy");
        assert_eq!(
            config.transport_version().unwrap(),
            TransportVersion::Legacy
        );
        assert_eq!(config.logging.level, "debug");
        assert!(config.cosmetics.log_updates);
    }

    #[test]
    fn sections_default_when_absent() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.transport.version, "modern");
        assert_eq!(
            config.transport_version().unwrap(),
            TransportVersion::Modern
        );
        assert_eq!(config.logging.level, "info");
        assert!(!config.cosmetics.log_updates);
    }

    #[test]
    fn unknown_version_is_an_error() {
        let toml_str = r#"
            [transport]
            version = "v3"
        "#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.transport_version(),
            Err(ConfigError::UnknownTransportVersion(_))
        ));
    }
}
