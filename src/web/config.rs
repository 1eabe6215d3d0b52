use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::refdata::ReferenceTables;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    /// Optional YAML file overriding the built-in reference tables.
    #[serde(default)]
    pub tables: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        WebConfig {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// The reference tables the server should run with.
    pub fn load_tables(&self) -> Result<ReferenceTables, ConfigError> {
        match &self.tables {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                Ok(serde_yaml::from_str(&content)?)
            }
            None => Ok(ReferenceTables::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert!(config.tables.is_none());
        assert_eq!(config.load_tables().unwrap().bands[0].name, "11m CB");
    }

    #[test]
    fn bind_override() {
        let config: Config = serde_yaml::from_str("web:\n  bind: 127.0.0.1:9000\n").unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:9000");
    }
}
