//! Configuration for the EPL prediction API.

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding `index.html` and other static files
    #[serde(default = "default_assets")]
    pub assets: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_assets() -> String {
    "static".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            assets: default_assets(),
        }
    }
}

/// Match dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the historical matches CSV
    #[serde(default = "default_data_path")]
    pub path: String,
    /// Only rows from this competition are used
    #[serde(default = "default_competition")]
    pub competition: String,
}

fn default_data_path() -> String {
    "matches (2).csv".to_string()
}

fn default_competition() -> String {
    "Premier League".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            competition: default_competition(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (EPL_DATA_PATH, EPL_SERVER_PORT, etc.)
            .add_source(
                config::Environment::with_prefix("EPL")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.assets, "static");
        assert_eq!(config.data.path, "matches (2).csv");
        assert_eq!(config.data.competition, "Premier League");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"data": {"path": "data/epl.csv"}}"#).unwrap();
        assert_eq!(config.data.path, "data/epl.csv");
        assert_eq!(config.data.competition, "Premier League");
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("EPL_DATA_PATH", "/tmp/epl matches.csv");
        std::env::set_var("EPL_SERVER_PORT", "9001");
        let config = AppConfig::load();
        std::env::remove_var("EPL_DATA_PATH");
        std::env::remove_var("EPL_SERVER_PORT");

        let config = config.unwrap();
        assert_eq!(config.data.path, "/tmp/epl matches.csv");
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.data.competition, "Premier League");
    }
}
