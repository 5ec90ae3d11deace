use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Overrides the per-login-session directory used for session storage.
    pub storage_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub theme: String,
    pub default_calendar: Option<String>,
    #[serde(default)]
    pub calendars: Vec<String>,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save()?;
            tracing::info!("Wrote default config to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lifesync")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Calendar to open on startup; an explicit choice wins over the config.
    pub fn initial_calendar(&self, requested: Option<String>) -> Option<String> {
        requested
            .or_else(|| self.ui.default_calendar.clone())
            .filter(|id| !id.trim().is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8080/api".to_string(),
                timeout_seconds: 30,
            },
            session: SessionConfig::default(),
            ui: UiConfig {
                theme: "default".to_string(),
                default_calendar: None,
                calendars: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn default_config_has_30_second_timeout() {
        let config = Config::default();
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    fn default_config_opens_no_calendar() {
        let config = Config::default();
        assert_eq!(config.initial_calendar(None), None);
    }

    #[test]
    fn requested_calendar_overrides_default() {
        let mut config = Config::default();
        config.ui.default_calendar = Some("home".to_string());

        assert_eq!(config.initial_calendar(Some("work".to_string())), Some("work".to_string()));
        assert_eq!(config.initial_calendar(None), Some("home".to_string()));
    }

    #[test]
    fn blank_calendar_id_counts_as_absent() {
        let config = Config::default();
        assert_eq!(config.initial_calendar(Some("  ".to_string())), None);
    }

    #[test]
    fn parse_valid_toml_config() {
        let toml_content = r#"
            [api]
            base_url = "https://lifesync.example/api"
            timeout_seconds = 10

            [session]
            storage_dir = "/tmp/lifesync-session"

            [ui]
            theme = "nord"
            default_calendar = "1"
            calendars = ["1", "2"]
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.api.base_url, "https://lifesync.example/api");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.session.storage_dir, Some(PathBuf::from("/tmp/lifesync-session")));
        assert_eq!(config.ui.theme, "nord");
        assert_eq!(config.ui.calendars, vec!["1", "2"]);
    }

    #[test]
    fn session_section_is_optional() {
        let toml_content = r#"
            [api]
            base_url = "http://localhost:8080/api"
            timeout_seconds = 30

            [ui]
            theme = "default"
        "#;

        let config = Config::from_toml(toml_content).unwrap();

        assert_eq!(config.session, SessionConfig::default());
        assert!(config.ui.calendars.is_empty());
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let invalid_toml = "this is not valid toml";
        let result = Config::from_toml(invalid_toml);
        assert!(result.is_err());
    }
}
