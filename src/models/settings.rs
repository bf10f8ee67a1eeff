// Settings data models
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://free-game-scraper.onrender.com/api";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid api_url {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
    #[error("invalid log_level {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub api_url: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    String::from("info")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: String::from(DEFAULT_API_URL),
            request_timeout_secs: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// The full catalog endpoint, `{api_url}/free-games`.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            reason,
        };

        let mut base = Url::parse(self.api_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", base.scheme())));
        }
        // Url::join drops the last segment unless the path ends with a slash
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("free-games").map_err(|e| invalid(e.to_string()))
    }

    pub fn log_level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let settings = Settings::default();
        assert_eq!(
            settings.endpoint().unwrap().as_str(),
            "https://free-game-scraper.onrender.com/api/free-games"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash_and_bare_host() {
        let settings = Settings {
            api_url: "http://127.0.0.1:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            settings.endpoint().unwrap().as_str(),
            "http://127.0.0.1:8080/free-games"
        );
    }

    #[test]
    fn test_invalid_settings() {
        let settings = Settings {
            api_url: "ftp://example.com".to_string(),
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            settings.endpoint(),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
        assert_eq!(
            settings.log_level_filter(),
            Err(ConfigError::InvalidLogLevel("loud".to_string()))
        );
    }

    #[test]
    fn test_settings_missing_optional_fields() {
        let settings: Settings = serde_json::from_str(r#"{"api_url": "https://a.b"}"#).unwrap();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.request_timeout_secs, None);
    }
}
