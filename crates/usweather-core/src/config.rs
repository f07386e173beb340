use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream service endpoints
    #[serde(default)]
    pub service: ServiceConfig,

    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the geocoding service
    #[serde(default = "default_geocode_base_url")]
    pub geocode_base_url: String,

    /// Base URL of the weather service (gridpoint lookup)
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,

    /// User-Agent sent with every request; api.weather.gov rejects anonymous clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocode_base_url() -> String {
    "https://geocode.xyz".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_user_agent() -> String {
    format!("usweather/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            geocode_base_url: default_geocode_base_url(),
            weather_base_url: default_weather_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Which page variant's display rules to follow
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SearchVariant {
    #[default]
    A,
    B,
    C,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub variant: SearchVariant,

    /// Quiet period before a typed query is looked up
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Query looked up when nothing else is given
    #[serde(default = "default_query")]
    pub default_query: String,

    /// Overrides the variant's minimum query length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_query_len: Option<usize>,

    /// Overrides the variant's geocoding region hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

fn default_debounce_ms() -> u64 {
    1200
}

fn default_query() -> String {
    "66044".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            variant: SearchVariant::default(),
            debounce_ms: default_debounce_ms(),
            default_query: default_query(),
            min_query_len: None,
            region: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there first if it's missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load from `path`, or the default location when `None`.
    ///
    /// Malformed TOML is a `ParseError`; anything else that stops the load
    /// (unreadable file, no config dir) is `Invalid`.
    pub fn load_at(path: Option<&Path>) -> Result<Self, ConfigError> {
        let loaded = match path {
            Some(p) => Self::load_from(p),
            None => Self::load(),
        };
        loaded.map_err(|e| {
            if e.downcast_ref::<toml::de::Error>().is_some() {
                ConfigError::ParseError(format!("{:#}", e))
            } else {
                ConfigError::Invalid(format!("{:#}", e))
            }
        })
    }

    /// Validate the configuration as it will actually be used.
    ///
    /// Any error fails; warnings are handed back to the caller.
    pub fn validated(self) -> Result<(Self, ValidationResult), ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "Configuration validation failed: {}",
                validation.error_summary()
            )));
        }

        Ok((self, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(
            &self.service.geocode_base_url,
            "service.geocode_base_url",
            &mut result,
        );
        validate_url(
            &self.service.weather_base_url,
            "service.weather_base_url",
            &mut result,
        );

        if self.service.timeout_secs == 0 {
            result.add_error("service.timeout_secs", "Timeout must be greater than 0");
        }

        if self.service.user_agent.trim().is_empty() {
            result.add_warning(
                "service.user_agent",
                "Empty User-Agent; api.weather.gov may reject requests",
            );
        }

        if self.search.debounce_ms == 0 {
            result.add_warning(
                "search.debounce_ms",
                "Debounce disabled (0 ms); every keystroke triggers a lookup",
            );
        }

        if self.search.min_query_len == Some(0) {
            result.add_error(
                "search.min_query_len",
                "Minimum query length must be at least 1",
            );
        }

        result
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("usweather");

        Ok(config_dir.join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_defaults_match_page() {
        let config = Config::default();
        assert_eq!(config.search.debounce_ms, 1200);
        assert_eq!(config.search.default_query, "66044");
        assert_eq!(config.search.variant, SearchVariant::A);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.service.weather_base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "service.weather_base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.service.geocode_base_url = "ftp://geocode.xyz".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_debounce_is_warning() {
        let mut config = Config::default();
        config.search.debounce_ms = 0;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "search.debounce_ms"));
    }

    #[test]
    fn test_zero_timeout_and_min_len_are_errors() {
        let mut config = Config::default();
        config.service.timeout_secs = 0;
        config.search.min_query_len = Some(0);
        let result = config.validate();
        assert_eq!(result.errors.len(), 2);
        let summary = result.error_summary();
        assert!(summary.contains("service.timeout_secs"));
        assert!(summary.contains("search.min_query_len"));
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.search.debounce_ms, 1200);
    }

    #[test]
    fn test_load_from_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[search]\nvariant = \"c\"\nmin_query_len = 4\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.search.variant, SearchVariant::C);
        assert_eq!(config.search.min_query_len, Some(4));
        assert_eq!(config.search.debounce_ms, 1200);
        assert_eq!(config.service.weather_base_url, "https://api.weather.gov");
    }

    #[test]
    fn test_validated_rejects_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[service]\ntimeout_secs = 0\n").unwrap();

        let config = Config::load_at(Some(path.as_path())).unwrap();
        let err = config.validated().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("service.timeout_secs"));
    }

    #[test]
    fn test_validated_returns_warnings() {
        let mut config = Config::default();
        config.search.debounce_ms = 0;
        let (_, validation) = config.validated().unwrap();
        assert_eq!(validation.warnings.len(), 1);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search\nvariant = \"b\"\n").unwrap();

        let err = Config::load_at(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_unknown_variant_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\nvariant = \"d\"\n").unwrap();

        let err = Config::load_at(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
