use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skyview_nav::NavigationSettings;
use skyview_weather::{ProviderSettings, Units};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Environment variable that supplies the OpenWeather key when the config has none
pub const API_KEY_ENV: &str = "SKYVIEW_API_KEY";

const API_KEY_PLACEHOLDER: &str = "YOUR_OPENWEATHER_API_KEY";

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

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Swipe thresholds and view count
    #[serde(default)]
    pub navigation: NavigationSettings,

    /// Weather settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// City name ("Coimbra, Portugal") or "lat,lon"
    pub location: String,

    /// OpenWeather API key (can be set via SKYVIEW_API_KEY)
    pub api_key: String,

    /// API root, without the endpoint
    pub base_url: String,

    /// Measurement system
    #[serde(default)]
    pub units: Units,

    /// Language for condition descriptions
    pub lang: String,

    /// How long fetched data stays fresh, in minutes
    pub cache_ttl_minutes: u32,

    /// HTTP timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Use built-in sample data instead of the API
    #[serde(default)]
    pub demo_mode: bool,
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            location: "Coimbra, Portugal".to_string(),
            api_key: API_KEY_PLACEHOLDER.to_string(),
            base_url: skyview_weather::provider::DEFAULT_BASE_URL.to_string(),
            units: Units::Metric,
            lang: "it".to_string(),
            cache_ttl_minutes: 10,
            request_timeout_secs: default_request_timeout_secs(),
            demo_mode: false,
        }
    }
}

impl WeatherConfig {
    /// Check if an API key is configured (not empty or the placeholder)
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty() && !self.api_key.starts_with("YOUR_")
    }

    /// Settings for constructing a `WeatherProvider`
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            units: self.units,
            lang: self.lang.clone(),
            cache_ttl: Duration::from_secs(u64::from(self.cache_ttl_minutes) * 60),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            demo_mode: self.demo_mode,
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skyview")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            navigation: NavigationSettings::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Load configuration from an explicit path, writing defaults there if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, writing defaults", path.display());
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Fill in the API key from the environment when the file has none
    pub fn apply_env_overrides(&mut self, api_key: Option<String>) {
        if self.weather.has_api_key() {
            return;
        }
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("Using API key from {}", API_KEY_ENV);
            self.weather.api_key = key.trim().to_string();
        }
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        // Navigation limits are checked by the navigation crate itself
        if let Err(e) = self.navigation.validate() {
            result.add_error(format!("navigation.{}", e.field()), e.to_string());
        }

        if self.weather.location.trim().is_empty() {
            result.add_error("weather.location", "Location must not be empty");
        }

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if !self.weather.demo_mode && !self.weather.has_api_key() {
            result.add_warning(
                "weather.api_key",
                format!(
                    "OpenWeather API key not configured (set it here or via {})",
                    API_KEY_ENV
                ),
            );
        }

        if self.weather.cache_ttl_minutes == 0 {
            result.add_warning(
                "weather.cache_ttl_minutes",
                "Response caching disabled (0 minutes)",
            );
        } else if self.weather.cache_ttl_minutes > 1440 {
            result.add_warning(
                "weather.cache_ttl_minutes",
                "Cache lifetime is more than 24 hours",
            );
        }

        if self.weather.request_timeout_secs == 0 {
            result.add_error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                // Check scheme
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                // Check host
                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(
                    field_name,
                    format!("Invalid URL: {}", e),
                );
            }
        }
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("skyview");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        // Default config should be valid (only warnings, no errors)
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_missing_api_key_is_warning() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "weather.api_key"));
    }

    #[test]
    fn test_demo_mode_needs_no_api_key() {
        let mut config = Config::default();
        config.weather.demo_mode = true;
        let result = config.validate();
        assert!(!result.warnings.iter().any(|w| w.field == "weather.api_key"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.base_url = "ftp://api.openweathermap.org".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.base_url"));
    }

    #[test]
    fn test_zero_views_is_error() {
        let mut config = Config::default();
        config.navigation.total_views = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "navigation.total_views"));
    }

    #[test]
    fn test_negative_threshold_is_error() {
        let mut config = Config::default();
        config.navigation.swipe.distance_threshold = -5.0;
        let result = config.validate();
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "navigation.distance_threshold"));
    }

    #[test]
    fn test_empty_location_is_error() {
        let mut config = Config::default();
        config.weather.location = "  ".to_string();
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_env_override_only_fills_missing_key() {
        let mut config = Config::default();
        config.apply_env_overrides(Some(" abc123 ".to_string()));
        assert_eq!(config.weather.api_key, "abc123");

        config.apply_env_overrides(Some("other".to_string()));
        assert_eq!(config.weather.api_key, "abc123");
    }

    #[test]
    fn test_provider_settings_conversion() {
        let mut config = Config::default();
        config.weather.cache_ttl_minutes = 5;
        let settings = config.weather.provider_settings();
        assert_eq!(settings.cache_ttl, Duration::from_secs(300));
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
        assert_eq!(settings.units, Units::Metric);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.navigation.initial_view = 2;
        config.navigation.swipe.max_duration_ms = 750;
        config.weather.location = "Lisbon".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.navigation, config.navigation);
        assert_eq!(loaded.weather.location, "Lisbon");
    }

    #[test]
    fn test_load_from_missing_path_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.navigation, NavigationSettings::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[navigation]
total_views = 3
distance_threshold = 40.0
max_perpendicular_drift = 80.0
max_duration_ms = 400
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.navigation.swipe.distance_threshold, 40.0);
        assert_eq!(config.navigation.initial_view, 0);
        assert_eq!(config.weather.location, "Coimbra, Portugal");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[navigation\ntotal_views = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
