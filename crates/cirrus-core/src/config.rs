use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory (also holds the city-list store)
    pub config_dir: PathBuf,

    /// Weather settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Initial unit preference for fresh installs; the persisted store
    /// value wins once the user has toggled it.
    #[serde(default)]
    pub use_fahrenheit: bool,

    /// Override for the geocoding endpoint (self-hosted mirrors, tests)
    #[serde(default)]
    pub geocoding_url: Option<String>,

    /// Override for the forecast endpoint
    #[serde(default)]
    pub forecast_url: Option<String>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            use_fahrenheit: false,
            geocoding_url: None,
            forecast_url: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cirrus");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject endpoint overrides that are not http(s) URLs.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("weather.geocoding_url", &self.weather.geocoding_url),
            ("weather.forecast_url", &self.weather.forecast_url),
        ] {
            if let Some(value) = value {
                let url = Url::parse(value)
                    .with_context(|| format!("Invalid URL in {}: {}", field, value))?;
                if url.scheme() != "http" && url.scheme() != "https" {
                    anyhow::bail!("{} must use http or https, got {}", field, url.scheme());
                }
            }
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("cirrus");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(!config.weather.use_fahrenheit);
    }

    #[test]
    fn invalid_endpoint_url_is_rejected() {
        let mut config = Config::default();
        config.weather.geocoding_url = Some("not-a-url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let mut config = Config::default();
        config.weather.forecast_url = Some("ftp://example.com".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.weather.use_fahrenheit = true;
        config.weather.geocoding_url = Some("http://localhost:9000".to_string());

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert!(parsed.weather.use_fahrenheit);
        assert_eq!(
            parsed.weather.geocoding_url.as_deref(),
            Some("http://localhost:9000")
        );
    }
}
