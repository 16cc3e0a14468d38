//! HTTP client for the Open-Meteo geocoding and forecast APIs.
//! Free, no API key required.

use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;

use crate::types::{Coordinate, ResolvedLocation, WeatherError};

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
const FORECAST_URL: &str = "https://api.open-meteo.com";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Cirrus/0.1.0 (https://github.com/cirrus)";

/// Display name used when reverse geocoding yields no result.
/// Deliberate soft fallback: the coordinates are still usable for a forecast.
pub const CURRENT_LOCATION_NAME: &str = "Current Location";

const HOURLY_VARS: &str = "temperature_2m,relativehumidity_2m,weathercode";
const DAILY_VARS: &str = "temperature_2m_max,temperature_2m_min,sunrise,sunset,weathercode";

/// Client for geocoding and forecast lookups.
///
/// Endpoints are injectable so integration tests can point at a mock server.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl WeatherClient {
    /// Create a client against the production Open-Meteo endpoints.
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_endpoints(GEOCODING_URL, FORECAST_URL)
    }

    /// Create a client, overriding either endpoint where configured and
    /// keeping the production default for the other.
    pub fn from_overrides(
        geocoding_url: Option<&str>,
        forecast_url: Option<&str>,
    ) -> Result<Self, WeatherError> {
        Self::with_endpoints(
            geocoding_url.unwrap_or(GEOCODING_URL),
            forecast_url.unwrap_or(FORECAST_URL),
        )
    }

    /// Create a client against explicit endpoints (tests, self-hosted mirrors).
    pub fn with_endpoints(geocoding_url: &str, forecast_url: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            geocoding_url: geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: forecast_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a free-text city name to its best-match location.
    ///
    /// The caller guarantees `name` is trimmed and non-empty. An empty result
    /// set is `CityNotFound`; the user typed something specific and needs
    /// feedback rather than a silent fallback.
    pub async fn resolve_by_name(&self, name: &str) -> Result<ResolvedLocation, WeatherError> {
        tracing::debug!("Geocoding city name: {}", name);

        let url = format!("{}/v1/search", self.geocoding_url);
        let response = self
            .client
            .get(&url)
            .query(&[("name", name), ("count", "1"), ("language", "en"), ("format", "json")])
            .send()
            .await?
            .error_for_status()?;

        let body: GeocodeResponse = response.json().await?;

        let Some(result) = body.results.unwrap_or_default().into_iter().next() else {
            tracing::info!("No geocoding results for '{}'", name);
            return Err(WeatherError::CityNotFound(name.to_string()));
        };

        tracing::debug!(
            "Found location: {} ({:.4}, {:.4})",
            result.name,
            result.latitude,
            result.longitude
        );

        Ok(ResolvedLocation {
            name: result.name,
            coordinate: Coordinate::new(result.latitude, result.longitude),
        })
    }

    /// Resolve coordinates to a display name via reverse geocoding.
    ///
    /// An empty result set falls back to [`CURRENT_LOCATION_NAME`] rather than
    /// failing; transport and decode failures still propagate.
    pub async fn resolve_by_coordinates(
        &self,
        coordinate: Coordinate,
    ) -> Result<ResolvedLocation, WeatherError> {
        tracing::debug!(
            "Reverse geocoding ({:.4}, {:.4})",
            coordinate.latitude,
            coordinate.longitude
        );

        let url = format!("{}/v1/reverse", self.geocoding_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("count", "1".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: GeocodeResponse = response.json().await?;

        let name = match body.results.unwrap_or_default().into_iter().next() {
            Some(result) => result.name,
            None => {
                tracing::debug!("No reverse geocoding results, using placeholder name");
                CURRENT_LOCATION_NAME.to_string()
            }
        };

        Ok(ResolvedLocation {
            name,
            coordinate,
        })
    }

    /// Fetch the raw forecast payload for a coordinate.
    ///
    /// Requests current conditions plus the hourly and daily series the model
    /// builder consumes, with timezone resolution local to the coordinate.
    /// The decoded payload is returned verbatim for normalization.
    pub async fn fetch_forecast(
        &self,
        coordinate: Coordinate,
    ) -> Result<ForecastResponse, WeatherError> {
        tracing::debug!(
            "Fetching forecast for ({:.4}, {:.4})",
            coordinate.latitude,
            coordinate.longitude
        );

        let url = format!("{}/v1/forecast", self.forecast_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coordinate.latitude.to_string()),
                ("longitude", coordinate.longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", HOURLY_VARS.to_string()),
                ("daily", DAILY_VARS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let payload: ForecastResponse = response.json().await?;
        Ok(payload)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
}

/// Raw forecast payload from the forecast API.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub current_weather: Option<CurrentWeatherBlock>,
    pub hourly: Option<HourlyBlock>,
    pub daily: Option<DailyBlock>,
}

/// Current-conditions block. Temperature and wind speed are always present
/// when the block itself is present; the weather code decodes leniently.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherBlock {
    pub temperature: f64,
    pub windspeed: f64,
    #[serde(default, deserialize_with = "lenient_weather_code")]
    pub weathercode: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<f64>,
    #[serde(default)]
    pub relativehumidity_2m: Vec<i64>,
    #[serde(default)]
    pub weathercode: Vec<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
    #[serde(default)]
    pub sunrise: Vec<String>,
    #[serde(default)]
    pub sunset: Vec<String>,
    #[serde(default)]
    pub weathercode: Vec<i32>,
}

/// Decode a weather code, treating an absent or non-numeric value as 0
/// (clear sky). Documented default, not an error.
fn lenient_weather_code<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_i64)
        .map(|code| code as i32)
        .unwrap_or(0))
}
