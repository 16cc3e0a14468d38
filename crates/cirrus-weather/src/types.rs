use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Geographic coordinate pair. Transient: lives for one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A location with a display name, produced by geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub name: String,
    pub coordinate: Coordinate,
}

/// Current weather snapshot for one location.
///
/// Temperature and wind speed are always present when the upstream
/// current-conditions block is present; everything else is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: i32,
    pub humidity_percent: Option<u8>,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
}

/// One day of forecast.
///
/// `min_temp_c <= max_temp_c` is expected but not guaranteed upstream;
/// values are passed through as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub weather_code: i32,
}

/// One hour of forecast, chronological within its series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub weather_code: i32,
}

/// Complete normalized weather bundle for one fetch cycle.
/// Replaces any prior value wholesale; never merged incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
    pub hourly: Vec<HourlyForecast>,
}

/// Errors from the weather pipeline.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Missing field in forecast payload: {0}")]
    MissingField(&'static str),
}
