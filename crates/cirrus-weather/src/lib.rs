//! Weather acquisition pipeline for Cirrus
//!
//! Resolves city names and coordinates via the Open-Meteo geocoding API,
//! fetches current/hourly/daily forecasts, and normalizes the raw payloads
//! into typed models.

pub mod client;
pub mod condition;
pub mod location;
pub mod model;
pub mod types;
pub mod units;

pub use client::{ForecastResponse, WeatherClient};
pub use condition::WeatherCondition;
pub use location::{LocationError, LocationSource};
pub use model::{build_current, build_daily, build_hourly, build_snapshot};
pub use types::{
    Coordinate, CurrentConditions, DailyForecast, HourlyForecast, ResolvedLocation,
    WeatherError, WeatherSnapshot,
};
pub use units::TemperatureUnit;
