//! Normalization of raw forecast payloads into typed models.
//!
//! All builders are all-or-nothing: a missing required field or a malformed
//! timestamp fails the build, and the caller falls back to an error state
//! rather than rendering a partial model.

use chrono::{NaiveDate, NaiveDateTime};

use crate::client::ForecastResponse;
use crate::types::{
    CurrentConditions, DailyForecast, HourlyForecast, WeatherError, WeatherSnapshot,
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Build the current-conditions snapshot.
///
/// Humidity is read from index 0 of the hourly series, not time-matched to
/// the current hour. Known approximation, preserved for compatibility.
pub fn build_current(
    payload: &ForecastResponse,
    location_name: &str,
) -> Result<CurrentConditions, WeatherError> {
    let current = payload
        .current_weather
        .as_ref()
        .ok_or(WeatherError::MissingField("current_weather"))?;

    let humidity_percent = payload
        .hourly
        .as_ref()
        .and_then(|hourly| hourly.relativehumidity_2m.first())
        .and_then(|h| u8::try_from(*h).ok())
        .filter(|h| *h <= 100);

    // Sunrise/sunset come from the first daily entry; parse failures are
    // swallowed and the field left absent.
    let sunrise = first_daily_event(payload, |daily| &daily.sunrise);
    let sunset = first_daily_event(payload, |daily| &daily.sunset);

    Ok(CurrentConditions {
        location_name: location_name.to_string(),
        temperature_c: current.temperature,
        wind_speed_kmh: current.windspeed,
        weather_code: current.weathercode,
        humidity_percent,
        sunrise,
        sunset,
    })
}

fn first_daily_event<F>(payload: &ForecastResponse, pick: F) -> Option<NaiveDateTime>
where
    F: Fn(&crate::client::DailyBlock) -> &Vec<String>,
{
    payload
        .daily
        .as_ref()
        .and_then(|daily| pick(daily).first())
        .and_then(|s| NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).ok())
}

/// Build the ordered daily series.
///
/// The four parallel arrays are truncated to their minimum length; upstream
/// occasionally serves inconsistent lengths. Entries keep original order,
/// and min/max are passed through as received.
pub fn build_daily(payload: &ForecastResponse) -> Result<Vec<DailyForecast>, WeatherError> {
    let daily = payload
        .daily
        .as_ref()
        .ok_or(WeatherError::MissingField("daily"))?;

    let len = daily
        .time
        .len()
        .min(daily.temperature_2m_max.len())
        .min(daily.temperature_2m_min.len())
        .min(daily.weathercode.len());

    let mut entries = Vec::with_capacity(len);
    for i in 0..len {
        let date = NaiveDate::parse_from_str(&daily.time[i], DATE_FORMAT)
            .map_err(|e| WeatherError::Parse(format!("daily time '{}': {}", daily.time[i], e)))?;
        entries.push(DailyForecast {
            date,
            min_temp_c: daily.temperature_2m_min[i],
            max_temp_c: daily.temperature_2m_max[i],
            weather_code: daily.weathercode[i],
        });
    }

    Ok(entries)
}

/// Build the ordered hourly series, truncated to the minimum parallel-array
/// length. No windowing; "next 24 hours" is a presentation concern.
pub fn build_hourly(payload: &ForecastResponse) -> Result<Vec<HourlyForecast>, WeatherError> {
    let hourly = payload
        .hourly
        .as_ref()
        .ok_or(WeatherError::MissingField("hourly"))?;

    let len = hourly
        .time
        .len()
        .min(hourly.temperature_2m.len())
        .min(hourly.weathercode.len());

    let mut entries = Vec::with_capacity(len);
    for i in 0..len {
        let time = NaiveDateTime::parse_from_str(&hourly.time[i], DATETIME_FORMAT)
            .map_err(|e| WeatherError::Parse(format!("hourly time '{}': {}", hourly.time[i], e)))?;
        entries.push(HourlyForecast {
            time,
            temperature_c: hourly.temperature_2m[i],
            weather_code: hourly.weathercode[i],
        });
    }

    Ok(entries)
}

/// Build the full snapshot consumed by the screen state.
pub fn build_snapshot(
    payload: &ForecastResponse,
    location_name: &str,
) -> Result<WeatherSnapshot, WeatherError> {
    Ok(WeatherSnapshot {
        current: build_current(payload, location_name)?,
        daily: build_daily(payload)?,
        hourly: build_hourly(payload)?,
    })
}
