use serde::{Deserialize, Serialize};

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Build from the persisted boolean preference.
    pub fn from_fahrenheit_flag(use_fahrenheit: bool) -> Self {
        if use_fahrenheit {
            Self::Fahrenheit
        } else {
            Self::Celsius
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// Convert a Celsius value to the display unit. Pure and total.
pub fn to_display(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    }
}

/// Inverse of `to_display` for Fahrenheit.
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Format a Celsius value in the display unit with one decimal and a unit symbol.
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    format!("{:.1}{}", to_display(celsius, unit), unit.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_is_identity() {
        assert_eq!(to_display(0.0, TemperatureUnit::Celsius), 0.0);
        assert_eq!(to_display(15.2, TemperatureUnit::Celsius), 15.2);
        assert_eq!(to_display(-40.0, TemperatureUnit::Celsius), -40.0);
    }

    #[test]
    fn fahrenheit_fixed_points() {
        assert_eq!(to_display(0.0, TemperatureUnit::Fahrenheit), 32.0);
        assert_eq!(to_display(100.0, TemperatureUnit::Fahrenheit), 212.0);
        assert_eq!(to_display(-40.0, TemperatureUnit::Fahrenheit), -40.0);
    }

    #[test]
    fn conversion_round_trips() {
        for c in [-40.0, -10.5, 0.0, 15.2, 37.0, 100.0] {
            let f = to_display(c, TemperatureUnit::Fahrenheit);
            assert!((fahrenheit_to_celsius(f) - c).abs() < 1e-9);
        }
    }

    #[test]
    fn format_with_symbol() {
        assert_eq!(format_temperature(15.2, TemperatureUnit::Celsius), "15.2°C");
        assert_eq!(format_temperature(0.0, TemperatureUnit::Fahrenheit), "32.0°F");
        assert_eq!(format_temperature(15.25, TemperatureUnit::Celsius), "15.2°C");
    }

    #[test]
    fn unit_from_flag() {
        assert_eq!(
            TemperatureUnit::from_fahrenheit_flag(true),
            TemperatureUnit::Fahrenheit
        );
        assert_eq!(
            TemperatureUnit::from_fahrenheit_flag(false),
            TemperatureUnit::Celsius
        );
    }

    #[test]
    fn default_is_celsius() {
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Celsius);
    }
}
