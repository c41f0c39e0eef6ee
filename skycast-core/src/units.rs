//! Kelvin conversions for display. Input range is not checked.

use crate::model::DisplayUnit;

const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

/// Kelvin to Celsius, rounded to one decimal place.
pub fn to_celsius(kelvin: f64) -> f64 {
    round_tenth(kelvin - ZERO_CELSIUS_IN_KELVIN)
}

/// Kelvin to Fahrenheit, rounded to one decimal place.
pub fn to_fahrenheit(kelvin: f64) -> f64 {
    round_tenth((kelvin - ZERO_CELSIUS_IN_KELVIN) * 9.0 / 5.0 + 32.0)
}

pub fn convert(kelvin: f64, unit: DisplayUnit) -> f64 {
    match unit {
        DisplayUnit::Celsius => to_celsius(kelvin),
        DisplayUnit::Fahrenheit => to_fahrenheit(kelvin),
    }
}

/// `"10.0 °C"`
pub fn format_temperature(kelvin: f64, unit: DisplayUnit) -> String {
    format!("{:.1} {}", convert(kelvin, unit), unit.symbol())
}

fn round_tenth(value: f64) -> f64 {
    // adding 0.0 turns -0.0 into 0.0
    (value * 10.0).round() / 10.0 + 0.0
}
