use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::LookupError;

/// A city/country pair as typed into the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
    /// Free-form; not checked against ISO codes.
    pub country: String,
}

impl LocationQuery {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }

    /// Rejects blank fields, city first.
    pub fn validate(&self) -> Result<(), LookupError> {
        if self.city.trim().is_empty() {
            return Err(LookupError::Validation { field: "city" });
        }
        if self.country.trim().is_empty() {
            return Err(LookupError::Validation { field: "country" });
        }
        Ok(())
    }

    /// Copy with surrounding whitespace removed, as sent on the wire.
    pub fn trimmed(&self) -> Self {
        Self::new(self.city.trim(), self.country.trim())
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

/// One snapshot of weather data as decoded from the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location_name: String,
    pub country_code: String,
    pub temperature_kelvin: f64,
    pub humidity_percent: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_code: String,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Lifecycle of the current lookup. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success(WeatherReading),
    Failure(String),
}

impl LookupState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading)
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        match self {
            LookupState::Success(reading) => Some(reading),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LookupState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl DisplayUnit {
    pub fn toggled(self) -> Self {
        match self {
            DisplayUnit::Celsius => DisplayUnit::Fahrenheit,
            DisplayUnit::Fahrenheit => DisplayUnit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            DisplayUnit::Celsius => "°C",
            DisplayUnit::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisplayUnit::Celsius => "celsius",
            DisplayUnit::Fahrenheit => "fahrenheit",
        })
    }
}

impl FromStr for DisplayUnit {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "c" | "celsius" => Ok(DisplayUnit::Celsius),
            "f" | "fahrenheit" => Ok(DisplayUnit::Fahrenheit),
            _ => Err(format!(
                "Unknown unit '{value}'. Expected one of: c, celsius, f, fahrenheit."
            )),
        }
    }
}
