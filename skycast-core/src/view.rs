//! Display-ready projection of the controller state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::{DisplayUnit, LookupState, WeatherReading},
    preset::ConditionPreset,
    units,
};

pub const DEFAULT_ICON_BASE_URL: &str = "https://openweathermap.org";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSize {
    /// `@2x`
    #[default]
    Standard,
    /// `@4x`
    Large,
}

impl IconSize {
    fn suffix(self) -> &'static str {
        match self {
            IconSize::Standard => "@2x",
            IconSize::Large => "@4x",
        }
    }
}

/// Where condition icons are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSettings {
    pub base_url: String,
    pub size: IconSize,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ICON_BASE_URL.to_string(),
            size: IconSize::default(),
        }
    }
}

impl IconSettings {
    pub fn icon_url(&self, icon_code: &str) -> String {
        format!(
            "{}/img/wn/{}{}.png",
            self.base_url.trim_end_matches('/'),
            icon_code,
            self.size.suffix()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub loading: bool,
    pub error_message: Option<String>,
    pub result: Option<ReadingView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingView {
    pub title: String,
    pub temperature_display: String,
    pub description: String,
    pub humidity: String,
    pub pressure: String,
    pub wind: String,
    pub icon_url: String,
    pub preset: ConditionPreset,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Pure function of its inputs; the unit is applied here, never at fetch time.
pub fn project(state: &LookupState, unit: DisplayUnit, icons: &IconSettings) -> ViewModel {
    ViewModel {
        loading: state.is_loading(),
        error_message: state.error_message().map(str::to_owned),
        result: state
            .reading()
            .map(|reading| reading_view(reading, unit, icons)),
    }
}

fn reading_view(reading: &WeatherReading, unit: DisplayUnit, icons: &IconSettings) -> ReadingView {
    let title = if reading.country_code.is_empty() {
        reading.location_name.clone()
    } else {
        format!("{}, {}", reading.location_name, reading.country_code)
    };

    ReadingView {
        title,
        temperature_display: units::format_temperature(reading.temperature_kelvin, unit),
        description: reading.condition_description.clone(),
        humidity: format!("{}%", reading.humidity_percent),
        pressure: format!("{} hPa", reading.pressure_hpa),
        wind: format!("{} m/s", reading.wind_speed_mps),
        icon_url: icons.icon_url(&reading.icon_code),
        preset: ConditionPreset::resolve_reading(
            &reading.condition_main,
            &reading.condition_description,
        ),
        observed_at: reading.observed_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> WeatherReading {
        WeatherReading {
            location_name: "London".into(),
            country_code: "GB".into(),
            temperature_kelvin: 283.15,
            humidity_percent: 70,
            pressure_hpa: 1012,
            wind_speed_mps: 3.6,
            condition_main: "Clear".into(),
            condition_description: "clear sky".into(),
            icon_code: "01d".into(),
            observed_at: None,
        }
    }

    #[test]
    fn idle_projects_to_empty_view() {
        let view = project(&LookupState::Idle, DisplayUnit::Celsius, &IconSettings::default());
        assert!(!view.loading);
        assert!(view.error_message.is_none());
        assert!(view.result.is_none());
    }

    #[test]
    fn loading_has_no_result_or_error() {
        let view = project(&LookupState::Loading, DisplayUnit::Celsius, &IconSettings::default());
        assert!(view.loading);
        assert!(view.error_message.is_none());
        assert!(view.result.is_none());
    }

    #[test]
    fn failure_carries_only_the_message() {
        let state = LookupState::Failure("Error fetching weather data".into());
        let view = project(&state, DisplayUnit::Celsius, &IconSettings::default());
        assert_eq!(view.error_message.as_deref(), Some("Error fetching weather data"));
        assert!(view.result.is_none());
    }

    #[test]
    fn success_formats_every_field() {
        let state = LookupState::Success(london());
        let view = project(&state, DisplayUnit::Celsius, &IconSettings::default());
        let result = view.result.expect("result");

        assert_eq!(result.title, "London, GB");
        assert_eq!(result.temperature_display, "10.0 °C");
        assert_eq!(result.description, "clear sky");
        assert_eq!(result.humidity, "70%");
        assert_eq!(result.pressure, "1012 hPa");
        assert_eq!(result.wind, "3.6 m/s");
        assert_eq!(result.icon_url, "https://openweathermap.org/img/wn/01d@2x.png");
        assert_eq!(result.preset, ConditionPreset::Clear);
    }

    #[test]
    fn unit_is_applied_at_projection_time() {
        let state = LookupState::Success(london());
        let icons = IconSettings::default();
        let c = project(&state, DisplayUnit::Celsius, &icons).result.expect("result");
        let f = project(&state, DisplayUnit::Fahrenheit, &icons).result.expect("result");
        assert_eq!(c.temperature_display, "10.0 °C");
        assert_eq!(f.temperature_display, "50.0 °F");
    }

    #[test]
    fn title_without_country() {
        let mut reading = london();
        reading.country_code.clear();
        let view = project(
            &LookupState::Success(reading),
            DisplayUnit::Celsius,
            &IconSettings::default(),
        );
        assert_eq!(view.result.expect("result").title, "London");
    }

    #[test]
    fn large_icons_and_trailing_slash() {
        let icons = IconSettings {
            base_url: "http://icons.test/".into(),
            size: IconSize::Large,
        };
        assert_eq!(icons.icon_url("10n"), "http://icons.test/img/wn/10n@4x.png");
    }
}
