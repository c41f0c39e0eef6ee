use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::{
    error::LookupError,
    model::{LocationQuery, WeatherReading},
    provider::{ProviderId, fetch_current, http_client},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Calls OpenWeather's current-weather endpoint directly.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

// Keep the key out of logs.
impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        Ok(Self {
            api_key,
            base_url: base_url.into(),
            http: http_client(timeout)?,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/data/2.5/weather", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(city = %query.city, country = %query.country))]
    async fn get_weather(&self, query: &LocationQuery) -> Result<WeatherReading, LookupError> {
        let q = format!("{},{}", query.city, query.country);
        let request = self
            .http
            .get(self.endpoint())
            .query(&[("q", q.as_str()), ("appid", self.api_key.as_str())]);

        fetch_current(request, ProviderId::OpenWeather).await
    }
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: Option<String>,
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    sys: OwSys,
    main: OwMain,
    wind: OwWind,
    weather: Vec<OwWeather>,
}

/// Decode the current-weather body shared by OpenWeather and the proxy.
///
/// Only `weather[0]` is used, and its `main`, `description` and `icon` must be present.
pub(crate) fn parse_current(body: &str) -> Result<WeatherReading, LookupError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::MalformedResponse(e.to_string()))?;

    let condition = parsed.weather.into_iter().next().ok_or_else(|| {
        LookupError::MalformedResponse("response contained no weather conditions".to_string())
    })?;

    let condition_main = required(condition.main, "weather[0].main")?;
    let condition_description = required(condition.description, "weather[0].description")?;
    let icon_code = required(condition.icon, "weather[0].icon")?;

    Ok(WeatherReading {
        location_name: parsed.name,
        country_code: parsed.sys.country,
        temperature_kelvin: parsed.main.temp,
        humidity_percent: parsed.main.humidity,
        pressure_hpa: parsed.main.pressure,
        wind_speed_mps: parsed.wind.speed,
        condition_main,
        condition_description,
        icon_code,
        observed_at: parsed.dt.and_then(unix_to_utc),
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, LookupError> {
    value.ok_or_else(|| LookupError::MalformedResponse(format!("missing field `{field}`")))
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}
