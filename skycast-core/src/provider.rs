use crate::{
    Config, LocationQuery, LookupError, WeatherReading,
    provider::{openweather::OpenWeatherProvider, proxy::ProxyProvider},
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, header::CACHE_CONTROL};
use std::{convert::TryFrom, fmt::Debug, time::Duration};
use tracing::debug;

pub mod openweather;
pub mod proxy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// Backend that forwards `/weather?city=&country=` to OpenWeather.
    Proxy,
    /// OpenWeather called directly with an API key.
    OpenWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Proxy => "proxy",
            ProviderId::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Proxy, ProviderId::OpenWeather]
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderId::Proxy => proxy::DEFAULT_BASE_URL,
            ProviderId::OpenWeather => openweather::DEFAULT_BASE_URL,
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, ProviderId::OpenWeather)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "proxy" => Ok(ProviderId::Proxy),
            "openweather" => Ok(ProviderId::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: proxy, openweather."
            )),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, query: &LocationQuery) -> Result<WeatherReading, LookupError>;
}

/// Construct a provider from config and explicit ProviderId.
///
/// `base_url_override` wins over whatever the config file says.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
    base_url_override: Option<&str>,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let base_url = base_url_override
        .or_else(|| config.provider_base_url(id))
        .unwrap_or_else(|| id.default_base_url())
        .to_owned();
    let timeout = config.request_timeout();

    let boxed: Box<dyn WeatherProvider> = match id {
        ProviderId::Proxy => Box::new(ProxyProvider::new(base_url, timeout)?),
        ProviderId::OpenWeather => {
            let api_key = config.provider_api_key(id).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider '{id}'.\n\
                         Hint: run `skycast configure {id}` and enter your API key."
                )
            })?;
            Box::new(OpenWeatherProvider::new(api_key.to_owned(), base_url, timeout)?)
        }
    };

    Ok(boxed)
}

/// Construct the default provider from config, using `default_provider` field.
pub fn default_provider_from_config(
    config: &Config,
    base_url_override: Option<&str>,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = config.default_provider_id()?;
    provider_from_config(id, config, base_url_override)
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LookupError::ClientSetup(e.to_string()))
}

/// Send a prepared GET, bypassing caches, and decode the current-weather body.
pub(crate) async fn fetch_current(
    request: RequestBuilder,
    provider: ProviderId,
) -> Result<WeatherReading, LookupError> {
    let res = request.header(CACHE_CONTROL, "no-cache").send().await?;

    let status = res.status();
    debug!(%provider, %status, "provider responded");

    let body = res.text().await?;

    if !status.is_success() {
        return Err(LookupError::Status {
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    openweather::parse_current(&body)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
