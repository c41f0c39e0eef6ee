use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

use crate::{
    error::LookupError,
    model::{LocationQuery, WeatherReading},
    provider::{ProviderId, fetch_current, http_client},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Talks to a backend that relays OpenWeather's body unchanged, so no API key
/// lives on the client.
#[derive(Debug, Clone)]
pub struct ProxyProvider {
    base_url: String,
    http: Client,
}

impl ProxyProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        Ok(Self {
            base_url: base_url.into(),
            http: http_client(timeout)?,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/weather", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WeatherProvider for ProxyProvider {
    #[instrument(skip(self), fields(city = %query.city, country = %query.country))]
    async fn get_weather(&self, query: &LocationQuery) -> Result<WeatherReading, LookupError> {
        let request = self
            .http
            .get(self.endpoint())
            .query(&[("city", query.city.as_str()), ("country", query.country.as_str())]);

        fetch_current(request, ProviderId::Proxy).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let a =
            ProxyProvider::new("http://localhost:8080/", Duration::from_secs(1)).expect("client");
        let b =
            ProxyProvider::new("http://localhost:8080", Duration::from_secs(1)).expect("client");
        assert_eq!(a.endpoint(), "http://localhost:8080/weather");
        assert_eq!(a.endpoint(), b.endpoint());
    }
}
