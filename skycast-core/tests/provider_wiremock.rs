//! Provider behaviour against a mock HTTP server.

use std::time::Duration;

use skycast_core::{
    LocationQuery, LookupError, WeatherProvider,
    provider::{openweather::OpenWeatherProvider, proxy::ProxyProvider},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

fn london_body() -> serde_json::Value {
    serde_json::json!({
        "name": "London",
        "dt": 1700000000,
        "sys": { "country": "GB" },
        "main": { "temp": 283.15, "humidity": 70, "pressure": 1012 },
        "wind": { "speed": 3.6 },
        "weather": [ { "description": "clear sky", "icon": "01d", "main": "Clear" } ]
    })
}

fn proxy(server: &MockServer) -> ProxyProvider {
    ProxyProvider::new(server.uri(), Duration::from_secs(2))
        .expect("client")
}

// ============================================================================
// Proxy
// ============================================================================

#[tokio::test]
async fn proxy_sends_city_country_and_no_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "London"))
        .and(query_param("country", "GB"))
        .and(header("cache-control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(1)
        .mount(&server)
        .await;

    let reading = proxy(&server)
        .get_weather(&LocationQuery::new("London", "GB"))
        .await
        .expect("lookup should succeed");

    assert_eq!(reading.location_name, "London");
    assert_eq!(reading.country_code, "GB");
    assert_eq!(reading.icon_code, "01d");
}

#[tokio::test]
async fn proxy_percent_encodes_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "New York & Co"))
        .and(query_param("country", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(1)
        .mount(&server)
        .await;

    proxy(&server)
        .get_weather(&LocationQuery::new("New York & Co", "US"))
        .await
        .expect("lookup should succeed");

    let requests = server.received_requests().await.unwrap_or_default();
    let raw_query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!raw_query.contains(' '), "query not encoded: {raw_query}");
    assert!(!raw_query.contains("& Co"), "query not encoded: {raw_query}");
}

#[tokio::test]
async fn proxy_server_error_maps_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string(r#"{"error": "Error fetching weather data"}"#),
        )
        .mount(&server)
        .await;

    let err = proxy(&server)
        .get_weather(&LocationQuery::new("London", "GB"))
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Status { status: 500, .. }));
}

#[tokio::test]
async fn proxy_not_found_maps_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_string("city not found"))
        .mount(&server)
        .await;

    let err = proxy(&server)
        .get_weather(&LocationQuery::new("Nowhere", "ZZ"))
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Status { status: 404, body } if body == "city not found"));
}

#[tokio::test]
async fn empty_weather_list_is_malformed() {
    let server = MockServer::start().await;
    let mut body = london_body();
    body["weather"] = serde_json::json!([]);

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = proxy(&server)
        .get_weather(&LocationQuery::new("London", "GB"))
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::MalformedResponse(_)));
}

#[tokio::test]
async fn html_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = proxy(&server)
        .get_weather(&LocationQuery::new("London", "GB"))
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::MalformedResponse(_)));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(london_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let provider = ProxyProvider::new(server.uri(), Duration::from_millis(50))
        .expect("client");
    let err = provider
        .get_weather(&LocationQuery::new("London", "GB"))
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Timeout));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let provider = ProxyProvider::new("http://127.0.0.1:1", Duration::from_secs(2))
        .expect("client");
    let err = provider
        .get_weather(&LocationQuery::new("London", "GB"))
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Network(_)));
}

// ============================================================================
// OpenWeather
// ============================================================================

#[tokio::test]
async fn openweather_uses_q_and_appid() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London,GB"))
        .and(query_param("appid", "TEST_KEY"))
        .and(header("cache-control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_json(london_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new("TEST_KEY".into(), server.uri(), Duration::from_secs(2))
        .expect("client");
    let reading = provider
        .get_weather(&LocationQuery::new("London", "GB"))
        .await
        .expect("lookup should succeed");

    assert_eq!(reading.temperature_kelvin, 283.15);
    assert_eq!(reading.condition_main, "Clear");
}

#[tokio::test]
async fn openweather_unauthorized_maps_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&server)
        .await;

    let provider = OpenWeatherProvider::new("BAD".into(), server.uri(), Duration::from_secs(2))
        .expect("client");
    let err = provider
        .get_weather(&LocationQuery::new("London", "GB"))
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Status { status: 401, .. }));
}
