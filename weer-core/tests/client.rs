//! Integration tests for WeatherClient against a wiremock provider.

use chrono::Timelike;
use weer_core::{
    NotFoundReason, ProviderSettings, WeatherClient, WeatherError, present, select_daily_forecast,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WeatherClient {
    WeatherClient::new(ProviderSettings {
        api_key: "TEST_KEY".into(),
        base_url: server.uri(),
        lang: "nl".into(),
    })
    .expect("client builds")
}

fn utrecht_current() -> serde_json::Value {
    serde_json::json!({
        "main": { "temp": 21.3, "feels_like": 20.0, "humidity": 55 },
        "wind": { "speed": 3.2 },
        "weather": [{ "description": "bewolkt" }],
        "sys": { "sunrise": 1700000000, "sunset": 1700030000 },
        "dt": 1700010000,
        "coord": { "lat": 52.1, "lon": 5.1 }
    })
}

/// Five days of 3-hourly entries starting at 2023-11-15 00:00 UTC.
fn forecast_body() -> serde_json::Value {
    let start = 1700006400_i64;
    let list: Vec<serde_json::Value> = (0..40)
        .map(|i| {
            let temp = 5.0 + i as f64 * 0.25;
            serde_json::json!({
                "dt": start + i * 3 * 3600,
                "main": { "temp": temp, "feels_like": 4.0, "humidity": 80 },
                "weather": [{ "description": "lichte regen" }],
                "dt_txt": "ignored"
            })
        })
        .collect();

    serde_json::json!({ "city": { "name": "Utrecht", "country": "NL" }, "list": list })
}

#[tokio::test]
async fn fetch_current_maps_scenario_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Utrecht"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .and(query_param("lang", "nl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(utrecht_current()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server).fetch_current("Utrecht").await.unwrap();

    assert_eq!(snapshot.city, "Utrecht");
    assert_eq!(snapshot.temperature_celsius, 21.3);
    assert_eq!(snapshot.feels_like_celsius, 20.0);
    assert_eq!(snapshot.humidity_percent, 55);
    assert_eq!(snapshot.wind_speed_mps, 3.2);
    assert_eq!(snapshot.latitude, 52.1);
    assert_eq!(snapshot.longitude, 5.1);
    assert_eq!(snapshot.sunrise.timestamp(), 1700000000);
    assert_eq!(snapshot.sunset.timestamp(), 1700030000);
    assert_eq!(snapshot.observed_at.timestamp(), 1700010000);
    assert_eq!(present::weather_emoji(&snapshot.description), "☁️");
}

#[tokio::test]
async fn fetch_current_prefers_provider_city_name() {
    let server = MockServer::start().await;
    let mut body = utrecht_current();
    body["name"] = serde_json::json!("Utrecht");

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let snapshot = client_for(&server).fetch_current("utrecht").await.unwrap();
    assert_eq!(snapshot.city, "Utrecht");
}

#[tokio::test]
async fn non_200_is_not_found_whatever_the_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(500).set_body_json(utrecht_current()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.fetch_current("Utrecht").await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound { .. }));
    assert_eq!(err.reason(), NotFoundReason::Status(500));

    let err = client.fetch_forecast("Utrecht").await.unwrap_err();
    assert!(matches!(err, WeatherError::NotFound { .. }));
    assert_eq!(err.reason(), NotFoundReason::Status(401));
}

#[tokio::test]
async fn unknown_city_reports_city_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_current("Atlantis").await.unwrap_err();

    assert_eq!(err.reason(), NotFoundReason::UnknownCity);
    assert!(err.user_message().contains("Atlantis"));
}

#[tokio::test]
async fn malformed_success_body_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_current("Utrecht").await.unwrap_err();
    assert_eq!(err.reason(), NotFoundReason::Malformed);
}

#[tokio::test]
async fn partial_snapshot_is_not_found() {
    let server = MockServer::start().await;
    let mut body = utrecht_current();
    body.as_object_mut().unwrap().remove("coord");

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_current("Utrecht").await.unwrap_err();
    assert_eq!(err.reason(), NotFoundReason::Malformed);
}

#[tokio::test]
async fn unreachable_provider_is_not_found() {
    // Bind and release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let client = WeatherClient::new(ProviderSettings {
        api_key: "TEST_KEY".into(),
        base_url: format!("http://{addr}"),
        lang: "nl".into(),
    })
    .expect("client builds");

    let err = client.fetch_current("Utrecht").await.unwrap_err();
    assert_eq!(err.reason(), NotFoundReason::Transport);

    let err = client.fetch_forecast("Utrecht").await.unwrap_err();
    assert_eq!(err.reason(), NotFoundReason::Transport);
    assert!(err.user_message().contains("Utrecht"));
}

#[tokio::test]
async fn fetch_forecast_yields_daily_noon_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Utrecht"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let set = client_for(&server).fetch_forecast("Utrecht").await.unwrap();
    assert_eq!(set.city(), "Utrecht");
    assert_eq!(set.len(), 40);

    let daily = select_daily_forecast(set);

    assert_eq!(daily.len(), 5);
    assert!(daily.iter().all(|e| e.timestamp.hour() == 12));
    let dates: Vec<_> = daily.iter().map(|e| e.timestamp.date_naive()).collect();
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(present::format_day(daily.entries()[0].timestamp), "15-11");
}
