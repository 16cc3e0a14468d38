//! Integration tests for the screen controller against a mock HTTP server.

use cirrus_app::WeatherController;
use cirrus_core::fetch_state::FetchState;
use cirrus_store::{CityLists, MemoryStore};
use cirrus_weather::location::FixedLocation;
use cirrus_weather::{Coordinate, WeatherClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "current_weather": {
            "temperature": 15.2,
            "windspeed": 10.0,
            "weathercode": 1
        },
        "hourly": {
            "time": ["2024-01-01T00:00"],
            "temperature_2m": [12.0],
            "relativehumidity_2m": [63],
            "weathercode": [1]
        },
        "daily": {
            "time": ["2024-01-01"],
            "temperature_2m_max": [18.0],
            "temperature_2m_min": [10.0],
            "sunrise": ["2024-01-01T08:00"],
            "sunset": ["2024-01-01T17:00"],
            "weathercode": [1]
        }
    })
}

fn controller_for(server: &MockServer) -> WeatherController<MemoryStore> {
    let client = WeatherClient::with_endpoints(&server.uri(), &server.uri()).unwrap();
    WeatherController::new(client, CityLists::new(MemoryStore::new()))
}

async fn mount_paris(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "name": "Paris", "latitude": 48.85, "longitude": 2.35 }
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn search_loads_snapshot_and_records_recent() {
    let server = MockServer::start().await;
    mount_paris(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    let state = controller.search("  Paris  ").await;

    let snapshot = state.loaded().expect("state should be Loaded");
    assert_eq!(snapshot.current.location_name, "Paris");
    assert_eq!(snapshot.current.temperature_c, 15.2);

    assert_eq!(controller.lists().recent().unwrap(), vec!["Paris"]);
}

#[tokio::test]
async fn search_unknown_city_fails_with_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    let state = controller.search("Nonexistentville").await;

    assert_eq!(
        state.error(),
        Some("City not found. Check the spelling and try again.")
    );
    assert!(controller.lists().recent().unwrap().is_empty());
}

#[tokio::test]
async fn search_forecast_failure_is_terminal_but_city_was_recorded() {
    let server = MockServer::start().await;
    mount_paris(&server).await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    let state = controller.search("Paris").await;

    assert!(state.error().is_some());
    // Resolution succeeded before the forecast failed, so the city is
    // already in the recent list.
    assert_eq!(controller.lists().recent().unwrap(), vec!["Paris"]);
}

#[tokio::test]
async fn empty_search_is_ignored() {
    let server = MockServer::start().await;
    let mut controller = controller_for(&server);

    let state = controller.search("   ").await;
    assert_eq!(*state, FetchState::Idle);
}

#[tokio::test]
async fn locate_soft_fallback_uses_placeholder_and_skips_recents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    let source = FixedLocation(Coordinate::new(48.85, 2.35));
    let state = controller.locate(&source).await;

    let snapshot = state.loaded().expect("state should be Loaded");
    assert_eq!(snapshot.current.location_name, "Current Location");
    assert!(controller.lists().recent().unwrap().is_empty());
}

#[tokio::test]
async fn locate_with_name_records_recent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [ { "name": "Seattle" } ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    let source = FixedLocation(Coordinate::new(47.6062, -122.3321));
    let state = controller.locate(&source).await;

    let snapshot = state.loaded().expect("state should be Loaded");
    assert_eq!(snapshot.current.location_name, "Seattle");
    assert_eq!(controller.lists().recent().unwrap(), vec!["Seattle"]);
}

#[tokio::test]
async fn locate_reverse_failure_reports_locate_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut controller = controller_for(&server);
    let source = FixedLocation(Coordinate::new(48.85, 2.35));
    let state = controller.locate(&source).await;

    assert_eq!(state.error(), Some("Could not detect location weather."));
}
