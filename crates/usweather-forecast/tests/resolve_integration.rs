//! Integration tests for the resolution pipeline using wiremock.
//!
//! One mock server plays geocode.xyz and api.weather.gov at once.

use std::time::Duration;

use usweather_forecast::{
    presentation, ClientSettings, FailurePolicy, RelativeLocation, Resolution, ResolveError,
    ResolvedResult, Resolver, SearchSession, Variant, ViewPhase,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocode_body(latt: serde_json::Value, longt: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "standard": { "city": "Lawrence", "prov": "US", "confidence": "0.8" },
        "latt": latt,
        "longt": longt
    })
}

fn points_body(server: &MockServer) -> serde_json::Value {
    serde_json::json!({
        "id": "https://api.weather.gov/points/38.9717,-95.2353",
        "properties": {
            "gridId": "TOP",
            "gridX": 31,
            "gridY": 80,
            "forecast": format!("{}/gridpoints/TOP/31,80/forecast", server.uri()),
            "relativeLocation": {
                "type": "Feature",
                "properties": {
                    "city": "Lawrence",
                    "state": "KS",
                    "distance": { "unitCode": "wmoUnit:m", "value": 1234.5 }
                }
            }
        }
    })
}

fn period(number: u32, name: &str, start: &str, temp: i64, short: &str) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "name": name,
        "startTime": start,
        "isDaytime": !name.contains("ight"),
        "temperature": temp,
        "temperatureUnit": "F",
        "icon": format!("https://api.weather.gov/icons/land/day/{}", number),
        "shortForecast": short,
        "detailedForecast": format!("{}. Details.", short)
    })
}

fn forecast_body() -> serde_json::Value {
    serde_json::json!({
        "properties": {
            "updateTime": "2024-03-05T14:05:00-06:00",
            "periods": [
                period(1, "This Afternoon", "2024-03-05T14:00:00-06:00", 62, "Mostly Sunny"),
                period(2, "Tonight", "2024-03-05T18:00:00-06:00", 41, "Chance Rain Showers"),
                period(3, "Wednesday", "2024-03-06T06:00:00-06:00", 58, "Rain Likely"),
            ]
        }
    })
}

async fn mount_geocode(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/66044"))
        .and(query_param("json", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_points(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/points/38.9717,-95.2353"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/gridpoints/TOP/31,80/forecast"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_happy_path(server: &MockServer) {
    mount_geocode(server, geocode_body("38.97170".into(), "-95.23530".into())).await;
    mount_points(server, ResponseTemplate::new(200).set_body_json(points_body(server))).await;
    mount_forecast(server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;
}

fn resolver(server: &MockServer, variant: Variant) -> Resolver {
    Resolver::new(&ClientSettings::with_base_url(&server.uri()), &variant.profile()).unwrap()
}

#[tokio::test]
async fn test_resolve_success() {
    let server = MockServer::start().await;
    mount_happy_path(&server).await;

    let resolved = match resolver(&server, Variant::B).resolve("66044").await {
        Resolution::Success(r) => r,
        other => panic!("expected success, got {:?}", other),
    };

    assert_eq!(
        resolved.location,
        RelativeLocation {
            city: "Lawrence".into(),
            state: "KS".into()
        }
    );
    assert_eq!(resolved.forecast.periods.len(), 3);
    assert_eq!(resolved.forecast.periods[0].name, "This Afternoon");
    assert!(resolved.forecast.update_time.is_some());
}

#[tokio::test]
async fn test_resolve_sends_region_for_variant_a() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/66044"))
        .and(query_param("region", "'US'"))
        .and(query_param("json", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocode_body("38.97170".into(), "-95.23530".into())),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_points(&server, ResponseTemplate::new(200).set_body_json(points_body(&server))).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;

    let resolution = resolver(&server, Variant::A).resolve("66044").await;
    assert!(resolution.is_success());
}

#[tokio::test]
async fn test_numeric_coordinates_accepted() {
    let server = MockServer::start().await;
    mount_geocode(&server, geocode_body(38.9717.into(), (-95.2353).into())).await;
    mount_points(&server, ResponseTemplate::new(200).set_body_json(points_body(&server))).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;

    assert!(resolver(&server, Variant::C).resolve("66044").await.is_success());
}

#[tokio::test]
async fn test_short_query_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert_eq!(resolver(&server, Variant::A).resolve("K").await, Resolution::Empty);
    assert_eq!(resolver(&server, Variant::B).resolve("KS").await, Resolution::Empty);
    assert_eq!(resolver(&server, Variant::B).resolve("").await, Resolution::Empty);
}

#[tokio::test]
async fn test_non_numeric_geocode_fails_before_gridpoint() {
    let server = MockServer::start().await;
    mount_geocode(
        &server,
        serde_json::json!({
            "latt": "Throttled! See geocode.xyz/pricing",
            "longt": "Throttled! See geocode.xyz/pricing"
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/points/38.9717,-95.2353"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let resolution = resolver(&server, Variant::A).resolve("66044").await;
    assert!(matches!(
        resolution,
        Resolution::Failure(ResolveError::GeocodeFailure(_))
    ));
}

#[tokio::test]
async fn test_missing_geocode_fields_fail() {
    let server = MockServer::start().await;
    mount_geocode(
        &server,
        serde_json::json!({ "error": { "code": "018", "description": "No result" } }),
    )
    .await;

    let resolution = resolver(&server, Variant::A).resolve("66044").await;
    assert!(matches!(
        resolution,
        Resolution::Failure(ResolveError::GeocodeFailure(_))
    ));
}

#[tokio::test]
async fn test_gridpoint_without_properties_fails() {
    let server = MockServer::start().await;
    mount_geocode(&server, geocode_body("38.97170".into(), "-95.23530".into())).await;
    mount_points(
        &server,
        ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "title": "Data Unavailable For Requested Point",
            "status": 404
        })),
    )
    .await;

    let resolution = resolver(&server, Variant::A).resolve("66044").await;
    assert!(matches!(
        resolution,
        Resolution::Failure(ResolveError::GridpointLookupFailure(_))
    ));
}

#[tokio::test]
async fn test_gridpoint_without_forecast_url_fails() {
    let server = MockServer::start().await;
    mount_geocode(&server, geocode_body("38.97170".into(), "-95.23530".into())).await;
    mount_points(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": {
                "forecast": null,
                "relativeLocation": { "properties": { "city": "Lawrence", "state": "KS" } }
            }
        })),
    )
    .await;

    let resolution = resolver(&server, Variant::A).resolve("66044").await;
    assert_eq!(
        resolution,
        Resolution::Failure(ResolveError::NoForecastEndpoint)
    );
}

#[tokio::test]
async fn test_forecast_server_error_fails() {
    let server = MockServer::start().await;
    mount_geocode(&server, geocode_body("38.97170".into(), "-95.23530".into())).await;
    mount_points(&server, ResponseTemplate::new(200).set_body_json(points_body(&server))).await;
    mount_forecast(
        &server,
        ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "title": "Unexpected Problem",
            "status": 500
        })),
    )
    .await;

    let resolution = resolver(&server, Variant::A).resolve("66044").await;
    assert!(matches!(
        resolution,
        Resolution::Failure(ResolveError::ForecastFetchFailure(_))
    ));
}

#[tokio::test]
async fn test_forecast_non_json_body_fails() {
    let server = MockServer::start().await;
    mount_geocode(&server, geocode_body("38.97170".into(), "-95.23530".into())).await;
    mount_points(&server, ResponseTemplate::new(200).set_body_json(points_body(&server))).await;
    mount_forecast(
        &server,
        ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"),
    )
    .await;

    let resolution = resolver(&server, Variant::A).resolve("66044").await;
    assert!(matches!(
        resolution,
        Resolution::Failure(ResolveError::ForecastFetchFailure(_))
    ));
}

#[tokio::test]
async fn test_unreachable_service_is_a_failure_not_a_panic() {
    let settings = ClientSettings {
        timeout: Duration::from_secs(2),
        ..ClientSettings::with_base_url("http://127.0.0.1:1")
    };
    let resolver = Resolver::new(&settings, &Variant::A.profile()).unwrap();

    let resolution = resolver.resolve("66044").await;
    assert!(matches!(
        resolution,
        Resolution::Failure(ResolveError::Network(_))
    ));
}

#[tokio::test]
async fn test_slow_geocoder_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/66044"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocode_body("38.97170".into(), "-95.23530".into()))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        timeout: Duration::from_millis(200),
        ..ClientSettings::with_base_url(&server.uri())
    };
    let resolver = Resolver::new(&settings, &Variant::A.profile()).unwrap();

    assert_eq!(
        resolver.try_resolve("66044").await.unwrap_err(),
        ResolveError::Timeout
    );
}

#[tokio::test]
async fn test_repeated_queries_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/66044"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocode_body("38.97170".into(), "-95.23530".into())),
        )
        .expect(2)
        .mount(&server)
        .await;
    mount_points(&server, ResponseTemplate::new(200).set_body_json(points_body(&server))).await;
    mount_forecast(&server, ResponseTemplate::new(200).set_body_json(forecast_body())).await;

    let resolver = resolver(&server, Variant::B);
    assert!(resolver.resolve("66044").await.is_success());
    assert!(resolver.resolve("66044").await.is_success());
}

#[tokio::test]
async fn test_session_to_presentation() {
    let server = MockServer::start().await;
    mount_happy_path(&server).await;

    let profile = Variant::B.profile();
    let resolver = resolver(&server, Variant::B);
    let session = SearchSession::new(resolver, Duration::from_millis(50), FailurePolicy::Swallow);
    let mut rx = session.subscribe();

    session.input("66044");
    let snapshot = rx
        .wait_for(|s| s.is_settled(1))
        .await
        .unwrap()
        .clone();
    assert_eq!(snapshot.phase, ViewPhase::Success);

    let model = presentation::build(snapshot.result.as_ref(), profile.presentation());
    assert_eq!(model.location_label, "Lawrence, KS");
    assert_eq!(model.update_time_label.as_deref(), Some("updated 2:05 PM"));
    assert_eq!(
        model.today.as_ref().and_then(|t| t.icon.as_deref()),
        Some("/Sun.svg")
    );
    // daytime-only rule drops "Tonight"
    let names: Vec<_> = model.extended.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["This Afternoon", "Wednesday"]);
    assert_eq!(model.extended[1].icon.as_deref(), Some("/Typhoon.svg"));
    assert_eq!(model.extended[1].day_label.as_deref(), Some("Wednesday 6th"));

    session.shutdown().await;
}

#[tokio::test]
async fn test_session_banner_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nowhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let session = SearchSession::new(
        resolver(&server, Variant::A),
        Duration::from_millis(50),
        FailurePolicy::ShowBanner,
    );
    let mut rx = session.subscribe();

    let seq = session.search_now("nowhere");
    let snapshot = rx.wait_for(|s| s.is_settled(seq)).await.unwrap().clone();

    assert_eq!(snapshot.phase, ViewPhase::Error);
    assert_eq!(
        snapshot.result,
        Some(ResolvedResult::Error(
            "Forecast for Location not Found".to_string()
        ))
    );
}
