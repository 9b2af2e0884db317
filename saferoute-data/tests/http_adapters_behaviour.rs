//! Behavioural tests for the HTTP adapters against a canned local server.

mod support;

use std::cell::RefCell;

use geo::{Coord, Rect};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use saferoute_core::{
    CandidateRoute, Geocoder, PlaceSuggestion, PoiCategory, PoiProvider, PointOfInterest,
    ProviderError, RoutingProvider, TravelProfile,
};
use saferoute_data::{
    GeocoderConfig, HttpAdapterConfig, HttpGeocoder, OsrmRoutingProvider, OverpassPoiProvider,
};
use support::{CannedServer, block_on};

const START: Coord<f64> = Coord { x: 77.5946, y: 12.9716 };
const END: Coord<f64> = Coord { x: 77.6408, y: 12.9784 };

const TWO_ROUTES: &str = r#"{
    "code": "Ok",
    "routes": [
        {"distance": 5200.0, "duration": 720.0,
         "geometry": {"type": "LineString", "coordinates": [[77.5946, 12.9716], [77.6408, 12.9784]]}},
        {"distance": 4900.0, "duration": 840.0,
         "geometry": {"type": "LineString", "coordinates": [[77.5946, 12.9716], [77.62, 12.99], [77.6408, 12.9784]]}}
    ]
}"#;

const NO_ROUTE: &str = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;

const POLICE_STATIONS: &str = r#"{
    "elements": [
        {"type": "node", "id": 101, "lat": 12.975, "lon": 77.60, "tags": {"amenity": "police", "name": "Cubbon Park Police"}},
        {"type": "node", "id": 102, "lat": 12.977, "lon": 77.62, "tags": {"amenity": "police"}},
        {"type": "way", "id": 103, "tags": {"amenity": "police"}}
    ]
}"#;

const RATE_LIMITED: &str = r#"{"remark": "rate limited"}"#;

const REVERSE: &str = r#"{"display_name": "MG Road, Shanthala Nagar, Bengaluru, Karnataka, India"}"#;

const MIXED_PLACES: &str = r#"{"results": [
    {"name": "Delhi", "latitude": 28.65, "longitude": 77.23, "country_code": "IN", "country": "India", "admin1": "Delhi"},
    {"name": "Delhi", "latitude": 42.27, "longitude": -74.91, "country_code": "US", "country": "United States", "admin1": "New York"},
    {"name": "Delhi Cantonment", "latitude": 28.59, "longitude": 77.13, "country_code": "IN", "country": "India"}
]}"#;

#[derive(Debug, PartialEq, Eq)]
enum Upstream {
    Osrm,
    Overpass,
    Nominatim,
    OpenMeteo,
}

#[derive(Debug)]
enum Outcome {
    Routes(Result<Vec<CandidateRoute>, ProviderError>),
    Pois(Result<Vec<PointOfInterest>, ProviderError>),
    Label(Result<String, ProviderError>),
    Suggestions(Result<Vec<PlaceSuggestion>, ProviderError>),
}

#[derive(Debug, Default)]
struct AdapterContext {
    upstream: RefCell<Option<(Upstream, u16, &'static str)>>,
    request_lines: RefCell<Vec<String>>,
    outcome: RefCell<Option<Outcome>>,
}

impl AdapterContext {
    fn serve(&self, upstream: Upstream, status: u16, body: &'static str) {
        *self.upstream.borrow_mut() = Some((upstream, status, body));
    }

    /// Start the configured upstream, run `request` against its base URL,
    /// and keep the outcome together with the request lines it received.
    fn exchange<F, Fut>(&self, expected: Upstream, request: F)
    where
        F: FnOnce(String) -> Fut,
        Fut: std::future::Future<Output = Outcome>,
    {
        let (upstream, status, body) = self
            .upstream
            .borrow_mut()
            .take()
            .expect("an upstream must be configured first");
        assert_eq!(upstream, expected, "step targets a different upstream");
        let (outcome, lines) = block_on(async {
            let server = CannedServer::start(status, body).await;
            let outcome = request(server.base_url.clone()).await;
            (outcome, server.request_lines())
        });
        *self.request_lines.borrow_mut() = lines;
        *self.outcome.borrow_mut() = Some(outcome);
    }

    fn take_outcome(&self) -> Outcome {
        self.outcome
            .borrow_mut()
            .take()
            .expect("a request must be made first")
    }
}

#[fixture]
fn adapter_context() -> AdapterContext {
    AdapterContext::default()
}

fn expect_error(outcome: Outcome) -> ProviderError {
    match outcome {
        Outcome::Routes(result) => result.expect_err("routing should fail"),
        Outcome::Pois(result) => result.expect_err("amenity query should fail"),
        Outcome::Label(result) => result.expect_err("reverse geocoding should fail"),
        Outcome::Suggestions(result) => result.expect_err("suggestions should fail"),
    }
}

// --- Given steps ---

#[given("an OSRM server returning two routes")]
fn osrm_two_routes(#[from(adapter_context)] ctx: &AdapterContext) {
    ctx.serve(Upstream::Osrm, 200, TWO_ROUTES);
}

#[given("an OSRM server reporting no route")]
fn osrm_no_route(#[from(adapter_context)] ctx: &AdapterContext) {
    ctx.serve(Upstream::Osrm, 200, NO_ROUTE);
}

#[given("an Overpass server returning police stations")]
fn overpass_police(#[from(adapter_context)] ctx: &AdapterContext) {
    ctx.serve(Upstream::Overpass, 200, POLICE_STATIONS);
}

#[given("an Overpass server that is rate limited")]
fn overpass_rate_limited(#[from(adapter_context)] ctx: &AdapterContext) {
    ctx.serve(Upstream::Overpass, 429, RATE_LIMITED);
}

#[given("a Nominatim server with a reverse result")]
fn nominatim_reverse(#[from(adapter_context)] ctx: &AdapterContext) {
    ctx.serve(Upstream::Nominatim, 200, REVERSE);
}

#[given("an Open-Meteo server returning places in two countries")]
fn open_meteo_mixed(#[from(adapter_context)] ctx: &AdapterContext) {
    ctx.serve(Upstream::OpenMeteo, 200, MIXED_PLACES);
}

// --- When steps ---

#[when("I request driving routes with alternatives")]
fn request_routes(#[from(adapter_context)] ctx: &AdapterContext) {
    ctx.exchange(Upstream::Osrm, |base_url| async move {
        let provider = OsrmRoutingProvider::new(base_url).expect("provider should build");
        Outcome::Routes(
            provider
                .route(&[START, END], TravelProfile::Driving, true)
                .await,
        )
    });
}

#[when("I query police stations in the area")]
fn query_police(#[from(adapter_context)] ctx: &AdapterContext) {
    ctx.exchange(Upstream::Overpass, |base_url| async move {
        let provider = OverpassPoiProvider::new(format!("{base_url}/api/interpreter"))
            .expect("provider should build");
        let bbox = Rect::new(START, END);
        Outcome::Pois(provider.query(&bbox, PoiCategory::Police).await)
    });
}

#[when("I reverse geocode a coordinate")]
fn reverse_geocode(#[from(adapter_context)] ctx: &AdapterContext) {
    ctx.exchange(Upstream::Nominatim, |base_url| async move {
        let config = GeocoderConfig::default().with_http(HttpAdapterConfig::new(base_url));
        let geocoder = HttpGeocoder::with_config(config).expect("geocoder should build");
        Outcome::Label(geocoder.reverse_geocode(START).await)
    });
}

#[when("I ask for suggestions for \"Delhi\"")]
fn suggest_delhi(#[from(adapter_context)] ctx: &AdapterContext) {
    ctx.exchange(Upstream::OpenMeteo, |base_url| async move {
        let config = GeocoderConfig::default().with_suggest_url(base_url);
        let geocoder = HttpGeocoder::with_config(config).expect("geocoder should build");
        Outcome::Suggestions(geocoder.suggest("Delhi").await)
    });
}

// --- Then steps ---

#[then("2 candidate routes are returned")]
fn two_routes(#[from(adapter_context)] ctx: &AdapterContext) {
    let Outcome::Routes(result) = ctx.take_outcome() else {
        panic!("expected a routing outcome");
    };
    let routes = result.expect("routing should succeed");
    assert_eq!(routes.len(), 2);
    let first = routes.first().expect("first route");
    assert_eq!(first.distance_meters(), 5_200.0);
    assert_eq!(first.duration_seconds(), 720.0);
    assert_eq!(first.geometry().0.len(), 2);
}

#[then("the upstream saw a driving route request with alternatives")]
fn saw_driving_request(#[from(adapter_context)] ctx: &AdapterContext) {
    let lines = ctx.request_lines.borrow();
    let line = lines.first().expect("one request recorded");
    assert!(
        line.starts_with("GET /route/v1/driving/77.5946,12.9716;77.6408,12.9784?"),
        "unexpected request line: {line}"
    );
    assert!(line.contains("alternatives=true"), "unexpected request line: {line}");
    assert!(line.contains("geometries=geojson"), "unexpected request line: {line}");
}

#[then("a service error with code \"NoRoute\" is returned")]
fn no_route_error(#[from(adapter_context)] ctx: &AdapterContext) {
    match expect_error(ctx.take_outcome()) {
        ProviderError::Service { code, .. } => assert_eq!(code, "NoRoute"),
        other => panic!("expected a service error, got {other:?}"),
    }
}

#[then("2 amenities are returned")]
fn two_amenities(#[from(adapter_context)] ctx: &AdapterContext) {
    let Outcome::Pois(result) = ctx.take_outcome() else {
        panic!("expected an amenity outcome");
    };
    let pois = result.expect("amenity query should succeed");
    let ids: Vec<u64> = pois.iter().map(|poi| poi.id).collect();
    assert_eq!(ids, vec![101, 102]);
    let named = pois.first().expect("first amenity");
    assert_eq!(named.name.as_deref(), Some("Cubbon Park Police"));
    assert_eq!(named.category, PoiCategory::Police);
}

#[then("the upstream saw an encoded Overpass query")]
fn saw_overpass_query(#[from(adapter_context)] ctx: &AdapterContext) {
    let lines = ctx.request_lines.borrow();
    let line = lines.first().expect("one request recorded");
    assert!(
        line.starts_with("GET /api/interpreter?data="),
        "unexpected request line: {line}"
    );
    assert!(line.contains("police"), "unexpected request line: {line}");
}

#[then("an HTTP error with status 429 is returned")]
fn rate_limited_error(#[from(adapter_context)] ctx: &AdapterContext) {
    match expect_error(ctx.take_outcome()) {
        ProviderError::Http { status, .. } => assert_eq!(status, 429),
        other => panic!("expected an HTTP error, got {other:?}"),
    }
}

#[then("the label \"MG Road\" is returned")]
fn mg_road_label(#[from(adapter_context)] ctx: &AdapterContext) {
    let Outcome::Label(result) = ctx.take_outcome() else {
        panic!("expected a label outcome");
    };
    assert_eq!(result.expect("reverse geocoding should succeed"), "MG Road");
    let lines = ctx.request_lines.borrow();
    let line = lines.first().expect("one request recorded");
    assert!(line.starts_with("GET /reverse?format=json&lat=12.9716&lon=77.5946"));
}

#[then("only Indian suggestions are returned")]
fn indian_suggestions(#[from(adapter_context)] ctx: &AdapterContext) {
    let Outcome::Suggestions(result) = ctx.take_outcome() else {
        panic!("expected a suggestion outcome");
    };
    let suggestions = result.expect("suggestions should succeed");
    let labels: Vec<String> = suggestions.iter().map(PlaceSuggestion::label).collect();
    assert_eq!(labels, vec!["Delhi, Delhi, India", "Delhi Cantonment, India"]);
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $index:literal) => {
        #[scenario(path = "tests/features/http_adapters.feature", index = $index)]
        fn $fn_name(adapter_context: AdapterContext) {
            let _ = adapter_context;
        }
    };
}

register_scenario!(osrm_alternative_routes, 0);
register_scenario!(osrm_no_route_reported, 1);
register_scenario!(overpass_police_stations, 2);
register_scenario!(overpass_rate_limited_reported, 3);
register_scenario!(nominatim_reverse_label, 4);
register_scenario!(open_meteo_country_filter, 5);
