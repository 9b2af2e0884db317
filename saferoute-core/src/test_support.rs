//! Deterministic adapter doubles used by unit and behaviour tests.
//!
//! Each stub records the requests it receives so tests can assert on the
//! composer's call sequence.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use geo::{Coord, Rect};

use crate::{
    CandidateRoute, Geocoder, PlaceSuggestion, PoiCategory, PoiProvider, PointOfInterest,
    ProviderError, RoutingProvider, TravelProfile, UNKNOWN_LOCATION,
};

/// Build a two-point candidate route from `start` to `end`.
pub fn straight_route(
    start: Coord<f64>,
    end: Coord<f64>,
    distance_meters: f64,
    duration_seconds: f64,
) -> CandidateRoute {
    CandidateRoute::straight(start, end, distance_meters, duration_seconds)
}

/// A request received by [`StubRoutingProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCall {
    /// Waypoints in request order.
    pub waypoints: Vec<Coord<f64>>,
    /// Requested profile.
    pub profile: TravelProfile,
    /// Whether alternatives were requested.
    pub alternatives: bool,
}

/// Routing double answering from fixed candidate lists.
///
/// Requests with three waypoints receive the detour list. Two-waypoint
/// requests are answered by profile, with walking split on the
/// alternatives flag.
#[derive(Debug, Default)]
pub struct StubRoutingProvider {
    driving: Vec<CandidateRoute>,
    walking: Vec<CandidateRoute>,
    walking_alternatives: Vec<CandidateRoute>,
    detour: Vec<CandidateRoute>,
    error: Option<ProviderError>,
    calls: Mutex<Vec<RouteCall>>,
}

impl StubRoutingProvider {
    /// Answer driving requests with `routes`.
    #[must_use]
    pub fn with_driving(mut self, routes: Vec<CandidateRoute>) -> Self {
        self.driving = routes;
        self
    }

    /// Answer walking requests without alternatives with `routes`.
    #[must_use]
    pub fn with_walking(mut self, routes: Vec<CandidateRoute>) -> Self {
        self.walking = routes;
        self
    }

    /// Answer walking requests with alternatives with `routes`.
    #[must_use]
    pub fn with_walking_alternatives(mut self, routes: Vec<CandidateRoute>) -> Self {
        self.walking_alternatives = routes;
        self
    }

    /// Answer three-waypoint requests with `routes`.
    #[must_use]
    pub fn with_detour(mut self, routes: Vec<CandidateRoute>) -> Self {
        self.detour = routes;
        self
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn with_error(mut self, error: ProviderError) -> Self {
        self.error = Some(error);
        self
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<RouteCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RoutingProvider for StubRoutingProvider {
    async fn route(
        &self,
        waypoints: &[Coord<f64>],
        profile: TravelProfile,
        alternatives: bool,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RouteCall {
                waypoints: waypoints.to_vec(),
                profile,
                alternatives,
            });
        }
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        let routes = match (waypoints.len(), profile, alternatives) {
            (3, _, _) => &self.detour,
            (_, TravelProfile::Driving, _) => &self.driving,
            (_, TravelProfile::Walking, false) => &self.walking,
            (_, TravelProfile::Walking, true) => &self.walking_alternatives,
        };
        Ok(routes.clone())
    }
}

#[derive(Debug, Clone)]
enum StubPoiResponse {
    Pois(Vec<PointOfInterest>),
    Error(ProviderError),
    Delayed(Duration),
}

/// Amenity double answering per category.
///
/// Categories without a configured response return no amenities.
#[derive(Debug, Default)]
pub struct StubPoiProvider {
    responses: HashMap<PoiCategory, StubPoiResponse>,
    queries: Mutex<Vec<(Rect<f64>, PoiCategory)>>,
}

impl StubPoiProvider {
    /// Answer `category` with `pois`.
    #[must_use]
    pub fn with_pois(mut self, category: PoiCategory, pois: Vec<PointOfInterest>) -> Self {
        self.responses.insert(category, StubPoiResponse::Pois(pois));
        self
    }

    /// Answer `category` with `count` amenities located at `location`.
    #[must_use]
    pub fn with_count(self, category: PoiCategory, count: u64, location: Coord<f64>) -> Self {
        let pois = (1..=count)
            .map(|id| PointOfInterest::new(id, location, category))
            .collect();
        self.with_pois(category, pois)
    }

    /// Fail `category` with `error`.
    #[must_use]
    pub fn with_error(mut self, category: PoiCategory, error: ProviderError) -> Self {
        self.responses
            .insert(category, StubPoiResponse::Error(error));
        self
    }

    /// Answer `category` with no amenities after sleeping for `delay`.
    #[must_use]
    pub fn with_delay(mut self, category: PoiCategory, delay: Duration) -> Self {
        self.responses
            .insert(category, StubPoiResponse::Delayed(delay));
        self
    }

    /// Boxes and categories queried so far, in order of arrival.
    pub fn queries(&self) -> Vec<(Rect<f64>, PoiCategory)> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PoiProvider for StubPoiProvider {
    async fn query(
        &self,
        bbox: &Rect<f64>,
        category: PoiCategory,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((*bbox, category));
        }
        match self.responses.get(&category) {
            None => Ok(Vec::new()),
            Some(StubPoiResponse::Pois(pois)) => Ok(pois.clone()),
            Some(StubPoiResponse::Error(error)) => Err(error.clone()),
            Some(StubPoiResponse::Delayed(delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(Vec::new())
            }
        }
    }
}

/// Geocoding double with fixed answers.
#[derive(Debug, Default)]
pub struct StubGeocoder {
    suggestions: Vec<PlaceSuggestion>,
    location: Option<Coord<f64>>,
    places: HashMap<String, Coord<f64>>,
    label: Option<String>,
    error: Option<ProviderError>,
    calls: AtomicUsize,
}

impl StubGeocoder {
    /// Answer suggestion requests with `suggestions`.
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Vec<PlaceSuggestion>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Answer forward lookups with `location`.
    #[must_use]
    pub fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Answer forward lookups for exactly `query` with `location`.
    #[must_use]
    pub fn with_place(mut self, query: impl Into<String>, location: Coord<f64>) -> Self {
        self.places.insert(query.into(), location);
        self
    }

    /// Answer reverse lookups with `label`.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn with_error(mut self, error: ProviderError) -> Self {
        self.error = Some(error);
        self
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.error.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn suggest(&self, _query: &str) -> Result<Vec<PlaceSuggestion>, ProviderError> {
        self.record()?;
        Ok(self.suggestions.clone())
    }

    async fn geocode(&self, query: &str) -> Result<Option<Coord<f64>>, ProviderError> {
        self.record()?;
        Ok(self.places.get(query).copied().or(self.location))
    }

    async fn reverse_geocode(&self, _location: Coord<f64>) -> Result<String, ProviderError> {
        self.record()?;
        Ok(self
            .label
            .clone()
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_owned()))
    }
}
