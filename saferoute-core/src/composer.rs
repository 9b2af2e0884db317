//! Compose up to three categorised routes between two coordinates.
//!
//! The composer resolves a seed route for each [`RouteCategory`], scores
//! the area around the endpoints and emits the seeds in green, yellow, red
//! order. Missing seeds are omitted; no step raises an error to the caller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::future::join_all;
use geo::{Coord, Rect};
use log::{debug, info, warn};
use tokio::time::timeout;

use crate::bounds::{great_circle_km, padded_bounds};
use crate::density::{self, PoiProvider};
use crate::routing::{RoutingProvider, TravelProfile, detoured_route, routes_between};
use crate::safety::{AreaSafetyContext, DEFAULT_AREA_SCORE, category_score};
use crate::{AreaScan, CandidateRoute, PoiCategory, RouteCategory, ScoredRoute};

/// Tunables for [`RouteComposer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposerConfig {
    /// Deadline applied to each amenity lookup.
    pub poi_timeout: Duration,
    /// Fraction of the endpoint box span added on every side before
    /// counting amenities.
    pub bounds_padding: f64,
    /// Perpendicular offset used for the synthetic shortcut.
    pub detour_deviation: f64,
    /// Area score used when every amenity lookup fails.
    pub fallback_area_score: u8,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            poi_timeout: Duration::from_secs(3),
            bounds_padding: 0.2,
            detour_deviation: 0.6,
            fallback_area_score: DEFAULT_AREA_SCORE,
        }
    }
}

/// Routes produced by a single [`RouteComposer::find_routes`] call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct RouteSet {
    /// Request generation; compare with [`RouteComposer::is_latest`].
    pub generation: u64,
    /// Area base score the route scores were derived from.
    pub area_base_score: u8,
    /// Scored routes ordered green, yellow, red, skipping absent ones.
    pub routes: Vec<ScoredRoute>,
}

impl RouteSet {
    /// Return the route in the `category` slot, if one was resolved.
    pub fn get(&self, category: RouteCategory) -> Option<&ScoredRoute> {
        self.routes.iter().find(|route| route.category == category)
    }

    /// Categories present in the set, in order.
    pub fn categories(&self) -> Vec<RouteCategory> {
        self.routes.iter().map(|route| route.category).collect()
    }
}

/// Orchestrates routing and amenity lookups into a [`RouteSet`].
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use saferoute_core::RouteComposer;
/// use saferoute_core::test_support::{StubPoiProvider, StubRoutingProvider, straight_route};
///
/// let start = Coord { x: 77.59, y: 12.97 };
/// let end = Coord { x: 77.64, y: 12.93 };
/// let routing = StubRoutingProvider::default()
///     .with_driving(vec![straight_route(start, end, 6_000.0, 900.0)]);
/// let composer = RouteComposer::new(routing, StubPoiProvider::default());
///
/// let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
/// let set = runtime.block_on(composer.find_routes(start, end));
/// assert!(composer.is_latest(set.generation));
/// assert_eq!(set.routes.len(), 1);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct RouteComposer<R, P> {
    routing: R,
    pois: P,
    config: ComposerConfig,
    generation: AtomicU64,
}

impl<R, P> RouteComposer<R, P>
where
    R: RoutingProvider,
    P: PoiProvider,
{
    /// Create a composer with the default [`ComposerConfig`].
    pub fn new(routing: R, pois: P) -> Self {
        Self::with_config(routing, pois, ComposerConfig::default())
    }

    /// Create a composer with explicit tunables.
    pub fn with_config(routing: R, pois: P, config: ComposerConfig) -> Self {
        Self {
            routing,
            pois,
            config,
            generation: AtomicU64::new(0),
        }
    }

    /// Active tunables.
    pub const fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Underlying routing provider.
    pub const fn routing(&self) -> &R {
        &self.routing
    }

    /// Underlying amenity provider.
    pub const fn pois(&self) -> &P {
        &self.pois
    }

    /// Report whether `generation` belongs to the most recent
    /// [`find_routes`](Self::find_routes) call.
    ///
    /// Results from older generations are stale and should be discarded.
    pub fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Resolve up to three categorised routes from `start` to `end`.
    ///
    /// Coordinates use `x = longitude` and `y = latitude`.
    pub async fn find_routes(&self, start: Coord<f64>, end: Coord<f64>) -> RouteSet {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            "route request {generation}: ({}, {}) -> ({}, {})",
            start.y, start.x, end.y, end.x
        );

        let mut driving =
            routes_between(&self.routing, start, end, TravelProfile::Driving, true).await;
        driving.sort_by(|a, b| a.duration_seconds().total_cmp(&b.duration_seconds()));
        let mut driving = driving.into_iter();
        let main = driving.next();
        let mut shortcut = driving.next();

        let walker = routes_between(&self.routing, start, end, TravelProfile::Walking, false)
            .await
            .into_iter()
            .next();

        let area_base_score = self.assess_area(start, end).await;

        if shortcut.is_none() {
            shortcut = routes_between(&self.routing, start, end, TravelProfile::Walking, true)
                .await
                .into_iter()
                .nth(1);
        }
        if shortcut.is_none() && main.is_some() {
            shortcut = detoured_route(
                &self.routing,
                start,
                end,
                TravelProfile::Walking,
                self.config.detour_deviation,
            )
            .await;
        }

        if let (Some(main), Some(walker)) = (&main, &walker)
            && main.geometry() == walker.geometry()
        {
            debug!("route request {generation}: walking route duplicates the main route");
        }

        let routes: Vec<ScoredRoute> = [
            (RouteCategory::Green, main),
            (RouteCategory::Yellow, walker),
            (RouteCategory::Red, shortcut),
        ]
        .into_iter()
        .filter_map(|(category, seed)| seed.map(|candidate| (category, candidate)))
        .map(|(category, candidate)| score(category, &candidate, area_base_score))
        .collect();

        info!(
            "route request {generation}: {} route(s), area score {area_base_score}",
            routes.len()
        );
        RouteSet {
            generation,
            area_base_score,
            routes,
        }
    }

    /// Compute the area base score for the padded box around the endpoints.
    ///
    /// The three amenity lookups run concurrently, each bounded by
    /// [`ComposerConfig::poi_timeout`]. A failed or late lookup counts as
    /// zero; when all three fail the fallback score is returned.
    pub async fn assess_area(&self, start: Coord<f64>, end: Coord<f64>) -> u8 {
        let bbox = padded_bounds(start, end, self.config.bounds_padding);
        let counts = join_all(
            PoiCategory::ALL
                .into_iter()
                .map(|category| self.count_within_deadline(bbox, category)),
        )
        .await;

        if counts.iter().all(Option::is_none) {
            warn!(
                "all amenity lookups failed; using area score {}",
                self.config.fallback_area_score
            );
            return self.config.fallback_area_score;
        }

        let (mut police, mut hospitals, mut busy) = (0, 0, 0);
        for (category, count) in PoiCategory::ALL.into_iter().zip(counts) {
            let count = count.unwrap_or(0);
            match category {
                PoiCategory::Police => police = count,
                PoiCategory::Hospital => hospitals = count,
                PoiCategory::Fuel => busy = count,
            }
        }
        let context =
            AreaSafetyContext::new(police, hospitals, busy, great_circle_km(start, end));
        let score = context.base_score();
        debug!("area context {context:?} scored {score}");
        score
    }

    /// List amenities inside `bbox`, grouped by category.
    ///
    /// Lookups run concurrently and fail soft per category.
    pub async fn scan_area(&self, bbox: &Rect<f64>) -> AreaScan {
        let scan = density::scan(&self.pois, bbox).await;
        info!("area scan found {} amenities", scan.total());
        scan
    }

    async fn count_within_deadline(&self, bbox: Rect<f64>, category: PoiCategory) -> Option<u32> {
        match timeout(self.config.poi_timeout, self.pois.query(&bbox, category)).await {
            Ok(Ok(pois)) => Some(u32::try_from(pois.len()).unwrap_or(u32::MAX)),
            Ok(Err(err)) => {
                warn!("{category} lookup failed: {err}");
                None
            }
            Err(_) => {
                warn!(
                    "{category} lookup exceeded {}ms",
                    self.config.poi_timeout.as_millis()
                );
                None
            }
        }
    }
}

fn score(category: RouteCategory, candidate: &CandidateRoute, area_base_score: u8) -> ScoredRoute {
    ScoredRoute::from_candidate(
        category,
        candidate,
        category_score(category, area_base_score),
    )
}
