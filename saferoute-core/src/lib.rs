//! Core domain types for the Saferoute engine.
//!
//! Responsibilities:
//! - Model candidate and scored routes, points of interest and the closed
//!   route categories (green, yellow, red).
//! - Define the async adapter traits for routing, geocoding and POI density
//!   lookups, plus the fail-soft contracts layered over them.
//! - Compute area safety scores and compose up to three categorised routes
//!   per request.
//!
//! Boundaries:
//! - No HTTP clients live here; transports are implemented in
//!   `saferoute-data`.
//! - Nothing is cached across requests.
//!
//! Invariants:
//! - Safety scores are always clamped into `0..=100`.
//! - A [`RouteSet`] holds at most one route per [`RouteCategory`], ordered
//!   green, yellow, red.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod advice;
pub mod bounds;
pub mod composer;
pub mod density;
pub mod error;
pub mod geocoding;
pub mod poi;
pub mod rating;
pub mod route;
pub mod routing;
pub mod safety;

#[doc(hidden)]
pub mod test_support;

pub use advice::SafetyAdvice;
pub use composer::{ComposerConfig, RouteComposer, RouteSet};
pub use density::PoiProvider;
pub use error::ProviderError;
pub use geocoding::{Geocoder, PlaceSuggestion, UNKNOWN_LOCATION};
pub use poi::{AreaScan, PoiCategory, PointOfInterest};
pub use rating::{CommunityRating, RatingError, RatingLedger, RouteKey};
pub use route::{
    CandidateRoute, CandidateRouteError, RiskLevel, RouteCategory, ScoredRoute, TravelMode,
};
pub use routing::{RoutingProvider, TravelProfile};
pub use safety::{AreaSafetyContext, DEFAULT_AREA_SCORE};
