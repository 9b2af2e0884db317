//! Facade crate for the Saferoute engine.
//!
//! This crate re-exports the core domain types and, behind the `http`
//! feature, the adapters that talk to public map services.

#![forbid(unsafe_code)]

pub use saferoute_core::{
    AreaSafetyContext, AreaScan, CandidateRoute, CommunityRating, ComposerConfig,
    DEFAULT_AREA_SCORE, Geocoder, PlaceSuggestion, PoiCategory, PoiProvider, PointOfInterest,
    ProviderError, RatingLedger, RiskLevel, RouteCategory, RouteComposer, RouteKey, RouteSet,
    RoutingProvider, SafetyAdvice, ScoredRoute, TravelMode, TravelProfile, UNKNOWN_LOCATION,
};

#[cfg(feature = "http")]
pub use saferoute_data::{
    GeocoderConfig, HttpAdapterConfig, HttpGeocoder, OsrmRoutingProvider, OverpassPoiProvider,
    ProviderBuildError, TargetCountry,
};
