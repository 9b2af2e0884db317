//! HTTP adapters for the Saferoute engine.
//!
//! Responsibilities:
//! - Implement the `saferoute-core` adapter traits against public services:
//!   OSRM for routing, Overpass for amenity lookups, Open-Meteo for
//!   autocomplete and Nominatim for forward and reverse geocoding.
//! - Decode transport DTOs into domain records in one pass.
//! - Map transport failures onto [`ProviderError`](saferoute_core::ProviderError).
//!
//! Boundaries:
//! - Do not encode domain rules (live in `saferoute-core`).
//! - No retries and no caching.
//!
//! Invariants:
//! - Every request carries the configured user agent and timeout.
//! - No global mutable state.

pub mod geocoding;
pub mod http;
pub mod overpass;
pub mod routing;

pub use geocoding::{GeocoderConfig, HttpGeocoder, TargetCountry};
pub use http::{DEFAULT_USER_AGENT, HttpAdapterConfig, ProviderBuildError};
pub use overpass::OverpassPoiProvider;
pub use routing::OsrmRoutingProvider;
