//! Amenity lookups backed by the Overpass API.
//!
//! [`OverpassPoiProvider`] implements [`saferoute_core::PoiProvider`] by
//! issuing one `node["amenity"=...]` query per category and decoding the
//! JSON response into [`saferoute_core::PointOfInterest`] values.

mod dto;
mod provider;

pub use provider::{DEFAULT_OVERPASS_URL, OverpassPoiProvider, build_query};
