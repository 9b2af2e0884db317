//! Geocoding backed by Open-Meteo (autocomplete) and Nominatim (forward and
//! reverse lookups).
//!
//! [`HttpGeocoder`] implements [`saferoute_core::Geocoder`]. Autocomplete
//! results are restricted to a [`TargetCountry`], India by default.

mod nominatim;
mod open_meteo;
mod provider;

pub use provider::{
    DEFAULT_NOMINATIM_URL, DEFAULT_OPEN_METEO_URL, GeocoderConfig, HttpGeocoder,
    SUGGESTION_CANDIDATES, TargetCountry,
};
