//! Open-Meteo geocoding search response types.
//!
//! See: <https://open-meteo.com/en/docs/geocoding-api>

use geo::Coord;
use saferoute_core::PlaceSuggestion;
use serde::Deserialize;

/// Search response; `results` is omitted entirely when nothing matches.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// A single search hit.
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub admin1: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
}

impl From<SearchResult> for PlaceSuggestion {
    fn from(result: SearchResult) -> Self {
        Self {
            name: result.name,
            admin1: result.admin1,
            country: result.country,
            country_code: result.country_code,
            location: Coord {
                x: result.longitude,
                y: result.latitude,
            },
        }
    }
}
