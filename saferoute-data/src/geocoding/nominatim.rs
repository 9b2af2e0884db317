//! Nominatim search and reverse response types.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Overview/>

use geo::Coord;
use saferoute_core::ProviderError;
use serde::Deserialize;

/// A forward search hit. Nominatim encodes coordinates as strings.
#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub lat: String,
    pub lon: String,
}

impl SearchHit {
    /// Parse the hit's coordinate.
    pub fn location(&self) -> Result<Coord<f64>, ProviderError> {
        let parse = |value: &str, axis: &str| {
            value.trim().parse::<f64>().map_err(|err| ProviderError::Parse {
                message: format!("invalid {axis} '{value}': {err}"),
            })
        };
        Ok(Coord {
            x: parse(&self.lon, "longitude")?,
            y: parse(&self.lat, "latitude")?,
        })
    }
}

/// Reverse lookup response. Failures carry `error` instead of a name.
#[derive(Debug, Deserialize)]
pub struct ReverseResponse {
    pub display_name: Option<String>,
    pub error: Option<String>,
}

impl ReverseResponse {
    /// First comma-separated segment of the display name.
    pub fn short_label(self) -> Result<String, ProviderError> {
        let display_name = self.display_name.ok_or_else(|| ProviderError::Service {
            code: "NoResult".to_owned(),
            message: self
                .error
                .unwrap_or_else(|| "missing display_name".to_owned()),
        })?;
        Ok(display_name
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_owned())
    }
}
