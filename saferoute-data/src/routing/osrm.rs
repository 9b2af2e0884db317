//! OSRM API response types for the Route service.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
///
/// The response contains candidate routes on success or an error message on
/// failure. The `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route found between the coordinates
    /// - `"InvalidQuery"` - Invalid query parameters
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, primary first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// A single OSRM route.
#[derive(Debug, Deserialize)]
pub struct Route {
    /// Length in metres.
    pub distance: f64,
    /// Travel time in seconds.
    pub duration: f64,
    /// Full-resolution GeoJSON geometry.
    pub geometry: LineStringGeometry,
}

/// GeoJSON `LineString` with `[longitude, latitude]` positions.
#[derive(Debug, Deserialize)]
pub struct LineStringGeometry {
    /// Ordered positions.
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}
