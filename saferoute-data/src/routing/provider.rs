//! `RoutingProvider` implementation using OSRM's Route API.

use async_trait::async_trait;
use geo::{Coord, LineString};
use log::{debug, warn};
use reqwest::Client;
use saferoute_core::{CandidateRoute, ProviderError, RoutingProvider, TravelProfile};
use url::Url;

use super::osrm::RouteResponse;
use crate::http::{HttpAdapterConfig, ProviderBuildError, get_json, join_path};

/// Public OSRM demo server.
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org";

/// HTTP routing provider using the OSRM Route API.
///
/// Geometries are requested as full-resolution GeoJSON. Candidates with an
/// empty geometry are dropped with a warning.
#[derive(Debug, Clone)]
pub struct OsrmRoutingProvider {
    client: Client,
    config: HttpAdapterConfig,
    base_url: Url,
}

impl OsrmRoutingProvider {
    /// Create a new provider with default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpAdapterConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: HttpAdapterConfig) -> Result<Self, ProviderBuildError> {
        let base_url = config.parsed_base_url()?;
        let client = config.build_client()?;
        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Build the OSRM Route API URL.
    ///
    /// The URL format is
    /// `{base_url}/route/v1/{profile}/{coordinates}?overview=full&geometries=geojson&alternatives={bool}`
    /// where coordinates are semicolon-separated `lon,lat` pairs.
    fn build_route_url(
        &self,
        waypoints: &[Coord<f64>],
        profile: TravelProfile,
        alternatives: bool,
    ) -> String {
        let coords = waypoints
            .iter()
            .map(|point| format!("{},{}", point.x, point.y))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}?overview=full&geometries=geojson&alternatives={alternatives}",
            join_path(&self.base_url, &format!("route/v1/{profile}/{coords}"))
        )
    }

    /// Convert an OSRM response to candidate routes.
    fn convert_response(response: RouteResponse) -> Result<Vec<CandidateRoute>, ProviderError> {
        if !response.is_ok() {
            return Err(ProviderError::Service {
                code: response.code,
                message: response.message.unwrap_or_default(),
            });
        }

        let routes = response
            .routes
            .into_iter()
            .filter_map(|route| {
                let geometry: LineString<f64> = route
                    .geometry
                    .coordinates
                    .into_iter()
                    .map(|[x, y]| Coord { x, y })
                    .collect();
                match CandidateRoute::new(geometry, route.distance, route.duration) {
                    Ok(candidate) => Some(candidate),
                    Err(err) => {
                        warn!("dropping OSRM route: {err}");
                        None
                    }
                }
            })
            .collect();
        Ok(routes)
    }
}

#[async_trait]
impl RoutingProvider for OsrmRoutingProvider {
    async fn route(
        &self,
        waypoints: &[Coord<f64>],
        profile: TravelProfile,
        alternatives: bool,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        let url = self.build_route_url(waypoints, profile, alternatives);
        debug!("requesting {url}");
        let response: RouteResponse = get_json(&self.client, &url, self.config.timeout).await?;
        Self::convert_response(response)
    }
}
