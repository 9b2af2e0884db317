//! `PoiProvider` implementation using the Overpass API.

use async_trait::async_trait;
use geo::Rect;
use log::debug;
use reqwest::Client;
use saferoute_core::bounds::BoxEdges;
use saferoute_core::{PoiCategory, PoiProvider, PointOfInterest, ProviderError};
use url::Url;

use super::dto::OverpassResponseDto;
use crate::http::{HttpAdapterConfig, ProviderBuildError, get_json, url_with_query};

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Build the Overpass QL query for `category` inside `bbox`.
///
/// # Examples
/// ```
/// use geo::{Coord, Rect};
/// use saferoute_core::PoiCategory;
/// use saferoute_data::overpass::build_query;
///
/// let bbox = Rect::new(Coord { x: 77.5, y: 12.9 }, Coord { x: 77.7, y: 13.0 });
/// assert_eq!(
///     build_query(&bbox, PoiCategory::Police),
///     r#"[out:json];(node["amenity"="police"](12.9,77.5,13,77.7););out;"#
/// );
/// ```
pub fn build_query(bbox: &Rect<f64>, category: PoiCategory) -> String {
    let BoxEdges {
        south,
        west,
        north,
        east,
    } = BoxEdges::from(*bbox);
    format!(
        r#"[out:json];(node["amenity"="{}"]({south},{west},{north},{east}););out;"#,
        category.amenity()
    )
}

/// HTTP amenity provider using the Overpass interpreter.
#[derive(Debug, Clone)]
pub struct OverpassPoiProvider {
    client: Client,
    config: HttpAdapterConfig,
    base_url: Url,
}

impl OverpassPoiProvider {
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

    fn build_request_url(&self, query: &str) -> Result<Url, ProviderError> {
        url_with_query(&self.base_url, "", &[("data", query)])
    }
}

#[async_trait]
impl PoiProvider for OverpassPoiProvider {
    async fn query(
        &self,
        bbox: &Rect<f64>,
        category: PoiCategory,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        let query = build_query(bbox, category);
        let url = self.build_request_url(&query)?;
        debug!("requesting {category} amenities: {query}");
        let response: OverpassResponseDto =
            get_json(&self.client, url.as_str(), self.config.timeout).await?;
        Ok(response.into_domain_pois(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    #[rstest]
    #[case(PoiCategory::Hospital, "hospital")]
    #[case(PoiCategory::Fuel, "fuel")]
    fn query_names_amenity(#[case] category: PoiCategory, #[case] amenity: &str) {
        let bbox = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 });
        let query = build_query(&bbox, category);
        assert!(query.contains(&format!(r#"["amenity"="{amenity}"]"#)));
    }

    #[rstest]
    fn query_orders_edges_south_west_north_east() {
        let bbox = Rect::new(Coord { x: 72.9, y: 19.1 }, Coord { x: 72.8, y: 19.0 });
        let query = build_query(&bbox, PoiCategory::Police);
        assert!(query.contains("(19,72.8,19.1,72.9)"));
    }

    #[rstest]
    fn request_url_encodes_query() {
        let provider = OverpassPoiProvider::new("http://overpass.test/api/interpreter")
            .expect("provider should build");

        let url = provider
            .build_request_url(r#"[out:json];(node["amenity"="fuel"](0,0,1,1););out;"#)
            .expect("valid url");

        assert!(url.as_str().starts_with("http://overpass.test/api/interpreter?data="));
        let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(decoded, vec![(
            "data".to_owned(),
            r#"[out:json];(node["amenity"="fuel"](0,0,1,1););out;"#.to_owned()
        )]);
    }
}
