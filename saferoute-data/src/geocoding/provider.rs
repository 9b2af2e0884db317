//! `Geocoder` implementation over Open-Meteo and Nominatim.

use async_trait::async_trait;
use geo::Coord;
use log::debug;
use reqwest::Client;
use saferoute_core::{Geocoder, PlaceSuggestion, ProviderError};
use url::Url;

use super::nominatim::{ReverseResponse, SearchHit};
use super::open_meteo::SearchResponse;
use crate::http::{HttpAdapterConfig, ProviderBuildError, get_json, url_with_query};

/// Public Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Public Open-Meteo geocoding host.
pub const DEFAULT_OPEN_METEO_URL: &str = "https://geocoding-api.open-meteo.com";

/// Number of raw candidates requested before country filtering.
pub const SUGGESTION_CANDIDATES: usize = 20;

/// Country that autocomplete results are restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCountry {
    /// ISO 3166-1 alpha-2 code, compared case-insensitively.
    pub code: String,
    /// English country name, compared case-insensitively.
    pub name: String,
}

impl Default for TargetCountry {
    fn default() -> Self {
        Self::new("IN", "India")
    }
}

impl TargetCountry {
    /// Create a target from a country code and name.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Whether `place` lies in this country by code or by name.
    pub fn matches(&self, place: &PlaceSuggestion) -> bool {
        let code_matches = place
            .country_code
            .as_deref()
            .is_some_and(|code| code.eq_ignore_ascii_case(&self.code));
        let name_matches = place
            .country
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(&self.name));
        code_matches || name_matches
    }
}

/// Configuration for [`HttpGeocoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocoderConfig {
    /// Nominatim endpoint, timeout and user agent.
    pub http: HttpAdapterConfig,
    /// Open-Meteo geocoding host used for autocomplete.
    pub suggest_url: String,
    /// Country autocomplete results are restricted to.
    pub country: TargetCountry,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            http: HttpAdapterConfig::new(DEFAULT_NOMINATIM_URL),
            suggest_url: DEFAULT_OPEN_METEO_URL.to_owned(),
            country: TargetCountry::default(),
        }
    }
}

impl GeocoderConfig {
    /// Replace the Nominatim configuration.
    #[must_use]
    pub fn with_http(mut self, http: HttpAdapterConfig) -> Self {
        self.http = http;
        self
    }

    /// Set the Open-Meteo host.
    #[must_use]
    pub fn with_suggest_url(mut self, suggest_url: impl Into<String>) -> Self {
        self.suggest_url = suggest_url.into();
        self
    }

    /// Set the target country.
    #[must_use]
    pub fn with_country(mut self, country: TargetCountry) -> Self {
        self.country = country;
        self
    }
}

/// HTTP geocoder combining Open-Meteo autocomplete with Nominatim lookups.
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    client: Client,
    config: GeocoderConfig,
    nominatim_url: Url,
    suggest_url: Url,
}

impl HttpGeocoder {
    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either base URL is invalid or the HTTP client
    /// fails to build.
    pub fn with_config(config: GeocoderConfig) -> Result<Self, ProviderBuildError> {
        let nominatim_url = config.http.parsed_base_url()?;
        let suggest_url = HttpAdapterConfig::new(config.suggest_url.clone()).parsed_base_url()?;
        let client = config.http.build_client()?;
        Ok(Self {
            client,
            config,
            nominatim_url,
            suggest_url,
        })
    }

    /// Active configuration.
    pub const fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    fn suggest_request_url(&self, query: &str) -> Result<Url, ProviderError> {
        let count = SUGGESTION_CANDIDATES.to_string();
        url_with_query(&self.suggest_url, "v1/search", &[
            ("name", query),
            ("count", count.as_str()),
            ("language", "en"),
            ("format", "json"),
        ])
    }

    fn search_request_url(&self, query: &str) -> Result<Url, ProviderError> {
        url_with_query(&self.nominatim_url, "search", &[
            ("format", "json"),
            ("q", query),
        ])
    }

    fn reverse_request_url(&self, location: Coord<f64>) -> Result<Url, ProviderError> {
        let lat = location.y.to_string();
        let lon = location.x.to_string();
        url_with_query(&self.nominatim_url, "reverse", &[
            ("format", "json"),
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
        ])
    }

    /// Keep suggestions inside the target country.
    fn filter_suggestions(&self, response: SearchResponse) -> Vec<PlaceSuggestion> {
        response
            .results
            .into_iter()
            .map(PlaceSuggestion::from)
            .filter(|place| self.config.country.matches(place))
            .collect()
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn suggest(&self, query: &str) -> Result<Vec<PlaceSuggestion>, ProviderError> {
        let url = self.suggest_request_url(query)?;
        debug!("requesting suggestions for '{query}'");
        let response: SearchResponse =
            get_json(&self.client, url.as_str(), self.config.http.timeout).await?;
        Ok(self.filter_suggestions(response))
    }

    async fn geocode(&self, query: &str) -> Result<Option<Coord<f64>>, ProviderError> {
        let url = self.search_request_url(query)?;
        debug!("geocoding '{query}'");
        let hits: Vec<SearchHit> =
            get_json(&self.client, url.as_str(), self.config.http.timeout).await?;
        hits.first().map(SearchHit::location).transpose()
    }

    async fn reverse_geocode(&self, location: Coord<f64>) -> Result<String, ProviderError> {
        let url = self.reverse_request_url(location)?;
        debug!("reverse geocoding ({}, {})", location.y, location.x);
        let response: ReverseResponse =
            get_json(&self.client, url.as_str(), self.config.http.timeout).await?;
        response.short_label()
    }
}
