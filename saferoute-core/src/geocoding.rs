//! Resolve place names to coordinates and back.
//!
//! [`Geocoder`] implementations report transport failures; the free
//! functions here apply the fail-soft contract used by callers.

use async_trait::async_trait;
use geo::Coord;
use log::warn;

use crate::ProviderError;

/// Label returned by [`reverse_geocode`] when the lookup fails.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Queries shorter than this many characters never reach the provider.
pub const MIN_SUGGESTION_QUERY_CHARS: usize = 3;

/// Upper bound on the number of suggestions returned by [`suggest`].
pub const MAX_SUGGESTIONS: usize = 5;

/// An autocomplete candidate.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::PlaceSuggestion;
///
/// let place = PlaceSuggestion::new("Indiranagar", Coord { x: 77.64, y: 12.97 })
///     .with_admin1("Karnataka")
///     .with_country("India", "IN");
///
/// assert_eq!(place.label(), "Indiranagar, Karnataka, India");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlaceSuggestion {
    /// Place name.
    pub name: String,
    /// First-level administrative area, such as a state.
    pub admin1: Option<String>,
    /// Country name.
    pub country: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: Option<String>,
    /// Place centroid with `x = longitude` and `y = latitude`.
    #[cfg_attr(
        feature = "serde",
        serde(serialize_with = "crate::poi::serialize_coord")
    )]
    pub location: Coord<f64>,
}

impl PlaceSuggestion {
    /// Construct a suggestion with only a name and location.
    pub fn new(name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            name: name.into(),
            admin1: None,
            country: None,
            country_code: None,
            location,
        }
    }

    /// Attach the first-level administrative area.
    #[must_use]
    pub fn with_admin1(mut self, admin1: impl Into<String>) -> Self {
        self.admin1 = Some(admin1.into());
        self
    }

    /// Attach the country name and code.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>, code: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self.country_code = Some(code.into());
        self
    }

    /// Render `name, admin1, country`, skipping absent parts.
    pub fn label(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.admin1.as_deref())
            .chain(self.country.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Forward, reverse and autocomplete geocoding.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Return autocomplete candidates for `query`, filtered to the
    /// implementation's target country.
    async fn suggest(&self, query: &str) -> Result<Vec<PlaceSuggestion>, ProviderError>;

    /// Resolve `query` to the first matching coordinate.
    async fn geocode(&self, query: &str) -> Result<Option<Coord<f64>>, ProviderError>;

    /// Return a short label for `location`.
    async fn reverse_geocode(&self, location: Coord<f64>) -> Result<String, ProviderError>;
}

#[async_trait]
impl<T> Geocoder for Box<T>
where
    T: Geocoder + ?Sized,
{
    async fn suggest(&self, query: &str) -> Result<Vec<PlaceSuggestion>, ProviderError> {
        (**self).suggest(query).await
    }

    async fn geocode(&self, query: &str) -> Result<Option<Coord<f64>>, ProviderError> {
        (**self).geocode(query).await
    }

    async fn reverse_geocode(&self, location: Coord<f64>) -> Result<String, ProviderError> {
        (**self).reverse_geocode(location).await
    }
}

/// Autocomplete `query`, returning at most [`MAX_SUGGESTIONS`] entries.
///
/// Queries shorter than [`MIN_SUGGESTION_QUERY_CHARS`] characters return an
/// empty list without calling the provider. Errors also yield an empty list.
pub async fn suggest<G>(geocoder: &G, query: &str) -> Vec<PlaceSuggestion>
where
    G: Geocoder + ?Sized,
{
    let query = query.trim();
    if query.chars().count() < MIN_SUGGESTION_QUERY_CHARS {
        return Vec::new();
    }
    match geocoder.suggest(query).await {
        Ok(mut suggestions) => {
            suggestions.truncate(MAX_SUGGESTIONS);
            suggestions
        }
        Err(err) => {
            warn!("suggestion lookup for '{query}' failed: {err}");
            Vec::new()
        }
    }
}

/// Resolve `query` to a coordinate, returning `None` on failure.
pub async fn geocode<G>(geocoder: &G, query: &str) -> Option<Coord<f64>>
where
    G: Geocoder + ?Sized,
{
    match geocoder.geocode(query).await {
        Ok(location) => location,
        Err(err) => {
            warn!("geocoding '{query}' failed: {err}");
            None
        }
    }
}

/// Label `location`, returning [`UNKNOWN_LOCATION`] on failure.
pub async fn reverse_geocode<G>(geocoder: &G, location: Coord<f64>) -> String
where
    G: Geocoder + ?Sized,
{
    match geocoder.reverse_geocode(location).await {
        Ok(label) => label,
        Err(err) => {
            warn!(
                "reverse geocoding ({}, {}) failed: {err}",
                location.y, location.x
            );
            UNKNOWN_LOCATION.to_owned()
        }
    }
}
