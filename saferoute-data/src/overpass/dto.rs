//! DTOs for decoding Overpass JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain records in one pass.

use std::collections::BTreeMap;

use geo::Coord;
use log::debug;
use saferoute_core::{PoiCategory, PointOfInterest};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct OverpassResponseDto {
    #[serde(default)]
    pub(super) elements: Vec<OverpassElementDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OverpassElementDto {
    #[serde(rename = "type")]
    pub(super) element_type: String,
    pub(super) id: u64,
    pub(super) lon: Option<f64>,
    pub(super) lat: Option<f64>,
    pub(super) center: Option<OverpassElementCenterDto>,
    #[serde(default)]
    pub(super) tags: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OverpassElementCenterDto {
    pub(super) lon: f64,
    pub(super) lat: f64,
}

impl OverpassResponseDto {
    /// Map elements onto `category`, skipping those without usable
    /// coordinates.
    pub(super) fn into_domain_pois(self, category: PoiCategory) -> Vec<PointOfInterest> {
        self.elements
            .into_iter()
            .filter_map(|element| element.into_domain_poi(category))
            .collect()
    }
}

impl OverpassElementDto {
    fn into_domain_poi(self, category: PoiCategory) -> Option<PointOfInterest> {
        let Some((longitude, latitude)) = self.coordinates() else {
            debug!(
                "skipping {} {}: missing coordinates",
                self.element_type, self.id
            );
            return None;
        };
        if !longitude.is_finite() || !latitude.is_finite() {
            debug!(
                "skipping {} {}: non-finite coordinates",
                self.element_type, self.id
            );
            return None;
        }

        let location = Coord {
            x: longitude,
            y: latitude,
        };
        let poi = PointOfInterest::new(self.id, location, category);
        Some(match self.tags.get("name") {
            Some(name) => poi.with_name(name.as_str()),
            None => poi,
        })
    }

    fn coordinates(&self) -> Option<(f64, f64)> {
        if let (Some(longitude), Some(latitude)) = (self.lon, self.lat) {
            return Some((longitude, latitude));
        }
        self.center.as_ref().map(|center| (center.lon, center.lat))
    }
}
