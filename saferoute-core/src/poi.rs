//! Points of interest that contribute to area safety.

use geo::Coord;

/// Amenity categories that contribute to an area's safety.
///
/// # Examples
/// ```
/// use saferoute_core::PoiCategory;
///
/// assert_eq!(PoiCategory::Police.amenity(), "police");
/// assert_eq!(PoiCategory::Fuel.to_string(), "fuel");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PoiCategory {
    /// Police stations (`amenity=police`).
    Police,
    /// Hospitals (`amenity=hospital`).
    Hospital,
    /// Fuel stations (`amenity=fuel`), used as a proxy for busy areas.
    Fuel,
}

impl PoiCategory {
    /// Every category in query order.
    pub const ALL: [Self; 3] = [Self::Police, Self::Hospital, Self::Fuel];

    /// Return the OpenStreetMap `amenity` tag value for this category.
    pub const fn amenity(self) -> &'static str {
        match self {
            Self::Police => "police",
            Self::Hospital => "hospital",
            Self::Fuel => "fuel",
        }
    }
}

impl std::fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.amenity())
    }
}

impl std::str::FromStr for PoiCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "police" => Ok(Self::Police),
            "hospital" => Ok(Self::Hospital),
            "fuel" => Ok(Self::Fuel),
            _ => Err(format!("unknown amenity category '{s}'")),
        }
    }
}

/// A safety-relevant amenity located inside a queried bounding box.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::{PoiCategory, PointOfInterest};
///
/// let poi = PointOfInterest::new(7, Coord { x: 77.59, y: 12.97 }, PoiCategory::Police)
///     .with_name("Central Station");
///
/// assert_eq!(poi.id, 7);
/// assert_eq!(poi.name.as_deref(), Some("Central Station"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PointOfInterest {
    /// Upstream element identifier.
    pub id: u64,
    /// Marker position.
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_coord"))]
    pub location: Coord<f64>,
    /// Amenity category the element was queried for.
    pub category: PoiCategory,
    /// Optional display name taken from the element's tags.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
}

impl PointOfInterest {
    /// Construct an unnamed `PointOfInterest`.
    pub const fn new(id: u64, location: Coord<f64>, category: PoiCategory) -> Self {
        Self {
            id,
            location,
            category,
            name: None,
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(feature = "serde")]
pub(crate) fn serialize_coord<S>(coord: &Coord<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeStruct;

    let mut state = serializer.serialize_struct("Location", 2)?;
    state.serialize_field("lat", &coord.y)?;
    state.serialize_field("lng", &coord.x)?;
    state.end()
}

/// Amenities found by a standalone area scan, grouped by category.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AreaScan {
    /// Police stations in the scanned area.
    pub police: Vec<PointOfInterest>,
    /// Hospitals in the scanned area.
    pub hospitals: Vec<PointOfInterest>,
    /// Fuel stations in the scanned area.
    pub busy: Vec<PointOfInterest>,
}

impl AreaScan {
    /// Return the amenities recorded for `category`.
    pub fn of(&self, category: PoiCategory) -> &[PointOfInterest] {
        match category {
            PoiCategory::Police => &self.police,
            PoiCategory::Hospital => &self.hospitals,
            PoiCategory::Fuel => &self.busy,
        }
    }

    /// Store `pois` under `category`, replacing any previous entries.
    pub fn insert(&mut self, category: PoiCategory, pois: Vec<PointOfInterest>) {
        match category {
            PoiCategory::Police => self.police = pois,
            PoiCategory::Hospital => self.hospitals = pois,
            PoiCategory::Fuel => self.busy = pois,
        }
    }

    /// Total number of amenities across all categories.
    pub fn total(&self) -> usize {
        self.police.len() + self.hospitals.len() + self.busy.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case::police("police", PoiCategory::Police)]
    #[case::mixed_case("Hospital", PoiCategory::Hospital)]
    #[case::fuel("FUEL", PoiCategory::Fuel)]
    fn parses_categories(#[case] input: &str, #[case] expected: PoiCategory) {
        assert_eq!(PoiCategory::from_str(input), Ok(expected));
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = PoiCategory::from_str("bakery").expect_err("bakery is not tracked");
        assert!(err.contains("bakery"));
    }

    #[test]
    fn scan_groups_by_category() {
        let mut scan = AreaScan::default();
        let station = PointOfInterest::new(1, Coord { x: 0.0, y: 0.0 }, PoiCategory::Police);
        scan.insert(PoiCategory::Police, vec![station.clone()]);

        assert_eq!(scan.of(PoiCategory::Police), [station]);
        assert!(scan.of(PoiCategory::Fuel).is_empty());
        assert_eq!(scan.total(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialises_location_as_lat_lng() {
        let poi = PointOfInterest::new(3, Coord { x: 77.5, y: 12.9 }, PoiCategory::Hospital);
        let json = serde_json::to_value(&poi).expect("serialise poi");
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "location": { "lat": 12.9, "lng": 77.5 },
                "category": "hospital",
            })
        );
    }
}
