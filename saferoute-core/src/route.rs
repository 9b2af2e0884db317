//! Candidate routes from a routing service and their scored presentation.
//!
//! A [`CandidateRoute`] is raw output from a [`RoutingProvider`]. The
//! composer assigns each accepted candidate a [`RouteCategory`] and a safety
//! score, producing a [`ScoredRoute`] ready for display.
//!
//! [`RoutingProvider`]: crate::RoutingProvider

use geo::{Coord, LineString};
use thiserror::Error;

/// Errors raised when constructing a [`CandidateRoute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CandidateRouteError {
    /// The geometry contains no coordinates and cannot be drawn.
    #[error("route geometry is empty")]
    EmptyGeometry,
}

/// A route returned by a routing service before categorisation.
///
/// # Examples
/// ```
/// use geo::line_string;
/// use saferoute_core::CandidateRoute;
///
/// let geometry = line_string![(x: 77.59, y: 12.97), (x: 77.60, y: 12.98)];
/// let route = CandidateRoute::new(geometry, 1_500.0, 240.0).expect("non-empty geometry");
///
/// assert_eq!(route.distance_meters(), 1_500.0);
/// assert_eq!(route.duration_seconds(), 240.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRoute {
    geometry: LineString<f64>,
    distance_meters: f64,
    duration_seconds: f64,
}

impl CandidateRoute {
    /// Construct a candidate route.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateRouteError::EmptyGeometry`] when `geometry` holds no
    /// coordinates.
    pub fn new(
        geometry: LineString<f64>,
        distance_meters: f64,
        duration_seconds: f64,
    ) -> Result<Self, CandidateRouteError> {
        if geometry.0.is_empty() {
            return Err(CandidateRouteError::EmptyGeometry);
        }
        Ok(Self {
            geometry,
            distance_meters,
            duration_seconds,
        })
    }

    /// Two-point route from `start` to `end`; never empty.
    pub(crate) fn straight(
        start: Coord<f64>,
        end: Coord<f64>,
        distance_meters: f64,
        duration_seconds: f64,
    ) -> Self {
        Self {
            geometry: LineString::from(vec![start, end]),
            distance_meters,
            duration_seconds,
        }
    }

    /// Route polyline with `x = longitude` and `y = latitude`.
    pub fn geometry(&self) -> &LineString<f64> {
        &self.geometry
    }

    /// Route length in metres.
    pub const fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    /// Expected travel time in seconds.
    pub const fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }
}

/// How a route is intended to be travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TravelMode {
    /// Driving.
    Car,
    /// Walking.
    Walk,
    /// Two-wheeler.
    Scooter,
}

/// Qualitative risk attached to a route category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RiskLevel {
    /// Preferred route.
    Safe,
    /// Acceptable with some care.
    Moderate,
    /// Faster but exposed.
    Risky,
}

/// The three route slots offered to a traveller.
///
/// Each category carries fixed presentation metadata.
///
/// # Examples
/// ```
/// use saferoute_core::{RiskLevel, RouteCategory, TravelMode};
///
/// assert_eq!(RouteCategory::Yellow.display_name(), "Walker's Path (Yellow)");
/// assert_eq!(RouteCategory::Red.travel_mode(), TravelMode::Scooter);
/// assert_eq!(RouteCategory::Green.risk_level(), RiskLevel::Safe);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum RouteCategory {
    /// Main driving route.
    Green,
    /// Pedestrian route.
    Yellow,
    /// Shortcut alternative.
    Red,
}

impl RouteCategory {
    /// Every category in presentation order.
    pub const ALL: [Self; 3] = [Self::Green, Self::Yellow, Self::Red];

    /// Return the lowercase identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }

    /// Human-readable route name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Green => "Main Route (Green)",
            Self::Yellow => "Walker's Path (Yellow)",
            Self::Red => "Shortcut (Red)",
        }
    }

    /// One-line route description.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Green => "Safest & Fastest",
            Self::Yellow => "Pedestrian Friendly",
            Self::Red => "Quick but Risky",
        }
    }

    /// Intended travel mode.
    pub const fn travel_mode(self) -> TravelMode {
        match self {
            Self::Green => TravelMode::Car,
            Self::Yellow => TravelMode::Walk,
            Self::Red => TravelMode::Scooter,
        }
    }

    /// Qualitative risk level.
    pub const fn risk_level(self) -> RiskLevel {
        match self {
            Self::Green => RiskLevel::Safe,
            Self::Yellow => RiskLevel::Moderate,
            Self::Red => RiskLevel::Risky,
        }
    }

    /// Polyline colour as a hex string.
    pub const fn color_code(self) -> &'static str {
        match self {
            Self::Green => "#22c55e",
            Self::Yellow => "#eab308",
            Self::Red => "#ef4444",
        }
    }
}

impl std::fmt::Display for RouteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RouteCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "red" => Ok(Self::Red),
            _ => Err(format!("unknown route category '{s}'")),
        }
    }
}

/// A categorised route with a safety score and display labels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ScoredRoute {
    /// Category slot; serialised as `id`.
    #[cfg_attr(feature = "serde", serde(rename = "id"))]
    pub category: RouteCategory,
    /// Human-readable name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Travel time, for example `"12 min"`.
    pub time_label: String,
    /// Distance, for example `"3.4 km"`.
    pub distance_label: String,
    /// Safety score in `0..=100`.
    pub safety_score: u8,
    /// Intended travel mode.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub mode: TravelMode,
    /// Qualitative risk level.
    pub risk_level: RiskLevel,
    /// Polyline colour.
    pub color_code: &'static str,
    /// Route polyline.
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_geometry"))]
    pub geometry: LineString<f64>,
}

impl ScoredRoute {
    /// Present `candidate` in the `category` slot with the given score.
    ///
    /// Scores above 100 are clamped.
    ///
    /// # Examples
    /// ```
    /// use geo::line_string;
    /// use saferoute_core::{CandidateRoute, RouteCategory, ScoredRoute};
    ///
    /// let candidate = CandidateRoute::new(
    ///     line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 0.1)],
    ///     3_460.0,
    ///     725.0,
    /// )
    /// .expect("non-empty geometry");
    /// let route = ScoredRoute::from_candidate(RouteCategory::Green, &candidate, 83);
    ///
    /// assert_eq!(route.time_label, "12 min");
    /// assert_eq!(route.distance_label, "3.5 km");
    /// assert_eq!(route.safety_score, 83);
    /// ```
    pub fn from_candidate(
        category: RouteCategory,
        candidate: &CandidateRoute,
        safety_score: u8,
    ) -> Self {
        Self {
            category,
            name: category.display_name(),
            description: category.description(),
            time_label: time_label(candidate.duration_seconds()),
            distance_label: distance_label(candidate.distance_meters()),
            safety_score: safety_score.min(100),
            mode: category.travel_mode(),
            risk_level: category.risk_level(),
            color_code: category.color_code(),
            geometry: candidate.geometry().clone(),
        }
    }
}

/// Format a duration in seconds as whole minutes.
pub fn time_label(duration_seconds: f64) -> String {
    format!("{:.0} min", (duration_seconds / 60.0).round())
}

/// Format a distance in metres as kilometres with one decimal place.
///
/// Halves round away from zero, so 1250 m reads `1.3 km`.
pub fn distance_label(distance_meters: f64) -> String {
    format!("{:.1} km", (distance_meters / 100.0).round() / 10.0)
}

#[cfg(feature = "serde")]
fn serialize_geometry<S>(geometry: &LineString<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeStruct;

    let coordinates: Vec<[f64; 2]> = geometry.coords().map(|c| [c.x, c.y]).collect();
    let mut state = serializer.serialize_struct("LineString", 2)?;
    state.serialize_field("type", "LineString")?;
    state.serialize_field("coordinates", &coordinates)?;
    state.end()
}
