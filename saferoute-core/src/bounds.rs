//! Spherical distance and bounding-box helpers.
//!
//! Coordinates follow the `geo` convention: `x = longitude`, `y = latitude`,
//! both in degrees.

use geo::{Coord, Rect};

/// Mean Earth radius used for great-circle distances, in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in kilometres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::bounds::great_circle_km;
///
/// let km = great_circle_km(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
/// assert!((km - 111.19).abs() < 0.01);
/// ```
pub fn great_circle_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let half_dlat = (to.y - from.y).to_radians() / 2.0;
    let half_dlng = (to.x - from.x).to_radians() / 2.0;
    let a = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlng.sin().powi(2);
    let central_angle = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * central_angle / 1000.0
}

/// Smallest box containing `start` and `end`, grown by `padding` times its
/// span on every side.
///
/// A padding of `0.2` adds 20% of the latitude span above and below and 20%
/// of the longitude span left and right.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::bounds::padded_bounds;
///
/// let bbox = padded_bounds(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 5.0 }, 0.2);
/// assert_eq!(bbox.min(), Coord { x: -2.0, y: -1.0 });
/// assert_eq!(bbox.max(), Coord { x: 12.0, y: 6.0 });
/// ```
pub fn padded_bounds(start: Coord<f64>, end: Coord<f64>, padding: f64) -> Rect<f64> {
    let rect = Rect::new(start, end);
    let pad_y = rect.height() * padding;
    let pad_x = rect.width() * padding;
    Rect::new(
        Coord {
            x: rect.min().x - pad_x,
            y: rect.min().y - pad_y,
        },
        Coord {
            x: rect.max().x + pad_x,
            y: rect.max().y + pad_y,
        },
    )
}

/// Edges of a bounding box in the `south, west, north, east` order used by
/// Overpass and the CLI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxEdges {
    /// Minimum latitude.
    pub south: f64,
    /// Minimum longitude.
    pub west: f64,
    /// Maximum latitude.
    pub north: f64,
    /// Maximum longitude.
    pub east: f64,
}

impl BoxEdges {
    /// Build a [`Rect`] from the edges, normalising swapped corners.
    pub fn to_rect(self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.west,
                y: self.south,
            },
            Coord {
                x: self.east,
                y: self.north,
            },
        )
    }
}

impl From<Rect<f64>> for BoxEdges {
    fn from(rect: Rect<f64>) -> Self {
        Self {
            south: rect.min().y,
            west: rect.min().x,
            north: rect.max().y,
            east: rect.max().x,
        }
    }
}
