//! Synthesise a shortcut when the routing service offers no alternative.

use geo::Coord;
use log::warn;

use super::{RoutingProvider, TravelProfile};
use crate::CandidateRoute;

/// Waypoint offset perpendicular to the straight line from `start` to `end`.
///
/// The returned point is the midpoint shifted along the vector
/// `(-Δlng, Δlat)` scaled by `deviation / 2`, so a deviation of `1.0` moves
/// it half the segment length off the line. `deviation` is clamped into
/// `[0, 1]`. Identical endpoints yield the endpoint itself.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use saferoute_core::routing::detour_waypoint;
///
/// let waypoint = detour_waypoint(Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 0.0 }, 0.6);
/// assert!((waypoint.y - -0.6).abs() < 1e-12);
/// assert!((waypoint.x - 1.0).abs() < 1e-12);
/// ```
pub fn detour_waypoint(start: Coord<f64>, end: Coord<f64>, deviation: f64) -> Coord<f64> {
    let mid_lat = (start.y + end.y) / 2.0;
    let mid_lng = (start.x + end.x) / 2.0;
    let d_lat = end.y - start.y;
    let d_lng = end.x - start.x;
    let scale = deviation.clamp(0.0, 1.0) * 0.5;
    Coord {
        x: mid_lng + d_lat * scale,
        y: mid_lat - d_lng * scale,
    }
}

/// Route from `start` to `end` through the [`detour_waypoint`].
///
/// Only the first candidate is kept and alternatives are not requested.
/// Failures degrade to `None`.
pub async fn detoured_route<R>(
    provider: &R,
    start: Coord<f64>,
    end: Coord<f64>,
    profile: TravelProfile,
    deviation: f64,
) -> Option<CandidateRoute>
where
    R: RoutingProvider + ?Sized,
{
    let via = detour_waypoint(start, end, deviation);
    match provider.route(&[start, via, end], profile, false).await {
        Ok(routes) => routes.into_iter().next(),
        Err(err) => {
            warn!("{profile} detour lookup failed: {err}");
            None
        }
    }
}
