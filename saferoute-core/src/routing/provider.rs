//! Routing provider trait and the fail-soft route lookup.

use async_trait::async_trait;
use geo::Coord;
use log::warn;

use crate::{CandidateRoute, ProviderError};

/// Travel profile understood by the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelProfile {
    /// Road network for cars.
    Driving,
    /// Pedestrian network.
    Walking,
}

impl TravelProfile {
    /// Return the profile segment used in routing URLs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
        }
    }
}

impl std::fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute candidate routes through an ordered list of waypoints.
///
/// Implementations return candidates in the order the service produced
/// them. Candidates with empty geometry must be dropped rather than
/// returned.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use geo::{Coord, line_string};
/// use saferoute_core::{CandidateRoute, ProviderError, RoutingProvider, TravelProfile};
///
/// struct StraightLine;
///
/// #[async_trait]
/// impl RoutingProvider for StraightLine {
///     async fn route(
///         &self,
///         waypoints: &[Coord<f64>],
///         _profile: TravelProfile,
///         _alternatives: bool,
///     ) -> Result<Vec<CandidateRoute>, ProviderError> {
///         let geometry = waypoints.iter().copied().collect();
///         Ok(CandidateRoute::new(geometry, 1_000.0, 60.0).into_iter().collect())
///     }
/// }
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let routes = runtime.block_on(StraightLine.route(
///     &[Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }],
///     TravelProfile::Walking,
///     false,
/// ))?;
/// assert_eq!(routes.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Request routes visiting `waypoints` in order.
    ///
    /// When `alternatives` is true the service may return more than one
    /// candidate.
    async fn route(
        &self,
        waypoints: &[Coord<f64>],
        profile: TravelProfile,
        alternatives: bool,
    ) -> Result<Vec<CandidateRoute>, ProviderError>;
}

#[async_trait]
impl<T> RoutingProvider for Box<T>
where
    T: RoutingProvider + ?Sized,
{
    async fn route(
        &self,
        waypoints: &[Coord<f64>],
        profile: TravelProfile,
        alternatives: bool,
    ) -> Result<Vec<CandidateRoute>, ProviderError> {
        (**self).route(waypoints, profile, alternatives).await
    }
}

/// Fetch routes from `start` to `end`, returning an empty list on failure.
///
/// The failure is logged at `warn` level.
pub async fn routes_between<R>(
    provider: &R,
    start: Coord<f64>,
    end: Coord<f64>,
    profile: TravelProfile,
    alternatives: bool,
) -> Vec<CandidateRoute>
where
    R: RoutingProvider + ?Sized,
{
    match provider.route(&[start, end], profile, alternatives).await {
        Ok(routes) => routes,
        Err(err) => {
            warn!("{profile} route lookup failed: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    use crate::test_support::{StubRoutingProvider, straight_route};

    #[fixture]
    fn endpoints() -> (Coord<f64>, Coord<f64>) {
        (Coord { x: 77.59, y: 12.97 }, Coord { x: 77.64, y: 12.93 })
    }

    #[rstest]
    #[tokio::test]
    async fn passes_endpoints_through(endpoints: (Coord<f64>, Coord<f64>)) {
        let (start, end) = endpoints;
        let provider = StubRoutingProvider::default()
            .with_driving(vec![straight_route(start, end, 5_000.0, 600.0)]);

        let routes = routes_between(&provider, start, end, TravelProfile::Driving, true).await;

        assert_eq!(routes.len(), 1);
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        let call = calls.first().expect("one recorded call");
        assert_eq!(call.waypoints, vec![start, end]);
        assert_eq!(call.profile, TravelProfile::Driving);
        assert!(call.alternatives);
    }

    #[rstest]
    #[tokio::test]
    async fn degrades_to_empty_on_error(endpoints: (Coord<f64>, Coord<f64>)) {
        let (start, end) = endpoints;
        let provider = StubRoutingProvider::default().with_error(ProviderError::Network {
            url: "http://osrm.test".to_owned(),
            message: "connection refused".to_owned(),
        });

        let routes = routes_between(&provider, start, end, TravelProfile::Walking, false).await;

        assert!(routes.is_empty());
    }

    #[test]
    fn profile_matches_url_segment() {
        assert_eq!(TravelProfile::Driving.to_string(), "driving");
        assert_eq!(TravelProfile::Walking.as_str(), "walking");
    }
}
