//! Fetch candidate routes from a routing service.
//!
//! The [`RoutingProvider`] trait abstracts the transport. The free functions
//! in this module wrap it with the fail-soft contract the composer relies
//! on: transport errors are logged and surface as an empty result.

mod detour;
mod provider;

pub use detour::{detour_waypoint, detoured_route};
pub use provider::{RoutingProvider, TravelProfile, routes_between};
