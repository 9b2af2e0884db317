//! HTTP routing provider backed by OSRM.
//!
//! [`OsrmRoutingProvider`] implements [`saferoute_core::RoutingProvider`]
//! using the OSRM Route API with GeoJSON geometries.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use saferoute_core::{RoutingProvider, TravelProfile};
//! use saferoute_data::HttpAdapterConfig;
//! use saferoute_data::routing::OsrmRoutingProvider;
//! use std::time::Duration;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpAdapterConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(10));
//! let provider = OsrmRoutingProvider::with_config(config)?;
//!
//! let routes = provider
//!     .route(
//!         &[Coord { x: 77.59, y: 12.97 }, Coord { x: 77.64, y: 12.93 }],
//!         TravelProfile::Driving,
//!         true,
//!     )
//!     .await?;
//! println!("{} candidate(s)", routes.len());
//! # Ok(())
//! # }
//! ```

mod osrm;
mod provider;

pub use provider::{DEFAULT_OSRM_URL, OsrmRoutingProvider};
