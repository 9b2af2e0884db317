//! Adapter doubles and output capture for command tests.

use std::cell::RefCell;

use geo::Coord;
use saferoute_core::test_support::{StubGeocoder, StubPoiProvider, StubRoutingProvider};
use saferoute_core::{Geocoder, PoiProvider, RoutingProvider};
use saferoute_data::{GeocoderConfig, HttpAdapterConfig};
use serde_json::Value;

use crate::adapters::AdapterFactory;
use crate::CliError;

pub(super) const START: Coord<f64> = Coord { x: 0.0, y: 0.0 };
// Roughly 2 km east of `START`.
pub(super) const END: Coord<f64> = Coord {
    x: 0.017_986,
    y: 0.0,
};

/// Hands out pre-configured stubs and records the base URLs requested.
#[derive(Debug, Default)]
pub(super) struct StubAdapters {
    pub(super) routing: RefCell<Option<StubRoutingProvider>>,
    pub(super) pois: RefCell<Option<StubPoiProvider>>,
    pub(super) geocoder: RefCell<Option<StubGeocoder>>,
    pub(super) base_urls: RefCell<Vec<String>>,
}

impl StubAdapters {
    pub(super) fn with_routing(self, routing: StubRoutingProvider) -> Self {
        *self.routing.borrow_mut() = Some(routing);
        self
    }

    pub(super) fn with_pois(self, pois: StubPoiProvider) -> Self {
        *self.pois.borrow_mut() = Some(pois);
        self
    }

    pub(super) fn with_geocoder(self, geocoder: StubGeocoder) -> Self {
        *self.geocoder.borrow_mut() = Some(geocoder);
        self
    }
}

impl AdapterFactory for StubAdapters {
    fn routing(&self, config: HttpAdapterConfig) -> Result<Box<dyn RoutingProvider>, CliError> {
        self.base_urls.borrow_mut().push(config.base_url);
        Ok(Box::new(self.routing.take().unwrap_or_default()))
    }

    fn pois(&self, config: HttpAdapterConfig) -> Result<Box<dyn PoiProvider>, CliError> {
        self.base_urls.borrow_mut().push(config.base_url);
        Ok(Box::new(self.pois.take().unwrap_or_default()))
    }

    fn geocoder(&self, config: GeocoderConfig) -> Result<Box<dyn Geocoder>, CliError> {
        self.base_urls.borrow_mut().push(config.http.base_url);
        Ok(Box::new(self.geocoder.take().unwrap_or_default()))
    }
}

/// Decode captured command output.
pub(super) fn parse_output(buffer: &[u8]) -> Value {
    serde_json::from_slice(buffer).expect("command output should be JSON")
}
