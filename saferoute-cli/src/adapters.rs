//! Construction of the upstream adapters used by each subcommand.

use std::time::Duration;

use saferoute_core::{Geocoder, PoiProvider, RoutingProvider};
use saferoute_data::{
    GeocoderConfig, HttpAdapterConfig, HttpGeocoder, OsrmRoutingProvider, OverpassPoiProvider,
    ProviderBuildError,
};

use crate::CliError;

/// Builds adapters for the current invocation.
pub(crate) trait AdapterFactory {
    fn routing(&self, config: HttpAdapterConfig) -> Result<Box<dyn RoutingProvider>, CliError>;
    fn pois(&self, config: HttpAdapterConfig) -> Result<Box<dyn PoiProvider>, CliError>;
    fn geocoder(&self, config: GeocoderConfig) -> Result<Box<dyn Geocoder>, CliError>;
}

/// Factory producing the HTTP adapters from `saferoute-data`.
pub(crate) struct HttpAdapterFactory;

impl AdapterFactory for HttpAdapterFactory {
    fn routing(&self, config: HttpAdapterConfig) -> Result<Box<dyn RoutingProvider>, CliError> {
        let base_url = config.base_url.clone();
        OsrmRoutingProvider::with_config(config)
            .map(|provider| Box::new(provider) as Box<dyn RoutingProvider>)
            .map_err(build_error("routing", base_url))
    }

    fn pois(&self, config: HttpAdapterConfig) -> Result<Box<dyn PoiProvider>, CliError> {
        let base_url = config.base_url.clone();
        OverpassPoiProvider::with_config(config)
            .map(|provider| Box::new(provider) as Box<dyn PoiProvider>)
            .map_err(build_error("amenity", base_url))
    }

    fn geocoder(&self, config: GeocoderConfig) -> Result<Box<dyn Geocoder>, CliError> {
        let base_url = config.http.base_url.clone();
        HttpGeocoder::with_config(config)
            .map(|geocoder| Box::new(geocoder) as Box<dyn Geocoder>)
            .map_err(build_error("geocoding", base_url))
    }
}

fn build_error(
    service: &'static str,
    base_url: String,
) -> impl FnOnce(ProviderBuildError) -> CliError {
    move |source| CliError::BuildAdapter {
        service,
        base_url,
        source,
    }
}

/// Apply an optional timeout override to an adapter configuration.
pub(crate) fn http_config(base_url: String, timeout_secs: Option<u64>) -> HttpAdapterConfig {
    let config = HttpAdapterConfig::new(base_url);
    match timeout_secs {
        Some(secs) => config.with_timeout(Duration::from_secs(secs)),
        None => config,
    }
}
