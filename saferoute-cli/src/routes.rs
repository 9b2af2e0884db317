//! `routes` command: plan categorised routes between two places.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use geo::Coord;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use saferoute_core::geocoding::{geocode, reverse_geocode};
use saferoute_core::{ComposerConfig, Geocoder, RouteComposer, RouteSet, SafetyAdvice, ScoredRoute};
use saferoute_data::overpass::DEFAULT_OVERPASS_URL;
use saferoute_data::routing::DEFAULT_OSRM_URL;
use saferoute_data::{GeocoderConfig, geocoding::DEFAULT_NOMINATIM_URL};
use serde::{Deserialize, Serialize};

use crate::adapters::{AdapterFactory, http_config};
use crate::coords::parse_lat_lng;
use crate::output::{LatLng, write_json};
use crate::{
    ARG_LOOKUP_TIMEOUT_MS, ARG_NOMINATIM_URL, ARG_OSRM_URL, ARG_OVERPASS_URL, ARG_ROUTES_FROM,
    ARG_ROUTES_FROM_COORD, ARG_ROUTES_TO, ARG_ROUTES_TO_COORD, ARG_TIMEOUT_SECS, CliError,
    ENV_ROUTES_FROM, ENV_ROUTES_TO,
};

/// CLI arguments for the `routes` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "routes",
    long_about = "Plan up to three routes between two places: the fastest \
                 driving route (green), a walking route (yellow) and a \
                 riskier shortcut (red). Each route carries a safety score \
                 derived from nearby police stations, hospitals and fuel \
                 stations.",
    about = "Plan safety-scored routes between two places"
)]
#[ortho_config(prefix = "SAFEROUTE")]
pub(crate) struct RoutesArgs {
    /// Place name to start from.
    #[arg(long = ARG_ROUTES_FROM, value_name = "place")]
    #[serde(default)]
    pub(crate) from: Option<String>,
    /// Place name to travel to.
    #[arg(long = ARG_ROUTES_TO, value_name = "place")]
    #[serde(default)]
    pub(crate) to: Option<String>,
    /// Start coordinate as `lat,lng`; takes precedence over `--from`.
    #[arg(long = ARG_ROUTES_FROM_COORD, value_name = "lat,lng", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) from_coord: Option<String>,
    /// Destination coordinate as `lat,lng`; takes precedence over `--to`.
    #[arg(long = ARG_ROUTES_TO_COORD, value_name = "lat,lng", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) to_coord: Option<String>,
    /// Base URL for the OSRM routing service.
    #[arg(long = ARG_OSRM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_url: Option<String>,
    /// Overpass interpreter URL for amenity lookups.
    #[arg(long = ARG_OVERPASS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
    /// Base URL for the Nominatim geocoder.
    #[arg(long = ARG_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
    /// HTTP request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Deadline for each amenity lookup in milliseconds.
    #[arg(long = ARG_LOOKUP_TIMEOUT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) lookup_timeout_ms: Option<u64>,
}

impl RoutesArgs {
    pub(crate) fn into_config(self) -> Result<RoutesConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RoutesConfig::try_from(merged)
    }
}

/// One end of a journey before geocoding.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Endpoint {
    /// A free-text place name.
    Place(String),
    /// An explicit coordinate.
    Coordinate(Coord<f64>),
}

impl Endpoint {
    fn from_options(
        place: Option<String>,
        coord: Option<String>,
        coord_field: &'static str,
        missing: CliError,
    ) -> Result<Self, CliError> {
        if let Some(value) = coord {
            return parse_lat_lng(coord_field, &value).map(Self::Coordinate);
        }
        place
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .map(Self::Place)
            .ok_or(missing)
    }
}

/// Resolved `routes` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RoutesConfig {
    pub(crate) start: Endpoint,
    pub(crate) end: Endpoint,
    pub(crate) osrm_url: String,
    pub(crate) overpass_url: String,
    pub(crate) nominatim_url: String,
    pub(crate) timeout_secs: Option<u64>,
    pub(crate) composer: ComposerConfig,
}

impl TryFrom<RoutesArgs> for RoutesConfig {
    type Error = CliError;

    fn try_from(args: RoutesArgs) -> Result<Self, Self::Error> {
        let start = Endpoint::from_options(
            args.from,
            args.from_coord,
            ARG_ROUTES_FROM_COORD,
            CliError::MissingArgument {
                field: ARG_ROUTES_FROM,
                env: ENV_ROUTES_FROM,
            },
        )?;
        let end = Endpoint::from_options(
            args.to,
            args.to_coord,
            ARG_ROUTES_TO_COORD,
            CliError::MissingArgument {
                field: ARG_ROUTES_TO,
                env: ENV_ROUTES_TO,
            },
        )?;

        let mut composer = ComposerConfig::default();
        if let Some(ms) = args.lookup_timeout_ms {
            composer.poi_timeout = Duration::from_millis(ms);
        }

        Ok(Self {
            start,
            end,
            osrm_url: args.osrm_url.unwrap_or_else(|| DEFAULT_OSRM_URL.to_owned()),
            overpass_url: args
                .overpass_url
                .unwrap_or_else(|| DEFAULT_OVERPASS_URL.to_owned()),
            nominatim_url: args
                .nominatim_url
                .unwrap_or_else(|| DEFAULT_NOMINATIM_URL.to_owned()),
            timeout_secs: args.timeout_secs,
            composer,
        })
    }
}

/// A resolved journey endpoint as printed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct PlaceReport {
    pub(crate) label: String,
    #[serde(flatten)]
    pub(crate) location: LatLng,
}

#[derive(Debug, Serialize)]
struct RouteReport<'a> {
    #[serde(flatten)]
    route: &'a ScoredRoute,
    advice: SafetyAdvice,
    message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RoutesReport<'a> {
    from: &'a PlaceReport,
    to: &'a PlaceReport,
    area_base_score: u8,
    routes: Vec<RouteReport<'a>>,
}

pub(crate) async fn run_routes(
    args: RoutesArgs,
    adapters: &dyn AdapterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_routes_with(&config, adapters, writer).await
}

pub(crate) async fn run_routes_with(
    config: &RoutesConfig,
    adapters: &dyn AdapterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let geocoder = adapters.geocoder(GeocoderConfig::default().with_http(http_config(
        config.nominatim_url.clone(),
        config.timeout_secs,
    )))?;
    let from = resolve_endpoint(geocoder.as_ref(), &config.start).await?;
    let to = resolve_endpoint(geocoder.as_ref(), &config.end).await?;

    let routing = adapters.routing(http_config(config.osrm_url.clone(), config.timeout_secs))?;
    let pois = adapters.pois(http_config(
        config.overpass_url.clone(),
        config.timeout_secs,
    ))?;
    let composer = RouteComposer::with_config(routing, pois, config.composer);
    let set = composer.find_routes(coord_of(&from), coord_of(&to)).await;
    info!(
        "{} -> {}: {} routes, area score {}",
        from.label,
        to.label,
        set.routes.len(),
        set.area_base_score
    );

    write_json(writer, &report(&from, &to, &set))
}

pub(crate) async fn resolve_endpoint(
    geocoder: &dyn Geocoder,
    endpoint: &Endpoint,
) -> Result<PlaceReport, CliError> {
    match endpoint {
        Endpoint::Place(query) => {
            let location = geocode(geocoder, query)
                .await
                .ok_or_else(|| CliError::UnresolvedPlace {
                    query: query.clone(),
                })?;
            Ok(PlaceReport {
                label: query.clone(),
                location: location.into(),
            })
        }
        Endpoint::Coordinate(location) => Ok(PlaceReport {
            label: reverse_geocode(geocoder, *location).await,
            location: (*location).into(),
        }),
    }
}

fn coord_of(place: &PlaceReport) -> Coord<f64> {
    Coord {
        x: place.location.lng,
        y: place.location.lat,
    }
}

fn report<'a>(from: &'a PlaceReport, to: &'a PlaceReport, set: &'a RouteSet) -> RoutesReport<'a> {
    let routes = set
        .routes
        .iter()
        .map(|route| {
            let advice = SafetyAdvice::for_score(route.safety_score);
            RouteReport {
                route,
                advice,
                message: advice.message(),
            }
        })
        .collect();
    RoutesReport {
        from,
        to,
        area_base_score: set.area_base_score,
        routes,
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RoutesConfig, CliError> {
    let merged = RoutesArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RoutesConfig::try_from(merged)
}
