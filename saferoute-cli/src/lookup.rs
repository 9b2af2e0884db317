//! `suggest`, `geocode` and `reverse` commands.

use std::io::Write;

use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use saferoute_core::PlaceSuggestion;
use saferoute_core::geocoding::suggest;
use saferoute_data::geocoding::{DEFAULT_NOMINATIM_URL, DEFAULT_OPEN_METEO_URL};
use saferoute_data::{GeocoderConfig, TargetCountry};
use serde::{Deserialize, Serialize};

use crate::adapters::{AdapterFactory, http_config};
use crate::coords::parse_lat_lng;
use crate::output::write_json;
use crate::routes::{Endpoint, resolve_endpoint};
use crate::{
    ARG_COUNTRY_CODE, ARG_COUNTRY_NAME, ARG_LOCATION, ARG_NOMINATIM_URL, ARG_OPEN_METEO_URL,
    ARG_QUERY, ARG_TIMEOUT_SECS, CliError, ENV_GEOCODE_QUERY, ENV_REVERSE_LOCATION,
    ENV_SUGGEST_QUERY,
};

/// CLI arguments for the `suggest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "suggest",
    long_about = "Autocomplete a place name. Queries shorter than three \
                 characters return no suggestions; results are restricted \
                 to the target country and capped at five.",
    about = "Autocomplete a place name"
)]
#[ortho_config(prefix = "SAFEROUTE")]
pub(crate) struct SuggestArgs {
    /// Partial place name.
    #[arg(value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Base URL for the Open-Meteo geocoding API.
    #[arg(long = ARG_OPEN_METEO_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) open_meteo_url: Option<String>,
    /// ISO country code suggestions are restricted to.
    #[arg(long = ARG_COUNTRY_CODE, value_name = "code")]
    #[serde(default)]
    pub(crate) country_code: Option<String>,
    /// Country name suggestions are restricted to.
    #[arg(long = ARG_COUNTRY_NAME, value_name = "name")]
    #[serde(default)]
    pub(crate) country_name: Option<String>,
    /// HTTP request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl SuggestArgs {
    pub(crate) fn into_config(self) -> Result<SuggestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SuggestConfig::try_from(merged)
    }
}

/// Resolved `suggest` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SuggestConfig {
    pub(crate) query: String,
    pub(crate) geocoder: GeocoderConfig,
}

impl TryFrom<SuggestArgs> for SuggestConfig {
    type Error = CliError;

    fn try_from(args: SuggestArgs) -> Result<Self, Self::Error> {
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_QUERY,
            env: ENV_SUGGEST_QUERY,
        })?;
        let default_country = TargetCountry::default();
        let country = TargetCountry::new(
            args.country_code.unwrap_or(default_country.code),
            args.country_name.unwrap_or(default_country.name),
        );
        let mut geocoder = GeocoderConfig::default()
            .with_suggest_url(
                args.open_meteo_url
                    .unwrap_or_else(|| DEFAULT_OPEN_METEO_URL.to_owned()),
            )
            .with_country(country);
        if let Some(secs) = args.timeout_secs {
            geocoder =
                geocoder.with_http(http_config(DEFAULT_NOMINATIM_URL.to_owned(), Some(secs)));
        }
        Ok(Self { query, geocoder })
    }
}

/// CLI arguments for the `geocode` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "geocode", about = "Resolve a place name to a coordinate")]
#[ortho_config(prefix = "SAFEROUTE")]
pub(crate) struct GeocodeArgs {
    /// Place name to resolve.
    #[arg(value_name = "query")]
    #[serde(default)]
    pub(crate) query: Option<String>,
    /// Base URL for the Nominatim geocoder.
    #[arg(long = ARG_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
    /// HTTP request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl GeocodeArgs {
    pub(crate) fn into_config(self) -> Result<GeocodeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GeocodeConfig::try_from(merged)
    }
}

/// Resolved `geocode` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GeocodeConfig {
    pub(crate) query: String,
    pub(crate) geocoder: GeocoderConfig,
}

impl TryFrom<GeocodeArgs> for GeocodeConfig {
    type Error = CliError;

    fn try_from(args: GeocodeArgs) -> Result<Self, Self::Error> {
        let query = args.query.ok_or(CliError::MissingArgument {
            field: ARG_QUERY,
            env: ENV_GEOCODE_QUERY,
        })?;
        Ok(Self {
            query,
            geocoder: nominatim_config(args.nominatim_url, args.timeout_secs),
        })
    }
}

/// CLI arguments for the `reverse` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "reverse", about = "Label a coordinate with a short place name")]
#[ortho_config(prefix = "SAFEROUTE")]
pub(crate) struct ReverseArgs {
    /// Coordinate as `lat,lng`.
    #[arg(value_name = "lat,lng", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Base URL for the Nominatim geocoder.
    #[arg(long = ARG_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
    /// HTTP request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl ReverseArgs {
    pub(crate) fn into_config(self) -> Result<ReverseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReverseConfig::try_from(merged)
    }
}

/// Resolved `reverse` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReverseConfig {
    pub(crate) location: Coord<f64>,
    pub(crate) geocoder: GeocoderConfig,
}

impl TryFrom<ReverseArgs> for ReverseConfig {
    type Error = CliError;

    fn try_from(args: ReverseArgs) -> Result<Self, Self::Error> {
        let raw = args.location.ok_or(CliError::MissingArgument {
            field: ARG_LOCATION,
            env: ENV_REVERSE_LOCATION,
        })?;
        Ok(Self {
            location: parse_lat_lng(ARG_LOCATION, &raw)?,
            geocoder: nominatim_config(args.nominatim_url, args.timeout_secs),
        })
    }
}

fn nominatim_config(base_url: Option<String>, timeout_secs: Option<u64>) -> GeocoderConfig {
    let base_url = base_url.unwrap_or_else(|| DEFAULT_NOMINATIM_URL.to_owned());
    GeocoderConfig::default().with_http(http_config(base_url, timeout_secs))
}

#[derive(Debug, Serialize)]
struct SuggestionReport<'a> {
    label: String,
    #[serde(flatten)]
    place: &'a PlaceSuggestion,
}

pub(crate) async fn run_suggest(
    args: SuggestArgs,
    adapters: &dyn AdapterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_suggest_with(&config, adapters, writer).await
}

pub(crate) async fn run_suggest_with(
    config: &SuggestConfig,
    adapters: &dyn AdapterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let geocoder = adapters.geocoder(config.geocoder.clone())?;
    let suggestions = suggest(geocoder.as_ref(), &config.query).await;
    let report: Vec<SuggestionReport<'_>> = suggestions
        .iter()
        .map(|place| SuggestionReport {
            label: place.label(),
            place,
        })
        .collect();
    write_json(writer, &report)
}

pub(crate) async fn run_geocode(
    args: GeocodeArgs,
    adapters: &dyn AdapterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_geocode_with(&config, adapters, writer).await
}

pub(crate) async fn run_geocode_with(
    config: &GeocodeConfig,
    adapters: &dyn AdapterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let geocoder = adapters.geocoder(config.geocoder.clone())?;
    let endpoint = Endpoint::Place(config.query.clone());
    let place = resolve_endpoint(geocoder.as_ref(), &endpoint).await?;
    write_json(writer, &place)
}

pub(crate) async fn run_reverse(
    args: ReverseArgs,
    adapters: &dyn AdapterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_reverse_with(&config, adapters, writer).await
}

pub(crate) async fn run_reverse_with(
    config: &ReverseConfig,
    adapters: &dyn AdapterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let geocoder = adapters.geocoder(config.geocoder.clone())?;
    let endpoint = Endpoint::Coordinate(config.location);
    let place = resolve_endpoint(geocoder.as_ref(), &endpoint).await?;
    write_json(writer, &place)
}
