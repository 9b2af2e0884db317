//! Command-line interface for the Saferoute engine.
//!
//! Every subcommand resolves its options through `ortho_config`, so
//! endpoints and inputs may come from flags, `SAFEROUTE_*` environment
//! variables or configuration files. Results are written to stdout as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::io::Write;

mod adapters;
mod coords;
mod error;
mod lookup;
mod output;
mod routes;
mod scan;

pub use error::CliError;

use adapters::{AdapterFactory, HttpAdapterFactory};
use lookup::{GeocodeArgs, ReverseArgs, SuggestArgs};
use routes::RoutesArgs;
use scan::ScanArgs;

pub(crate) const ARG_ROUTES_FROM: &str = "from";
pub(crate) const ARG_ROUTES_TO: &str = "to";
pub(crate) const ARG_ROUTES_FROM_COORD: &str = "from-coord";
pub(crate) const ARG_ROUTES_TO_COORD: &str = "to-coord";
pub(crate) const ARG_SCAN_BBOX: &str = "bbox";
pub(crate) const ARG_QUERY: &str = "query";
pub(crate) const ARG_LOCATION: &str = "location";
pub(crate) const ARG_OSRM_URL: &str = "osrm-url";
pub(crate) const ARG_OVERPASS_URL: &str = "overpass-url";
pub(crate) const ARG_NOMINATIM_URL: &str = "nominatim-url";
pub(crate) const ARG_OPEN_METEO_URL: &str = "open-meteo-url";
pub(crate) const ARG_TIMEOUT_SECS: &str = "timeout-secs";
pub(crate) const ARG_LOOKUP_TIMEOUT_MS: &str = "lookup-timeout-ms";
pub(crate) const ARG_COUNTRY_CODE: &str = "country-code";
pub(crate) const ARG_COUNTRY_NAME: &str = "country-name";

pub(crate) const ENV_ROUTES_FROM: &str = "SAFEROUTE_CMDS_ROUTES_FROM";
pub(crate) const ENV_ROUTES_TO: &str = "SAFEROUTE_CMDS_ROUTES_TO";
pub(crate) const ENV_SCAN_BBOX: &str = "SAFEROUTE_CMDS_SCAN_BBOX";
pub(crate) const ENV_SUGGEST_QUERY: &str = "SAFEROUTE_CMDS_SUGGEST_QUERY";
pub(crate) const ENV_GEOCODE_QUERY: &str = "SAFEROUTE_CMDS_GEOCODE_QUERY";
pub(crate) const ENV_REVERSE_LOCATION: &str = "SAFEROUTE_CMDS_REVERSE_LOCATION";

/// Run the Saferoute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, a place
/// cannot be resolved, an adapter cannot be built or output cannot be
/// written. Upstream service failures degrade to empty results instead.
pub async fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &HttpAdapterFactory, &mut stdout).await
}

pub(crate) async fn run_command(
    command: Command,
    adapters: &dyn AdapterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Routes(args) => routes::run_routes(args, adapters, writer).await,
        Command::Scan(args) => scan::run_scan(args, adapters, writer).await,
        Command::Suggest(args) => lookup::run_suggest(args, adapters, writer).await,
        Command::Geocode(args) => lookup::run_geocode(args, adapters, writer).await,
        Command::Reverse(args) => lookup::run_reverse(args, adapters, writer).await,
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "saferoute",
    about = "Safety-scored route planning over open map services",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Plan green, yellow and red routes between two places.
    Routes(RoutesArgs),
    /// List police stations, hospitals and fuel stations inside a box.
    Scan(ScanArgs),
    /// Autocomplete a place name.
    Suggest(SuggestArgs),
    /// Resolve a place name to a coordinate.
    Geocode(GeocodeArgs),
    /// Label a coordinate with a short place name.
    Reverse(ReverseArgs),
}

#[cfg(test)]
mod tests;
