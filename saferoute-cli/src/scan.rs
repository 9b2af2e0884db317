//! `scan` command: list safety amenities inside a bounding box.

use std::io::Write;

use clap::Parser;
use geo::Rect;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use saferoute_core::bounds::BoxEdges;
use saferoute_core::{AreaScan, density};
use saferoute_data::overpass::DEFAULT_OVERPASS_URL;
use serde::{Deserialize, Serialize};

use crate::adapters::{AdapterFactory, http_config};
use crate::coords::parse_bbox;
use crate::output::write_json;
use crate::{ARG_OVERPASS_URL, ARG_SCAN_BBOX, ARG_TIMEOUT_SECS, CliError, ENV_SCAN_BBOX};

/// CLI arguments for the `scan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "scan",
    about = "List police stations, hospitals and fuel stations inside a box"
)]
#[ortho_config(prefix = "SAFEROUTE")]
pub(crate) struct ScanArgs {
    /// Bounding box as `south,west,north,east`.
    #[arg(long = ARG_SCAN_BBOX, value_name = "s,w,n,e", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) bbox: Option<String>,
    /// Overpass interpreter URL.
    #[arg(long = ARG_OVERPASS_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) overpass_url: Option<String>,
    /// HTTP request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl ScanArgs {
    pub(crate) fn into_config(self) -> Result<ScanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScanConfig::try_from(merged)
    }
}

/// Resolved `scan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScanConfig {
    pub(crate) bbox: Rect<f64>,
    pub(crate) overpass_url: String,
    pub(crate) timeout_secs: Option<u64>,
}

impl TryFrom<ScanArgs> for ScanConfig {
    type Error = CliError;

    fn try_from(args: ScanArgs) -> Result<Self, Self::Error> {
        let raw = args.bbox.ok_or(CliError::MissingArgument {
            field: ARG_SCAN_BBOX,
            env: ENV_SCAN_BBOX,
        })?;
        Ok(Self {
            bbox: parse_bbox(ARG_SCAN_BBOX, &raw)?,
            overpass_url: args
                .overpass_url
                .unwrap_or_else(|| DEFAULT_OVERPASS_URL.to_owned()),
            timeout_secs: args.timeout_secs,
        })
    }
}

#[derive(Debug, Serialize)]
struct ScanReport<'a> {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
    total: usize,
    #[serde(flatten)]
    amenities: &'a AreaScan,
}

pub(crate) async fn run_scan(
    args: ScanArgs,
    adapters: &dyn AdapterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_scan_with(&config, adapters, writer).await
}

pub(crate) async fn run_scan_with(
    config: &ScanConfig,
    adapters: &dyn AdapterFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let provider = adapters.pois(http_config(
        config.overpass_url.clone(),
        config.timeout_secs,
    ))?;
    let amenities = density::scan(provider.as_ref(), &config.bbox).await;
    info!("scan found {} amenities", amenities.total());

    let BoxEdges {
        south,
        west,
        north,
        east,
    } = BoxEdges::from(config.bbox);
    write_json(writer, &ScanReport {
        south,
        west,
        north,
        east,
        total: amenities.total(),
        amenities: &amenities,
    })
}
