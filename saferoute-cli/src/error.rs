//! Error types emitted by the Saferoute CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use saferoute_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the Saferoute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A coordinate option is not a `lat,lng` pair inside WGS84 bounds.
    #[error("{field} value {value:?} is not a valid lat,lng coordinate")]
    InvalidCoordinate { field: &'static str, value: String },
    /// The bounding box option is not four `south,west,north,east` numbers.
    #[error("{field} value {value:?} is not a valid south,west,north,east box")]
    InvalidBoundingBox { field: &'static str, value: String },
    /// A place name did not resolve to a coordinate.
    #[error("could not find a location for {query:?}")]
    UnresolvedPlace { query: String },
    /// Constructing an HTTP adapter failed.
    #[error("failed to build {service} adapter for {base_url:?}: {source}")]
    BuildAdapter {
        service: &'static str,
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
