//! Dispatch command implementation for the relay CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use relay_dispatch::{
    DispatchRequest, GreedyMatching, HungarianMatching, MatchOutcome, MatchingAlgorithm, dispatch,
};
use relay_fs::open_utf8_file;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};

use crate::{ARG_DISPATCH_REQUEST, CliError, ENV_DISPATCH_REQUEST, write_payload};

/// Matching strategy selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum AlgorithmArg {
    /// Each passenger in turn takes the nearest free driver.
    Greedy,
    /// Minimise the total pickup distance across the request.
    #[default]
    Hungarian,
}

impl AlgorithmArg {
    pub(crate) const fn strategy(self) -> &'static dyn MatchingAlgorithm {
        match self {
            Self::Greedy => &GreedyMatching,
            Self::Hungarian => &HungarianMatching,
        }
    }
}

/// CLI arguments for the `dispatch` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Pair waiting passengers with available drivers. The \
                 request is a JSON document with `drivers` and `passengers` \
                 arrays; the assignment is printed as JSON.",
    about = "Assign drivers to passengers"
)]
#[ortho_config(prefix = "RELAY")]
pub(crate) struct DispatchArgs {
    /// Path to a JSON file containing a dispatch request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Matching strategy.
    #[arg(long, value_enum)]
    #[serde(default)]
    pub(crate) algorithm: Option<AlgorithmArg>,
}

impl DispatchArgs {
    pub(crate) fn into_config(self) -> Result<DispatchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DispatchConfig::try_from(merged)
    }
}

/// Resolved `dispatch` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DispatchConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Strategy used to pair passengers and drivers.
    pub(crate) algorithm: AlgorithmArg,
}

impl DispatchConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match relay_fs::file_is_file(&self.request_path) {
            Ok(true) => Ok(()),
            Err(source) if source.kind() != std::io::ErrorKind::NotFound => {
                Err(CliError::InspectSourcePath {
                    field: ARG_DISPATCH_REQUEST,
                    path: self.request_path.clone(),
                    source,
                })
            }
            Ok(false) | Err(_) => Err(CliError::MissingSourceFile {
                field: ARG_DISPATCH_REQUEST,
                path: self.request_path.clone(),
            }),
        }
    }
}

impl TryFrom<DispatchArgs> for DispatchConfig {
    type Error = CliError;

    fn try_from(args: DispatchArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_DISPATCH_REQUEST,
            env: ENV_DISPATCH_REQUEST,
        })?;
        Ok(Self {
            request_path,
            algorithm: args.algorithm.unwrap_or_default(),
        })
    }
}

/// Printed result of a dispatch round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct DispatchReport {
    /// Name of the strategy that produced the outcome.
    pub(crate) algorithm: &'static str,
    /// Pairings and leftovers.
    #[serde(flatten)]
    pub(crate) outcome: MatchOutcome,
}

pub(crate) fn run_dispatch_with(
    args: DispatchArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_dispatch(args)?;
    let payload = serde_json::to_string_pretty(&report).map_err(CliError::SerialiseReport)?;
    write_payload(writer, &payload)
}

fn execute_dispatch(args: DispatchArgs) -> Result<DispatchReport, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request = load_dispatch_request(&config.request_path)?;
    let algorithm = config.algorithm.strategy();
    let outcome =
        dispatch(algorithm, &request).map_err(|source| CliError::InvalidDispatchRequest {
            path: config.request_path.clone(),
            source,
        })?;
    Ok(DispatchReport {
        algorithm: algorithm.name(),
        outcome,
    })
}

/// Loads a JSON-encoded [`DispatchRequest`] from disk.
pub(crate) fn load_dispatch_request(path: &Utf8Path) -> Result<DispatchRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenDispatchRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseDispatchRequest {
        path: path.to_path_buf(),
        source,
    })
}
