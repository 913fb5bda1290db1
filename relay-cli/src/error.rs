//! Error types emitted by the relay CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use relay_core::{CoordinateError, GeneratorError, SearchError};
use relay_dispatch::{DispatchError, QuoteError};
use thiserror::Error;

/// Errors emitted by the relay CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// Installing the terminal logger failed.
    #[error("failed to initialise logging: {0}")]
    InitLogging(#[source] log::SetLoggerError),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag naming the offending value.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A latitude or longitude option was not finite or fell outside the
    /// valid degree range.
    #[error("{field} is not a usable coordinate: {source}")]
    InvalidCoordinate {
        /// Flag naming the offending value.
        field: &'static str,
        /// Coordinate validation failure.
        #[source]
        source: CoordinateError,
    },
    /// A count option was zero where at least one is required.
    #[error("{field} must be at least 1")]
    ZeroCount {
        /// Flag naming the offending value.
        field: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Flag naming the offending value.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the offending value.
        field: &'static str,
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Candidate generation rejected the plan settings.
    #[error("failed to generate candidates: {0}")]
    Generate(#[from] GeneratorError),
    /// The path search rejected its configuration or candidates.
    #[error("path search failed: {0}")]
    Search(#[from] SearchError),
    /// The fare settings were unusable.
    #[error("invalid quote settings: {0}")]
    Quote(#[from] QuoteError),
    /// Opening the dispatch request file failed.
    #[error("failed to open dispatch request at {path:?}: {source}")]
    OpenDispatchRequest {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Dispatch request JSON could not be decoded.
    #[error("failed to parse dispatch request JSON at {path:?}: {source}")]
    ParseDispatchRequest {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The dispatch request repeated a driver or passenger id.
    #[error("dispatch request in {path:?} is invalid: {source}")]
    InvalidDispatchRequest {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: DispatchError,
    },
    /// Serialising a report failed.
    #[error("failed to serialise report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing a report to standard output failed.
    #[error("failed to write report: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing a report to a file failed.
    #[error("failed to write report to {path:?}: {source}")]
    WriteReportFile {
        /// Path involved in the failure.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}
