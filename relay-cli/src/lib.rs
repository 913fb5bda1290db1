//! Command-line interface for planning relay routes and dispatching drivers.
//!
//! `relay plan` scatters candidate waypoints around a start point, runs the
//! A\* search to a goal and prints a JSON report of the route, its rider
//! handoffs and an optional fare quote. `relay dispatch` reads drivers and
//! passengers from a JSON request and prints who collects whom.
#![forbid(unsafe_code)]

mod dispatch;
mod error;
mod plan;

use std::io::Write;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

pub use error::CliError;

use dispatch::DispatchArgs;
use plan::PlanArgs;

pub(crate) const ARG_DISPATCH_REQUEST: &str = "request";
pub(crate) const ARG_START_LAT: &str = "start-lat";
pub(crate) const ARG_START_LNG: &str = "start-lng";
pub(crate) const ARG_GOAL_LAT: &str = "goal-lat";
pub(crate) const ARG_GOAL_LNG: &str = "goal-lng";
pub(crate) const ARG_RIDERS: &str = "riders";
pub(crate) const ENV_DISPATCH_REQUEST: &str = "RELAY_CMDS_DISPATCH_REQUEST_PATH";

/// Run the relay CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration merging or the
/// selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    init_logging(cli.log_level)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Plan(args) => plan::run_plan_with(args, writer),
        Command::Dispatch(args) => dispatch::run_dispatch_with(args, writer),
    }
}

fn init_logging(level: LogLevel) -> Result<(), CliError> {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();
    TermLogger::init(
        level.into(),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(CliError::InitLogging)
}

#[derive(Debug, Parser)]
#[command(
    name = "relay",
    about = "Plan relay routes over scattered waypoints and dispatch drivers",
    version
)]
struct Cli {
    /// Verbosity of diagnostics written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search a route through generated waypoints and report rider handoffs.
    Plan(PlanArgs),
    /// Pair waiting passengers with drivers from a JSON request.
    Dispatch(DispatchArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

fn write_payload(writer: &mut dyn Write, payload: &str) -> Result<(), CliError> {
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
