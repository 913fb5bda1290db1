//! Plan command implementation for the relay CLI.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use relay_core::{
    Colour, Coordinate, GeneratorConfig, HandoffPolicy, PathFinder, RiderPool, Route,
    RouteConsumer, SearchConfig, Topology, Waypoint, deliver_route, generate_candidates,
};
use relay_dispatch::{QuoteConfig, QuoteError, RideQuote, quote_route};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_GOAL_LAT, ARG_GOAL_LNG, ARG_RIDERS, ARG_START_LAT, ARG_START_LNG, CliError, write_payload,
};

const DEFAULT_START: (f64, f64) = (26.9124, 75.7873);
const DEFAULT_GOAL: (f64, f64) = (26.95, 75.825);
const START_NAME: &str = "Start";
const GOAL_NAME: &str = "Destination";

/// How rider labels are written during the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum PolicyArg {
    /// Label candidates in the order the search expands them.
    Expansion,
    /// Label only the stops of the finished route.
    Route,
}

impl From<PolicyArg> for HandoffPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Expansion => Self::Expansion,
            PolicyArg::Route => Self::Route,
        }
    }
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Scatter synthetic waypoints around the start, search the \
                 shortest route to the goal and report which rider carries \
                 each leg. Every option can also come from configuration \
                 files or RELAY_CMDS_PLAN_* environment variables.",
    about = "Plan a relay route through generated waypoints"
)]
#[ortho_config(prefix = "RELAY")]
pub(crate) struct PlanArgs {
    /// Latitude of the start point.
    #[arg(long = ARG_START_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) start_lat: Option<f64>,
    /// Longitude of the start point.
    #[arg(long = ARG_START_LNG, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) start_lng: Option<f64>,
    /// Latitude of the goal.
    #[arg(long = ARG_GOAL_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) goal_lat: Option<f64>,
    /// Longitude of the goal.
    #[arg(long = ARG_GOAL_LNG, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) goal_lng: Option<f64>,
    /// Number of synthetic waypoints to scatter around the start.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) count: Option<usize>,
    /// Maximum offset in degrees applied to each synthetic waypoint.
    #[arg(long, value_name = "degrees")]
    #[serde(default)]
    pub(crate) scatter: Option<f64>,
    /// Seed for the waypoint generator; random when omitted.
    #[arg(long, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Distance a rider covers before handing off.
    #[arg(long, value_name = "degrees")]
    #[serde(default)]
    pub(crate) threshold: Option<f64>,
    /// Number of riders in the rotation.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) riders: Option<usize>,
    /// Where rider labels are written.
    #[arg(long, value_enum)]
    #[serde(default)]
    pub(crate) policy: Option<PolicyArg>,
    /// Restrict each waypoint to its k nearest neighbours.
    #[arg(long, value_name = "k")]
    #[serde(default)]
    pub(crate) nearest: Option<usize>,
    /// Include a distance, time and fare quote for the route.
    #[arg(long)]
    #[serde(default)]
    pub(crate) quote: bool,
    /// Average speed used for quoted travel times.
    #[arg(long, value_name = "km/h")]
    #[serde(default)]
    pub(crate) speed_kmh: Option<f64>,
    /// Fare charged per quoted kilometre.
    #[arg(long, value_name = "amount")]
    #[serde(default)]
    pub(crate) rate_per_km: Option<f64>,
    /// Write the report to this file instead of standard output.
    #[arg(long, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Route origin; always the first candidate.
    pub(crate) start: Waypoint,
    /// Route target; always the second candidate.
    pub(crate) goal: Waypoint,
    /// Synthetic waypoint settings.
    pub(crate) generator: GeneratorConfig,
    /// Search and handoff settings.
    pub(crate) search: SearchConfig,
    /// Seed for the generator.
    pub(crate) seed: u64,
    /// Fare settings, when a quote was requested.
    pub(crate) quote: Option<QuoteConfig>,
    /// Report destination; standard output when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let start = endpoint(
            START_NAME,
            (ARG_START_LAT, args.start_lat.unwrap_or(DEFAULT_START.0)),
            (ARG_START_LNG, args.start_lng.unwrap_or(DEFAULT_START.1)),
        )?;
        let goal = endpoint(
            GOAL_NAME,
            (ARG_GOAL_LAT, args.goal_lat.unwrap_or(DEFAULT_GOAL.0)),
            (ARG_GOAL_LNG, args.goal_lng.unwrap_or(DEFAULT_GOAL.1)),
        )?;
        let riders = match args.riders {
            Some(0) => return Err(CliError::ZeroCount { field: ARG_RIDERS }),
            Some(size) => RiderPool::numbered(size),
            None => RiderPool::default(),
        };
        let defaults = GeneratorConfig::default();
        let generator = GeneratorConfig {
            count: args.count.unwrap_or(defaults.count),
            scatter: args.scatter.unwrap_or(defaults.scatter),
            riders: riders.clone(),
        };
        let search = SearchConfig {
            handoff_threshold: args
                .threshold
                .unwrap_or(relay_core::DEFAULT_HANDOFF_THRESHOLD),
            policy: args.policy.map_or_else(HandoffPolicy::default, HandoffPolicy::from),
            riders,
            topology: args
                .nearest
                .map_or(Topology::Complete, |k| Topology::Nearest { k }),
        };
        let quote = if args.quote {
            let config = QuoteConfig {
                average_speed_kmh: args
                    .speed_kmh
                    .unwrap_or(relay_dispatch::quote::DEFAULT_AVERAGE_SPEED_KMH),
                rate_per_km: args
                    .rate_per_km
                    .unwrap_or(relay_dispatch::quote::DEFAULT_RATE_PER_KM),
            };
            config.validate()?;
            Some(config)
        } else {
            None
        };
        Ok(Self {
            start,
            goal,
            generator,
            search,
            seed: args.seed.unwrap_or_else(rand::random),
            quote,
            output: args.output,
        })
    }
}

fn endpoint(
    name: &str,
    (lat_field, lat): (&'static str, f64),
    (lng_field, lng): (&'static str, f64),
) -> Result<Waypoint, CliError> {
    let location = Coordinate::new(lat, lng).map_err(|source| {
        let lat_valid = lat.is_finite() && lat.abs() <= relay_core::geometry::MAX_LATITUDE;
        let field = if lat_valid { lng_field } else { lat_field };
        CliError::InvalidCoordinate { field, source }
    })?;
    Ok(Waypoint::new(name, location))
}

/// One leg of the reported route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SegmentReport {
    from: String,
    to: String,
    rider: Option<String>,
    colour: Option<Colour>,
    distance: f64,
}

/// Everything the `plan` command prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct PlanReport {
    /// Seed that reproduces this plan.
    pub(crate) seed: u64,
    /// Whether the goal was reached.
    pub(crate) found: bool,
    /// The route, when one was found.
    pub(crate) route: Option<Route>,
    /// Legs of the route with their riders.
    pub(crate) segments: Vec<SegmentReport>,
    /// Route positions where a new rider takes over.
    pub(crate) handoffs: Vec<usize>,
    /// Fare estimate, when requested and a route was found.
    pub(crate) quote: Option<RideQuote>,
    /// Candidate set after the search has written its labels.
    pub(crate) candidates: Vec<Waypoint>,
}

/// Collects the search outcome into a [`PlanReport`].
#[derive(Debug)]
struct PlanReporter {
    seed: u64,
    quote_config: Option<QuoteConfig>,
    route: Option<Route>,
    quote: Option<Result<RideQuote, QuoteError>>,
}

impl PlanReporter {
    const fn new(seed: u64, quote_config: Option<QuoteConfig>) -> Self {
        Self {
            seed,
            quote_config,
            route: None,
            quote: None,
        }
    }

    fn finish(self, candidates: Vec<Waypoint>) -> Result<PlanReport, CliError> {
        let quote = self.quote.transpose()?;
        let segments = self
            .route
            .as_ref()
            .map(|route| {
                route
                    .segments()
                    .map(|segment| SegmentReport {
                        from: segment.from.name.clone(),
                        to: segment.to.name.clone(),
                        rider: segment.rider.map(str::to_owned),
                        colour: segment.colour,
                        distance: segment.distance,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let handoffs = self
            .route
            .as_ref()
            .map(Route::rider_handoffs)
            .unwrap_or_default();
        Ok(PlanReport {
            seed: self.seed,
            found: self.route.is_some(),
            route: self.route,
            segments,
            handoffs,
            quote,
            candidates,
        })
    }
}

impl RouteConsumer for PlanReporter {
    fn on_route_found(&mut self, route: &Route) {
        self.quote = self
            .quote_config
            .map(|config| quote_route(route, &config));
        self.route = Some(route.clone());
    }

    fn on_no_route_found(&mut self) {
        log::warn!("no route reaches the goal; reporting candidates only");
        self.route = None;
        self.quote = None;
    }
}

pub(crate) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_plan(&config)?;
    let payload = serde_json::to_string_pretty(&report).map_err(CliError::SerialiseReport)?;
    match &config.output {
        Some(path) => {
            relay_fs::write_file(path, format!("{payload}\n").as_bytes()).map_err(|source| {
                CliError::WriteReportFile {
                    path: path.clone(),
                    source,
                }
            })?;
            log::info!("wrote plan report to {path}");
            Ok(())
        }
        None => write_payload(writer, &payload),
    }
}

/// Generate candidates, search them and collect the report.
pub(crate) fn execute_plan(config: &PlanConfig) -> Result<PlanReport, CliError> {
    let finder = PathFinder::new(config.search.clone())?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut candidates =
        generate_candidates(&config.start, &config.goal, &config.generator, &mut rng)?;
    log::info!(
        "searching {} candidates with seed {} over a {} graph",
        candidates.len(),
        config.seed,
        config.search.topology
    );
    let route = finder.find_path(&config.start, &config.goal, &mut candidates)?;
    let mut reporter = PlanReporter::new(config.seed, config.quote);
    deliver_route(&route, &mut reporter);
    reporter.finish(candidates)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
