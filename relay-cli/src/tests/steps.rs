//! Behaviour-driven step definitions driving the relay CLI scenarios.

use super::helpers::{CONTESTED_REQUEST, pairs, parse_report, utf8_tempdir, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use relay_core::SearchError;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;
use tempfile::TempDir;

/// Aggregates CLI scenario state so each step only needs a single world
/// argument.
#[derive(Debug)]
struct CliWorld {
    _tmp: TempDir,
    request_path: Utf8PathBuf,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CliWorld {
    fn new() -> Self {
        let (tmp, root) = utf8_tempdir();
        Self {
            _tmp: tmp,
            request_path: root.join("request.json"),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn report(&self) -> Value {
        parse_report(&self.stdout.borrow())
    }
}

#[fixture]
fn world() -> CliWorld {
    CliWorld::new()
}

#[given("the relay arguments {arguments}")]
fn relay_arguments(#[from(world)] world: &CliWorld, arguments: String) {
    world.cli_args.borrow_mut().extend(
        arguments
            .trim_matches('"')
            .split_whitespace()
            .map(str::to_owned),
    );
}

#[given("a dispatch request with two drivers and two passengers")]
fn dispatch_request(#[from(world)] world: &CliWorld) {
    write_utf8(&world.request_path, CONTESTED_REQUEST.as_bytes());
    world
        .cli_args
        .borrow_mut()
        .extend(["dispatch".to_owned(), world.request_path.as_str().to_owned()]);
}

#[given("a dispatch request path that does not exist")]
fn missing_dispatch_request(#[from(world)] world: &CliWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend(["dispatch".to_owned(), world.request_path.as_str().to_owned()]);
}

#[when("I run the relay command")]
fn run_relay(#[from(world)] world: &CliWorld) {
    let mut invocation = vec!["relay".to_owned()];
    invocation.extend(world.cli_args.borrow().iter().cloned());
    let mut stdout = world.stdout.borrow_mut();
    let outcome = Cli::try_parse_from(invocation)
        .map_err(CliError::ArgumentParsing)
        .and_then(|cli| run_command(cli.command, &mut *stdout));
    world.result.replace(Some(outcome));
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &CliWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref().expect("result recorded") {
        Ok(()) => {}
        Err(err) => panic!("expected success, found {err:?}"),
    }
}

#[then("the route runs from {from} to {to}")]
fn route_endpoints(#[from(world)] world: &CliWorld, from: String, to: String) {
    let report = world.report();
    let waypoints = report
        .pointer("/route/waypoints")
        .and_then(Value::as_array)
        .expect("route waypoints");
    let name = |waypoint: Option<&Value>| {
        waypoint
            .and_then(|value| value.get("name"))
            .and_then(Value::as_str)
            .map(str::to_owned)
    };
    assert_eq!(name(waypoints.first()).as_deref(), Some(from.trim_matches('"')));
    assert_eq!(name(waypoints.last()).as_deref(), Some(to.trim_matches('"')));
}

#[then("the report lists {count} candidates")]
fn candidate_count(#[from(world)] world: &CliWorld, count: usize) {
    let report = world.report();
    let candidates = report
        .get("candidates")
        .and_then(Value::as_array)
        .expect("candidates array");
    assert_eq!(candidates.len(), count);
}

#[then("the report includes a fare quote")]
fn includes_quote(#[from(world)] world: &CliWorld) {
    let report = world.report();
    let fare = report
        .pointer("/quote/total_fare")
        .and_then(Value::as_f64)
        .expect("quote total");
    assert!(fare > 0.0);
}

#[then("the command fails because the search settings are invalid")]
fn search_settings_rejected(#[from(world)] world: &CliWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref().expect("result recorded") {
        Err(CliError::Search(SearchError::InvalidNeighbourCount)) => {}
        other => panic!("expected InvalidNeighbourCount, found {other:?}"),
    }
}

#[then("the command fails because riders must be at least one")]
fn riders_rejected(#[from(world)] world: &CliWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref().expect("result recorded") {
        Err(CliError::ZeroCount { field }) => assert_eq!(*field, ARG_RIDERS),
        other => panic!("expected ZeroCount, found {other:?}"),
    }
}

#[then("passenger {passenger} is collected by driver {driver}")]
fn collected_by(#[from(world)] world: &CliWorld, passenger: u64, driver: u64) {
    let report = world.report();
    let assigned = pairs(&report)
        .into_iter()
        .find(|&(id, _)| id == passenger)
        .map(|(_, id)| id);
    assert_eq!(assigned, Some(driver));
}

#[then("the command reports that the request file is missing")]
fn request_missing(#[from(world)] world: &CliWorld) {
    let borrowed = world.result.borrow();
    match borrowed.as_ref().expect("result recorded") {
        Err(CliError::MissingSourceFile { field, path }) => {
            assert_eq!(*field, ARG_DISPATCH_REQUEST);
            assert_eq!(*path, world.request_path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

macro_rules! register_plan_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/plan_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CliWorld) {
            let _ = world;
        }
    };
}

macro_rules! register_dispatch_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/dispatch_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CliWorld) {
            let _ = world;
        }
    };
}

register_plan_scenario!(
    seeded_plan_report,
    "planning a seeded route prints the route report"
);
register_plan_scenario!(quoted_plan, "requesting a quote adds fare estimates");
register_plan_scenario!(zero_neighbours, "rejecting a zero neighbour count");
register_plan_scenario!(zero_riders, "rejecting an empty rider rotation");
register_dispatch_scenario!(
    greedy_dispatch,
    "greedy dispatch serves passengers in request order"
);
register_dispatch_scenario!(
    hungarian_dispatch,
    "hungarian dispatch minimises total pickup distance"
);
register_dispatch_scenario!(missing_request, "reporting a missing request file");
