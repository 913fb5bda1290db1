//! Property-based tests for the dispatch strategies.
//!
//! # Invariants tested
//!
//! - **Optimality:** Hungarian matching never costs more than greedy
//!   matching and equals an exhaustive search on small requests.
//! - **Coverage:** every passenger is either assigned or reported unmatched,
//!   and no driver is used twice.

use std::collections::HashSet;

use proptest::prelude::*;
use relay_core::Coordinate;
use relay_dispatch::{
    DispatchRequest, Driver, GreedyMatching, HungarianMatching, MatchOutcome, Passenger,
    dispatch,
};

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-10.0_f64..10.0, -10.0_f64..10.0)
        .prop_filter_map("finite coordinate", |(lat, lng)| Coordinate::new(lat, lng).ok())
}

fn request(max: usize) -> impl Strategy<Value = DispatchRequest> {
    (
        prop::collection::vec(coordinate(), 0..=max),
        prop::collection::vec(coordinate(), 0..=max),
    )
        .prop_map(|(drivers, passengers)| DispatchRequest {
            drivers: (1..).zip(drivers).map(|(id, at)| Driver::new(id, at)).collect(),
            passengers: (1..).zip(passengers).map(|(id, at)| Passenger::new(id, at)).collect(),
        })
}

fn run(request: &DispatchRequest, hungarian: bool) -> Result<MatchOutcome, TestCaseError> {
    let outcome = if hungarian {
        dispatch(&HungarianMatching, request)
    } else {
        dispatch(&GreedyMatching, request)
    };
    outcome.map_err(|err| TestCaseError::fail(err.to_string()))
}

/// Cheapest total over every way of serving `min(drivers, passengers)`
/// passengers.
#[expect(clippy::float_arithmetic, reason = "sums pickup distances")]
fn exhaustive_best(request: &DispatchRequest) -> f64 {
    fn search(request: &DispatchRequest, passenger: usize, used: &mut Vec<bool>, left: usize) -> f64 {
        if left == 0 {
            return 0.0;
        }
        let Some(current) = request.passengers.get(passenger) else {
            return f64::INFINITY;
        };
        // Skip this passenger if enough passengers remain to fill the fleet.
        let mut best = if request.passengers.len() - passenger > left {
            search(request, passenger + 1, used, left)
        } else {
            f64::INFINITY
        };
        for (index, driver) in request.drivers.iter().enumerate() {
            if used.get(index).copied().unwrap_or(true) {
                continue;
            }
            if let Some(slot) = used.get_mut(index) {
                *slot = true;
            }
            let cost = relay_core::geometry::distance(driver.location, current.pickup)
                + search(request, passenger + 1, used, left - 1);
            if let Some(slot) = used.get_mut(index) {
                *slot = false;
            }
            best = best.min(cost);
        }
        best
    }
    let mut used = vec![false; request.drivers.len()];
    let pairs = request.drivers.len().min(request.passengers.len());
    search(request, 0, &mut used, pairs)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: the optimal assignment is never worse than the greedy one.
    #[test]
    #[expect(clippy::float_arithmetic, reason = "compares totals with a tolerance")]
    fn hungarian_never_costs_more_than_greedy(request in request(8)) {
        let greedy = run(&request, false)?;
        let optimal = run(&request, true)?;
        prop_assert_eq!(greedy.assignments.len(), optimal.assignments.len());
        prop_assert!(optimal.total_distance <= greedy.total_distance + 1e-9);
    }

    /// Property: Hungarian matching finds the exhaustive optimum.
    #[test]
    #[expect(clippy::float_arithmetic, reason = "compares totals with a tolerance")]
    fn hungarian_matches_exhaustive_search(request in request(5)) {
        let optimal = run(&request, true)?;
        prop_assert!((optimal.total_distance - exhaustive_best(&request)).abs() < 1e-9);
    }

    /// Property: every passenger is accounted for exactly once and no driver
    /// is sent twice.
    #[test]
    fn every_passenger_is_accounted_for(request in request(8), hungarian in any::<bool>()) {
        let outcome = run(&request, hungarian)?;
        let served = outcome.assignments.len();
        prop_assert_eq!(served + outcome.unmatched_passengers.len(), request.passengers.len());
        prop_assert_eq!(served, request.drivers.len().min(request.passengers.len()));

        let drivers: HashSet<u64> = outcome.assignments.iter().map(|a| a.driver).collect();
        prop_assert_eq!(drivers.len(), served);
    }
}
