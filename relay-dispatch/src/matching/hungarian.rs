//! Minimum-cost assignment with the Hungarian (Kuhn-Munkres) method.
//!
//! Rectangular requests are padded to a square with zero-cost dummy drivers
//! or passengers, so either every driver or every passenger ends up paired.
//! Passengers paired with a dummy driver are reported unmatched.

use super::{Assignment, Driver, MatchOutcome, MatchingAlgorithm, Passenger, pickup_distance};

/// Pair passengers and drivers so the total pickup distance is minimal.
///
/// Runs in `O(n³)` time for `n = max(drivers, passengers)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HungarianMatching;

impl MatchingAlgorithm for HungarianMatching {
    fn name(&self) -> &'static str {
        "hungarian"
    }

    fn assign(&self, drivers: &[Driver], passengers: &[Passenger]) -> MatchOutcome {
        let size = drivers.len().max(passengers.len());
        if size == 0 {
            return MatchOutcome::default();
        }
        let costs = cost_matrix(drivers, passengers, size);
        let Some(rows) = solve(&costs) else {
            log::warn!(
                "pickup costs admit no finite assignment; leaving {} passengers unmatched",
                passengers.len()
            );
            let unmatched = passengers.iter().map(|passenger| passenger.id).collect();
            return MatchOutcome::new(Vec::new(), unmatched);
        };

        let mut assignments = Vec::with_capacity(passengers.len().min(drivers.len()));
        let mut unmatched = Vec::new();
        for (column, passenger) in passengers.iter().enumerate() {
            match rows.get(column).and_then(|&row| drivers.get(row)) {
                Some(driver) => assignments.push(Assignment {
                    passenger: passenger.id,
                    driver: driver.id,
                    distance: pickup_distance(driver, passenger),
                }),
                None => unmatched.push(passenger.id),
            }
        }
        MatchOutcome::new(assignments, unmatched)
    }
}

/// Square cost matrix with drivers as rows and passengers as columns.
fn cost_matrix(drivers: &[Driver], passengers: &[Passenger], size: usize) -> Vec<Vec<f64>> {
    (0..size)
        .map(|row| {
            (0..size)
                .map(|column| match (drivers.get(row), passengers.get(column)) {
                    (Some(driver), Some(passenger)) => pickup_distance(driver, passenger),
                    _ => 0.0,
                })
                .collect()
        })
        .collect()
}

/// Solve the square assignment problem, returning the row chosen for each
/// column.
///
/// Rows and columns are numbered from one internally; index zero is the
/// virtual column used to start each augmenting search. Returns `None` when
/// an augmenting search finds no finite slack, which happens once NaN or
/// infinite costs leave no finite assignment.
#[expect(
    clippy::indexing_slicing,
    reason = "all indices are bounded by the square matrix dimension"
)]
#[expect(
    clippy::float_arithmetic,
    reason = "potentials are adjusted by floating-point slack"
)]
fn solve(costs: &[Vec<f64>]) -> Option<Vec<usize>> {
    let size = costs.len();
    let mut row_potential = vec![0.0; size + 1];
    let mut column_potential = vec![0.0; size + 1];
    let mut column_owner = vec![0_usize; size + 1];
    let mut previous_column = vec![0_usize; size + 1];

    for row in 1..=size {
        column_owner[0] = row;
        let mut current = 0_usize;
        let mut slack = vec![f64::INFINITY; size + 1];
        let mut visited = vec![false; size + 1];

        loop {
            visited[current] = true;
            let owner = column_owner[current];
            let mut delta = f64::INFINITY;
            let mut next = 0_usize;
            for column in 1..=size {
                if visited[column] {
                    continue;
                }
                let reduced =
                    costs[owner - 1][column - 1] - row_potential[owner] - column_potential[column];
                if reduced < slack[column] {
                    slack[column] = reduced;
                    previous_column[column] = current;
                }
                if slack[column] < delta {
                    delta = slack[column];
                    next = column;
                }
            }
            if !delta.is_finite() {
                return None;
            }
            for column in 0..=size {
                if visited[column] {
                    row_potential[column_owner[column]] += delta;
                    column_potential[column] -= delta;
                } else {
                    slack[column] -= delta;
                }
            }
            current = next;
            if column_owner[current] == 0 {
                break;
            }
        }

        while current != 0 {
            let previous = previous_column[current];
            column_owner[current] = column_owner[previous];
            current = previous;
        }
    }

    Some(
        column_owner
            .iter()
            .skip(1)
            .map(|&row| row.saturating_sub(1))
            .collect(),
    )
}
