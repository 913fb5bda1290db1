//! Nearest-available-driver matching.

use super::{Assignment, Driver, MatchOutcome, MatchingAlgorithm, Passenger, pickup_distance};

/// Serve passengers in request order, each taking the closest free driver.
///
/// Only a strictly closer driver displaces the current choice, so the driver
/// listed first wins a tie. The result depends on passenger order and can be
/// far from the cheapest overall pairing.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatching;

impl MatchingAlgorithm for GreedyMatching {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn assign(&self, drivers: &[Driver], passengers: &[Passenger]) -> MatchOutcome {
        let mut taken = vec![false; drivers.len()];
        let mut assignments = Vec::with_capacity(passengers.len().min(drivers.len()));
        let mut unmatched = Vec::new();

        for passenger in passengers {
            let nearest = drivers
                .iter()
                .zip(&taken)
                .enumerate()
                .filter(|(_, (_, claimed))| !**claimed)
                .map(|(index, (driver, _))| (index, driver, pickup_distance(driver, passenger)))
                .fold(None, |best: Option<(usize, &Driver, f64)>, candidate| match best {
                    Some((_, _, shortest)) if candidate.2.total_cmp(&shortest).is_ge() => best,
                    _ => Some(candidate),
                });
            match nearest {
                Some((index, driver, distance)) => {
                    if let Some(claimed) = taken.get_mut(index) {
                        *claimed = true;
                    }
                    assignments.push(Assignment {
                        passenger: passenger.id,
                        driver: driver.id,
                        distance,
                    });
                }
                None => {
                    log::debug!("no free driver left for passenger {}", passenger.id);
                    unmatched.push(passenger.id);
                }
            }
        }
        MatchOutcome::new(assignments, unmatched)
    }
}
