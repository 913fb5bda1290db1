//! Pairing waiting passengers with available drivers.
//!
//! Strategies implement [`MatchingAlgorithm`] and are interchangeable:
//!
//! - [`GreedyMatching`]: each passenger, in request order, takes the nearest
//!   driver nobody has claimed yet.
//! - [`HungarianMatching`]: Kuhn-Munkres assignment minimising the total
//!   pickup distance across the whole request.
//!
//! Pickup distance is the planar distance used by the path search.

mod greedy;
mod hungarian;

use std::collections::HashSet;

use relay_core::Coordinate;
use thiserror::Error;

pub use greedy::GreedyMatching;
pub use hungarian::HungarianMatching;

/// A driver waiting for work.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Driver {
    /// Unique identifier.
    pub id: u64,
    /// Current position.
    pub location: Coordinate,
}

impl Driver {
    /// Construct a driver at `location`.
    #[must_use]
    pub const fn new(id: u64, location: Coordinate) -> Self {
        Self { id, location }
    }
}

/// A passenger waiting to be collected.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Passenger {
    /// Unique identifier.
    pub id: u64,
    /// Where the passenger is waiting.
    pub pickup: Coordinate,
}

impl Passenger {
    /// Construct a passenger waiting at `pickup`.
    #[must_use]
    pub const fn new(id: u64, pickup: Coordinate) -> Self {
        Self { id, pickup }
    }
}

/// Drivers and passengers to be paired in one round.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchRequest {
    /// Available drivers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub drivers: Vec<Driver>,
    /// Waiting passengers, in priority order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub passengers: Vec<Passenger>,
}

/// One driver sent to one passenger.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// Identifier of the passenger being collected.
    pub passenger: u64,
    /// Identifier of the driver sent.
    pub driver: u64,
    /// Pickup distance between them.
    pub distance: f64,
}

/// Result of a matching round.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchOutcome {
    /// Pairings in passenger request order.
    pub assignments: Vec<Assignment>,
    /// Passengers left without a driver, in request order.
    pub unmatched_passengers: Vec<u64>,
    /// Sum of assignment pickup distances.
    pub total_distance: f64,
}

impl MatchOutcome {
    /// Build an outcome, deriving the total from `assignments`.
    #[must_use]
    pub fn new(assignments: Vec<Assignment>, unmatched_passengers: Vec<u64>) -> Self {
        let total_distance = assignments.iter().map(|assignment| assignment.distance).sum();
        Self {
            assignments,
            unmatched_passengers,
            total_distance,
        }
    }

    /// Driver assigned to `passenger`, if any.
    #[must_use]
    pub fn driver_for(&self, passenger: u64) -> Option<u64> {
        self.assignments
            .iter()
            .find(|assignment| assignment.passenger == passenger)
            .map(|assignment| assignment.driver)
    }
}

/// Errors returned by [`dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Two drivers share an identifier.
    #[error("driver id {0} is used more than once")]
    DuplicateDriver(u64),
    /// Two passengers share an identifier.
    #[error("passenger id {0} is used more than once")]
    DuplicatePassenger(u64),
}

/// A strategy for pairing passengers with drivers.
///
/// Implementations may assume identifiers are unique; [`dispatch`] checks
/// this before calling [`MatchingAlgorithm::assign`].
pub trait MatchingAlgorithm {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Pair `passengers` with `drivers`, each driver serving at most one
    /// passenger.
    fn assign(&self, drivers: &[Driver], passengers: &[Passenger]) -> MatchOutcome;
}

/// Validate `request` and run `algorithm` over it.
///
/// # Errors
///
/// Returns [`DispatchError`] when a driver or passenger id is repeated.
pub fn dispatch<A>(algorithm: &A, request: &DispatchRequest) -> Result<MatchOutcome, DispatchError>
where
    A: MatchingAlgorithm + ?Sized,
{
    ensure_unique(request.drivers.iter().map(|driver| driver.id))
        .map_err(DispatchError::DuplicateDriver)?;
    ensure_unique(request.passengers.iter().map(|passenger| passenger.id))
        .map_err(DispatchError::DuplicatePassenger)?;
    let outcome = algorithm.assign(&request.drivers, &request.passengers);
    log::debug!(
        "{} matching paired {} of {} passengers with {} drivers",
        algorithm.name(),
        outcome.assignments.len(),
        request.passengers.len(),
        request.drivers.len()
    );
    Ok(outcome)
}

fn ensure_unique(ids: impl Iterator<Item = u64>) -> Result<(), u64> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(id);
        }
    }
    Ok(())
}

fn pickup_distance(driver: &Driver, passenger: &Passenger) -> f64 {
    relay_core::geometry::distance(driver.location, passenger.pickup)
}
