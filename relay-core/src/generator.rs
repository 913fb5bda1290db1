//! Random candidate waypoints scattered around a start point.
//!
//! The generator returns the literal start and goal followed by synthetic
//! waypoints. Synthetic points are scattered around the start, not along the
//! start-goal line, so some of them may lie well away from any sensible
//! route. The random source is injected; seed it for reproducible output.

use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use crate::{Colour, Coordinate, RiderPool, Waypoint};

/// Default scatter radius in degrees on each axis.
pub const DEFAULT_SCATTER: f64 = 0.05;

/// Default number of synthetic waypoints.
pub const DEFAULT_COUNT: usize = 10;

/// Configuration for [`generate_candidates`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of synthetic waypoints to add.
    pub count: usize,
    /// Maximum absolute offset, in degrees, applied to each axis.
    pub scatter: f64,
    /// Riders assigned to synthetic waypoints by ordinal.
    pub riders: RiderPool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            scatter: DEFAULT_SCATTER,
            riders: RiderPool::default(),
        }
    }
}

/// Errors returned by [`generate_candidates`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeneratorError {
    /// No synthetic waypoints were requested.
    #[error("at least one synthetic waypoint must be requested")]
    ZeroCount,
    /// The scatter radius was negative, NaN or infinite.
    #[error("scatter must be a finite, non-negative number of degrees (got {0})")]
    InvalidScatter(f64),
    /// Two waypoints in the generated set would share a name.
    #[error("waypoint name {0:?} is used more than once")]
    DuplicateName(String),
}

/// Name given to the synthetic waypoint with 1-based `ordinal`.
#[must_use]
pub fn synthetic_name(ordinal: usize) -> String {
    format!("Waypoint {ordinal}")
}

/// Build a candidate set of `config.count + 2` waypoints.
///
/// The set starts with `start` and `goal` unchanged, followed by synthetic
/// waypoints named `"Waypoint 1"`, `"Waypoint 2"` and so on. Each synthetic
/// point is offset from the start by independent uniform draws in
/// `[-scatter, scatter]`, is assigned a rider from the pool by ordinal, and
/// gets a uniformly random 24-bit colour.
///
/// The random source is borrowed mutably, so concurrent callers need one
/// source each.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use relay_core::{Coordinate, GeneratorConfig, Waypoint, generate_candidates};
///
/// let start = Waypoint::new("Start", Coordinate::new(26.9124, 75.7873)?);
/// let goal = Waypoint::new("Destination", Coordinate::new(26.95, 75.825)?);
/// let config = GeneratorConfig { count: 3, ..GeneratorConfig::default() };
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
///
/// let candidates = generate_candidates(&start, &goal, &config, &mut rng)?;
/// assert_eq!(candidates.len(), 5);
/// assert_eq!(candidates[2].name, "Waypoint 1");
/// assert_eq!(candidates[2].rider.as_deref(), Some("Rider 0"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate_candidates<R>(
    start: &Waypoint,
    goal: &Waypoint,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<Waypoint>, GeneratorError>
where
    R: Rng,
{
    if config.count == 0 {
        return Err(GeneratorError::ZeroCount);
    }
    if !config.scatter.is_finite() || config.scatter < 0.0 {
        return Err(GeneratorError::InvalidScatter(config.scatter));
    }

    let mut candidates = Vec::with_capacity(config.count.saturating_add(2));
    candidates.push(start.clone());
    candidates.push(goal.clone());
    for ordinal in 1..=config.count {
        candidates.push(synthetic_waypoint(start.location, ordinal, config, rng));
    }
    ensure_unique_names(&candidates)?;
    log::debug!(
        "generated {} synthetic waypoints around {:?}",
        config.count,
        start.location
    );
    Ok(candidates)
}

#[expect(
    clippy::float_arithmetic,
    reason = "synthetic points are float offsets from the start coordinate"
)]
fn synthetic_waypoint<R>(
    origin: Coordinate,
    ordinal: usize,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Waypoint
where
    R: Rng,
{
    let bound = config.scatter;
    let lat = origin.lat() + rng.gen_range(-bound..=bound);
    let lng = origin.lng() + rng.gen_range(-bound..=bound);
    // Offsets that leave the valid range near a pole or the antimeridian
    // collapse onto the origin.
    let location = Coordinate::new(lat, lng).unwrap_or(origin);
    let colour = Colour::from_rgb24(rng.gen_range(0..=Colour::MAX));
    Waypoint::new(synthetic_name(ordinal), location)
        .with_rider(config.riders.rider(ordinal.saturating_sub(1)))
        .with_colour(colour)
}

fn ensure_unique_names(candidates: &[Waypoint]) -> Result<(), GeneratorError> {
    let mut seen = HashSet::with_capacity(candidates.len());
    for waypoint in candidates {
        if !seen.insert(waypoint.name.as_str()) {
            return Err(GeneratorError::DuplicateName(waypoint.name.clone()));
        }
    }
    Ok(())
}
