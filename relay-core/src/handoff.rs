//! Rider rotation driven by accumulated travel distance.
//!
//! A [`HandoffTracker`] adds up leg distances and passes the route to the
//! next rider in the pool once the running total reaches the configured
//! threshold. The accumulator restarts from zero after every handoff.

use thiserror::Error;

use crate::RiderPool;

/// Errors returned by [`HandoffTracker::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HandoffError {
    /// The threshold was zero, negative, NaN or infinite.
    #[error("handoff threshold must be a positive, finite distance (got {0})")]
    InvalidThreshold(f64),
}

/// Where rider labels are written while a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HandoffPolicy {
    /// Label every node as it is expanded, in expansion order.
    ///
    /// Nodes that are expanded but later left off the route keep the label
    /// they received, so the candidate set reflects the search's traversal.
    #[default]
    Expansion,
    /// Label only the nodes of the returned route, walking it from start to
    /// goal once the search has finished.
    Route,
}

/// Running distance accumulator and current rider.
///
/// # Examples
/// ```
/// use relay_core::{HandoffTracker, RiderPool};
///
/// let mut tracker = HandoffTracker::new(RiderPool::numbered(2), 10.0)?;
/// assert_eq!(tracker.record_leg(4.0), "Rider 0");
/// assert_eq!(tracker.record_leg(6.0), "Rider 1");
/// assert_eq!(tracker.accumulated(), 0.0);
/// # Ok::<(), relay_core::HandoffError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HandoffTracker {
    pool: RiderPool,
    threshold: f64,
    accumulated: f64,
    current: usize,
    handoffs: usize,
}

impl HandoffTracker {
    /// Start tracking with the first rider in `pool` and an empty accumulator.
    pub fn new(pool: RiderPool, threshold: f64) -> Result<Self, HandoffError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(HandoffError::InvalidThreshold(threshold));
        }
        Ok(Self {
            pool,
            threshold,
            accumulated: 0.0,
            current: 0,
            handoffs: 0,
        })
    }

    /// Add a leg and return the rider responsible once the leg is counted.
    ///
    /// When the running total reaches or exceeds the threshold the next rider
    /// takes over and the total is reset to zero.
    #[expect(
        clippy::float_arithmetic,
        reason = "the accumulator sums floating-point leg distances"
    )]
    pub fn record_leg(&mut self, distance: f64) -> &str {
        self.accumulated += distance;
        if self.accumulated >= self.threshold {
            self.current = self.current.wrapping_add(1);
            self.handoffs = self.handoffs.saturating_add(1);
            self.accumulated = 0.0;
            log::debug!(
                "distance threshold {} reached; handing off to {}",
                self.threshold,
                self.pool.rider(self.current)
            );
        }
        self.current_rider()
    }

    /// Rider currently carrying the route.
    #[must_use]
    pub fn current_rider(&self) -> &str {
        self.pool.rider(self.current)
    }

    /// Distance travelled since the last handoff.
    #[must_use]
    pub const fn accumulated(&self) -> f64 {
        self.accumulated
    }

    /// Number of handoffs performed so far.
    #[must_use]
    pub const fn handoffs(&self) -> usize {
        self.handoffs
    }

    /// Configured handoff distance.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }
}
