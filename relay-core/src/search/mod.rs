//! A* search over a candidate waypoint set.
//!
//! The search treats the candidate set as a graph whose edge weights are
//! planar distances between coordinates and uses the straight-line distance to
//! the goal as its heuristic. Rider labels are assigned by a
//! [`HandoffTracker`] according to the configured [`HandoffPolicy`].
//!
//! The open set is scanned linearly, which keeps tie-breaking stable (the
//! earliest inserted node wins) at the cost of `O(n)` per pop. Candidate sets
//! are small, so this is not a bottleneck in practice.

mod neighbourhood;
mod state;

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

pub use neighbourhood::{CompleteGraph, NearestNeighbours, Neighbourhood, Topology};

use self::state::{OpenSet, ScoreTable};
use crate::geometry::{distance, heuristic};
use crate::{Coordinate, HandoffError, HandoffPolicy, HandoffTracker, RiderPool, Route, Waypoint};

/// Default accumulated distance, in degrees, before the rider changes.
pub const DEFAULT_HANDOFF_THRESHOLD: f64 = 0.02;

/// Which end of the route a [`SearchError::MissingEndpoint`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The route's first waypoint.
    Start,
    /// The route's last waypoint.
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Errors returned by [`PathFinder`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The candidate set contained no waypoints.
    #[error("candidate set is empty")]
    EmptyCandidates,
    /// The candidate set contained a single waypoint.
    #[error("candidate set only holds {name:?}; a route needs at least two waypoints")]
    DegenerateCandidates {
        /// Name of the lone waypoint.
        name: String,
    },
    /// The start or goal is not part of the candidate set.
    #[error("{endpoint} waypoint {name:?} is not in the candidate set")]
    MissingEndpoint {
        /// Which endpoint was missing.
        endpoint: Endpoint,
        /// Name that was looked up.
        name: String,
    },
    /// Two candidates share a name.
    #[error("waypoint name {0:?} is used more than once")]
    DuplicateName(String),
    /// The handoff threshold was zero, negative, NaN or infinite.
    #[error("handoff threshold must be a positive, finite distance (got {0})")]
    InvalidThreshold(f64),
    /// The nearest-neighbour topology was asked for zero neighbours.
    #[error("nearest-neighbour topology needs at least one neighbour per node")]
    InvalidNeighbourCount,
}

impl From<HandoffError> for SearchError {
    fn from(err: HandoffError) -> Self {
        match err {
            HandoffError::InvalidThreshold(threshold) => Self::InvalidThreshold(threshold),
        }
    }
}

/// Settings for a [`PathFinder`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Accumulated distance after which the next rider takes over.
    pub handoff_threshold: f64,
    /// Where rider labels are written.
    pub policy: HandoffPolicy,
    /// Riders handed the route in order.
    pub riders: RiderPool,
    /// Shape of the search graph.
    pub topology: Topology,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            handoff_threshold: DEFAULT_HANDOFF_THRESHOLD,
            policy: HandoffPolicy::default(),
            riders: RiderPool::default(),
            topology: Topology::default(),
        }
    }
}

impl SearchConfig {
    /// Default configuration with the given handoff threshold.
    #[must_use]
    pub fn with_threshold(handoff_threshold: f64) -> Self {
        Self {
            handoff_threshold,
            ..Self::default()
        }
    }
}

/// Validated, reusable A* searcher.
///
/// # Examples
/// ```
/// use relay_core::{Coordinate, PathFinder, SearchConfig, Waypoint};
///
/// let start = Waypoint::new("Start", Coordinate::new(0.0, 0.0)?);
/// let goal = Waypoint::new("Goal", Coordinate::new(3.0, 4.0)?);
/// let mut candidates = vec![start.clone(), goal.clone()];
///
/// let finder = PathFinder::new(SearchConfig::with_threshold(10.0))?;
/// let route = finder.find_path(&start, &goal, &mut candidates)?;
/// assert_eq!(route.names().collect::<Vec<_>>(), ["Start", "Goal"]);
/// assert_eq!(route.total_distance(), 5.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct PathFinder {
    config: SearchConfig,
}

impl PathFinder {
    /// Validate `config` and build a searcher.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        HandoffTracker::new(config.riders.clone(), config.handoff_threshold)?;
        if config.topology == (Topology::Nearest { k: 0 }) {
            return Err(SearchError::InvalidNeighbourCount);
        }
        Ok(Self { config })
    }

    /// Configuration this searcher was built with.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find a route from `start` to `goal` through `candidates`.
    ///
    /// Endpoints are matched to candidates by name and the candidates'
    /// coordinates are used. Rider labels are written into `candidates` as
    /// the search runs; under [`HandoffPolicy::Expansion`] nodes that were
    /// expanded but left off the route keep their new label.
    ///
    /// Returns [`Route::empty`] when the goal is unreachable, which can only
    /// happen under [`Topology::Nearest`].
    ///
    /// # Errors
    ///
    /// Returns an error when `candidates` is empty or has a single element,
    /// when a name is repeated, or when either endpoint is absent.
    pub fn find_path(
        &self,
        start: &Waypoint,
        goal: &Waypoint,
        candidates: &mut [Waypoint],
    ) -> Result<Route, SearchError> {
        let (start_index, goal_index) = validate_candidates(start, goal, candidates)?;
        let locations: Vec<Coordinate> = candidates.iter().map(|w| w.location).collect();
        let neighbourhood = self
            .config
            .topology
            .build(&locations)
            .ok_or(SearchError::InvalidNeighbourCount)?;
        let mut tracker =
            HandoffTracker::new(self.config.riders.clone(), self.config.handoff_threshold)?;

        log::debug!(
            "searching {} candidates from {:?} to {:?} over the {} graph",
            candidates.len(),
            start.name,
            goal.name,
            self.config.topology
        );

        let search = Search {
            locations: &locations,
            goal: goal_index,
            neighbourhood: neighbourhood.as_ref(),
        };
        let outcome = match self.config.policy {
            HandoffPolicy::Expansion => search.run(start_index, |node, leg| {
                label(candidates, node, tracker.record_leg(leg));
            }),
            HandoffPolicy::Route => search.run(start_index, |_, _| {}),
        };
        let Some((path, total_distance)) = outcome else {
            log::debug!("goal {:?} is unreachable", goal.name);
            return Ok(Route::empty());
        };

        if self.config.policy == HandoffPolicy::Route {
            label_route(&path, &locations, candidates, &mut tracker);
        }
        let waypoints = path
            .iter()
            .filter_map(|&node| candidates.get(node).cloned())
            .collect();
        log::debug!(
            "found a {}-stop route of length {total_distance} with {} handoffs",
            path.len(),
            tracker.handoffs()
        );
        Ok(Route::new(waypoints, total_distance))
    }
}

/// Search with [`SearchConfig::with_threshold`].
///
/// # Errors
///
/// See [`PathFinder::new`] and [`PathFinder::find_path`].
///
/// # Examples
/// ```
/// use relay_core::{Coordinate, Waypoint, find_path};
///
/// let start = Waypoint::new("Start", Coordinate::new(26.9124, 75.7873)?);
/// let goal = Waypoint::new("Destination", Coordinate::new(26.95, 75.825)?);
/// let mut candidates = vec![start.clone(), goal.clone()];
///
/// let route = find_path(&start, &goal, &mut candidates, 0.05)?;
/// assert_eq!(route.waypoints().len(), 2);
/// assert_eq!(candidates[0].rider.as_deref(), Some("Rider 0"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn find_path(
    start: &Waypoint,
    goal: &Waypoint,
    candidates: &mut [Waypoint],
    handoff_threshold: f64,
) -> Result<Route, SearchError> {
    PathFinder::new(SearchConfig::with_threshold(handoff_threshold))?.find_path(
        start,
        goal,
        candidates,
    )
}

fn validate_candidates(
    start: &Waypoint,
    goal: &Waypoint,
    candidates: &[Waypoint],
) -> Result<(usize, usize), SearchError> {
    match candidates {
        [] => return Err(SearchError::EmptyCandidates),
        [only] => {
            return Err(SearchError::DegenerateCandidates {
                name: only.name.clone(),
            });
        }
        _ => {}
    }
    let mut seen = HashSet::with_capacity(candidates.len());
    for waypoint in candidates {
        if !seen.insert(waypoint.name.as_str()) {
            return Err(SearchError::DuplicateName(waypoint.name.clone()));
        }
    }
    let position = |endpoint: Endpoint, wanted: &Waypoint| {
        candidates
            .iter()
            .position(|waypoint| waypoint.name == wanted.name)
            .ok_or_else(|| SearchError::MissingEndpoint {
                endpoint,
                name: wanted.name.clone(),
            })
    };
    Ok((position(Endpoint::Start, start)?, position(Endpoint::Goal, goal)?))
}

fn label(candidates: &mut [Waypoint], node: usize, rider: &str) {
    if let Some(waypoint) = candidates.get_mut(node) {
        waypoint.rider = Some(rider.to_owned());
    }
}

fn label_route(
    path: &[usize],
    locations: &[Coordinate],
    candidates: &mut [Waypoint],
    tracker: &mut HandoffTracker,
) {
    let mut previous: Option<usize> = None;
    for &node in path {
        let leg = leg_length(locations, previous, node);
        label(candidates, node, tracker.record_leg(leg));
        previous = Some(node);
    }
}

fn leg_length(locations: &[Coordinate], from: Option<usize>, to: usize) -> f64 {
    match (from.and_then(|node| locations.get(node)), locations.get(to)) {
        (Some(&a), Some(&b)) => distance(a, b),
        _ => 0.0,
    }
}

struct Search<'a> {
    locations: &'a [Coordinate],
    goal: usize,
    neighbourhood: &'a dyn Neighbourhood,
}

impl Search<'_> {
    fn estimate(&self, node: usize) -> f64 {
        match (self.locations.get(node), self.locations.get(self.goal)) {
            (Some(&at), Some(&goal)) => heuristic(at, goal),
            _ => f64::INFINITY,
        }
    }

    /// Run A* from `start`, calling `on_expand` with each popped node and the
    /// length of the edge it was reached by.
    ///
    /// Returns the node path and its length, or `None` when the open set runs
    /// dry before the goal is popped.
    #[expect(
        clippy::float_arithmetic,
        reason = "path costs are sums of planar edge lengths"
    )]
    fn run<F>(&self, start: usize, mut on_expand: F) -> Option<(Vec<usize>, f64)>
    where
        F: FnMut(usize, f64),
    {
        let len = self.locations.len();
        let mut scores = ScoreTable::new(len, start, self.estimate(start));
        let mut open = OpenSet::with_capacity(len);
        open.insert(start);
        let mut neighbours = Vec::with_capacity(len);
        let mut expansions = 0_usize;

        while let Some(current) = open.pop_lowest(&scores) {
            expansions = expansions.saturating_add(1);
            let leg = leg_length(self.locations, scores.predecessor(current), current);
            log::trace!(
                "expanding node {current} (g = {}, f = {}, leg = {leg})",
                scores.g(current),
                scores.f(current)
            );
            on_expand(current, leg);

            if current == self.goal {
                log::debug!("goal reached after {expansions} expansions");
                return Some((scores.reconstruct(current), scores.g(current)));
            }

            self.neighbourhood.neighbours(current, &mut neighbours);
            for &next in &neighbours {
                let tentative = scores.g(current) + leg_length(self.locations, Some(current), next);
                let estimate = tentative + self.estimate(next);
                if scores.relax(next, current, tentative, estimate) && !open.contains(next) {
                    open.insert(next);
                }
            }
        }
        log::debug!("open set exhausted after {expansions} expansions");
        None
    }
}

#[cfg(test)]
mod tests;
