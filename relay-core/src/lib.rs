//! Core types and algorithms for the relay engine.
//!
//! A ride is planned in three steps: [`generate_candidates`] scatters named
//! waypoints around a start point, [`PathFinder::find_path`] runs an A*
//! search from start to goal through them, and a [`HandoffTracker`] labels
//! the expanded waypoints with the rider responsible for each stretch. The
//! finished [`Route`] is handed to a [`RouteConsumer`] for display or export.
//!
//! Distances are planar and measured in degrees of latitude and longitude.

#![forbid(unsafe_code)]

pub mod consumer;
pub mod generator;
pub mod geometry;
pub mod handoff;
pub mod route;
pub mod search;
pub mod waypoint;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use consumer::{RouteConsumer, deliver_route};
pub use generator::{GeneratorConfig, GeneratorError, generate_candidates};
pub use geometry::{Coordinate, CoordinateError};
pub use handoff::{HandoffError, HandoffPolicy, HandoffTracker};
pub use route::{Route, Segment};
pub use search::{
    DEFAULT_HANDOFF_THRESHOLD, Endpoint, PathFinder, SearchConfig, SearchError, Topology,
    find_path,
};
pub use waypoint::{Colour, ColourError, RiderPool, RiderPoolError, Waypoint};
