//! Facade crate for the relay routing engine.
//!
//! This crate re-exports the path search, handoff and candidate generation
//! types and exposes driver dispatch and fare quotes behind the `dispatch`
//! feature. Error types travel with the operations that return them, so
//! callers can match failures without depending on the member crates.
//!
//! # Examples
//! ```
//! use relay_engine::{
//!     Coordinate, CoordinateError, Endpoint, GeneratorError, HandoffError, HandoffTracker,
//!     RiderPool, SearchError,
//! };
//!
//! assert_eq!(Coordinate::new(91.0, 0.0), Err(CoordinateError::OutOfRange));
//! assert!(matches!(
//!     HandoffTracker::new(RiderPool::default(), 0.0),
//!     Err(HandoffError::InvalidThreshold(_))
//! ));
//!
//! let missing = SearchError::MissingEndpoint {
//!     endpoint: Endpoint::Goal,
//!     name: "Nowhere".to_owned(),
//! };
//! assert!(missing.to_string().contains("Nowhere"));
//! assert_eq!(
//!     GeneratorError::ZeroCount.to_string(),
//!     "at least one synthetic waypoint must be requested"
//! );
//! ```
//!
//! ```
//! # #[cfg(feature = "dispatch")]
//! # {
//! use relay_engine::{LegQuote, QuoteConfig, QuoteError};
//!
//! let config = QuoteConfig {
//!     average_speed_kmh: 0.0,
//!     ..QuoteConfig::default()
//! };
//! assert!(matches!(config.validate(), Err(QuoteError::InvalidSpeed(_))));
//! let _: Option<LegQuote> = None;
//! # }
//! ```

#![forbid(unsafe_code)]

pub use relay_core::{
    Colour, ColourError, Coordinate, CoordinateError, DEFAULT_HANDOFF_THRESHOLD, Endpoint,
    GeneratorConfig, GeneratorError, HandoffError, HandoffPolicy, HandoffTracker, PathFinder,
    RiderPool, RiderPoolError, Route, RouteConsumer, SearchConfig, SearchError, Segment, Topology,
    Waypoint, deliver_route, find_path, generate_candidates,
};

#[cfg(feature = "dispatch")]
pub use relay_dispatch::{
    Assignment, DispatchError, DispatchRequest, Driver, GreedyMatching, HungarianMatching,
    LegQuote, MatchOutcome, MatchingAlgorithm, Passenger, QuoteConfig, QuoteError, RideQuote,
    dispatch, quote_route,
};
