//! Ride pricing and driver dispatch for the relay engine.
//!
//! The crate builds on the routes produced by [`relay_core`]:
//! - **Quotes** turn a [`Route`](relay_core::Route) into per-leg great-circle
//!   distances, travel times and fares.
//! - **Matching** pairs waiting passengers with available drivers, either
//!   greedily by nearest driver or optimally by total pickup distance.
//!
//! # Examples
//!
//! ```
//! use relay_core::Coordinate;
//! use relay_dispatch::{DispatchRequest, Driver, HungarianMatching, Passenger, dispatch};
//!
//! let request = DispatchRequest {
//!     drivers: vec![Driver::new(1, Coordinate::new(0.0, 0.0)?)],
//!     passengers: vec![Passenger::new(7, Coordinate::new(0.0, 1.0)?)],
//! };
//! let outcome = dispatch(&HungarianMatching, &request)?;
//! assert_eq!(outcome.assignments.len(), 1);
//! assert_eq!(outcome.assignments[0].driver, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod matching;
pub mod quote;

pub use matching::{
    Assignment, DispatchError, DispatchRequest, Driver, GreedyMatching, HungarianMatching,
    MatchOutcome, MatchingAlgorithm, Passenger, dispatch,
};
pub use quote::{LegQuote, QuoteConfig, QuoteError, RideQuote, quote_route};
