//! Fixtures shared by unit, behaviour and property tests.

use crate::{Coordinate, Route, RouteConsumer, Waypoint};

/// Build an unlabelled waypoint at `(lat, lng)`.
///
/// # Panics
///
/// Panics when either coordinate is not finite.
#[expect(clippy::expect_used, reason = "fixtures are built from literal coordinates")]
#[must_use]
pub fn waypoint(name: &str, lat: f64, lng: f64) -> Waypoint {
    Waypoint::new(
        name,
        Coordinate::new(lat, lng).expect("fixture coordinates are finite"),
    )
}

/// `RouteConsumer` that keeps every delivered route.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingConsumer {
    /// Routes passed to [`RouteConsumer::on_route_found`], in order.
    pub routes: Vec<Route>,
    /// Number of [`RouteConsumer::on_no_route_found`] calls.
    pub misses: usize,
}

impl RouteConsumer for RecordingConsumer {
    fn on_route_found(&mut self, route: &Route) {
        self.routes.push(route.clone());
    }

    fn on_no_route_found(&mut self) {
        self.misses = self.misses.saturating_add(1);
    }
}
