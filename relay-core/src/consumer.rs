//! Hand-off point between the search and whatever renders its result.
//!
//! Map widgets, report writers and test doubles implement
//! [`RouteConsumer`]. The core never holds a rendering handle itself.

use crate::Route;

/// Receives the outcome of a path search.
///
/// # Examples
///
/// ```rust
/// use relay_core::{Route, RouteConsumer, deliver_route};
///
/// #[derive(Default)]
/// struct CountingConsumer {
///     found: usize,
///     missed: usize,
/// }
///
/// impl RouteConsumer for CountingConsumer {
///     fn on_route_found(&mut self, _route: &Route) {
///         self.found += 1;
///     }
///
///     fn on_no_route_found(&mut self) {
///         self.missed += 1;
///     }
/// }
///
/// let mut consumer = CountingConsumer::default();
/// deliver_route(&Route::empty(), &mut consumer);
/// assert_eq!(consumer.missed, 1);
/// ```
pub trait RouteConsumer {
    /// Called with the ordered route when the goal was reached.
    fn on_route_found(&mut self, route: &Route);

    /// Called when the search finished without reaching the goal.
    fn on_no_route_found(&mut self);
}

/// Pass `route` to the matching callback on `consumer`.
pub fn deliver_route<C>(route: &Route, consumer: &mut C)
where
    C: RouteConsumer + ?Sized,
{
    if route.is_empty() {
        log::debug!("no route found; notifying consumer");
        consumer.on_no_route_found();
    } else {
        consumer.on_route_found(route);
    }
}
