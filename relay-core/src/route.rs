//! Routes through waypoints.
//!
//! Aggregates ordered waypoints with the total planar distance travelled.

use crate::{Colour, Waypoint, geometry};

/// An ordered path from start to goal.
///
/// An empty route means the search could not reach the goal.
///
/// # Examples
/// ```
/// use relay_core::{Coordinate, Route, Waypoint};
///
/// let a = Waypoint::new("A", Coordinate::new(0.0, 0.0)?);
/// let b = Waypoint::new("B", Coordinate::new(0.0, 1.0)?);
/// let route = Route::new(vec![a, b], 1.0);
///
/// assert_eq!(route.waypoints().len(), 2);
/// assert_eq!(route.segments().count(), 1);
/// # Ok::<(), relay_core::CoordinateError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    waypoints: Vec<Waypoint>,
    total_distance: f64,
}

impl Route {
    /// Construct a route from ordered waypoints and their total distance.
    #[must_use]
    pub const fn new(waypoints: Vec<Waypoint>, total_distance: f64) -> Self {
        Self {
            waypoints,
            total_distance,
        }
    }

    /// Construct the "no path found" route.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Waypoints in travel order.
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Consume the route, returning its waypoints.
    #[must_use]
    pub fn into_waypoints(self) -> Vec<Waypoint> {
        self.waypoints
    }

    /// Total planar distance from start to goal.
    #[must_use]
    pub const fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// `true` when no path was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Names of the waypoints in travel order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.waypoints.iter().map(|waypoint| waypoint.name.as_str())
    }

    /// Rider labels in travel order.
    pub fn riders(&self) -> impl Iterator<Item = Option<&str>> {
        self.waypoints.iter().map(|waypoint| waypoint.rider.as_deref())
    }

    /// Legs between consecutive waypoints.
    ///
    /// Each leg is carried by the rider, and drawn in the colour, of the
    /// waypoint it leaves from.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.waypoints.windows(2).filter_map(|pair| match pair {
            [from, to] => Some(Segment {
                from,
                to,
                rider: from.rider.as_deref(),
                colour: from.colour,
                distance: geometry::distance(from.location, to.location),
            }),
            _ => None,
        })
    }

    /// Indices of waypoints whose rider differs from the previous waypoint's.
    ///
    /// # Examples
    /// ```
    /// use relay_core::{Coordinate, Route, Waypoint};
    ///
    /// let origin = Coordinate::new(0.0, 0.0)?;
    /// let route = Route::new(
    ///     vec![
    ///         Waypoint::new("A", origin).with_rider("Rider 0"),
    ///         Waypoint::new("B", origin).with_rider("Rider 0"),
    ///         Waypoint::new("C", origin).with_rider("Rider 1"),
    ///     ],
    ///     0.0,
    /// );
    /// assert_eq!(route.rider_handoffs(), vec![2]);
    /// # Ok::<(), relay_core::CoordinateError>(())
    /// ```
    #[must_use]
    pub fn rider_handoffs(&self) -> Vec<usize> {
        self.waypoints
            .windows(2)
            .enumerate()
            .filter_map(|(index, pair)| match pair {
                [previous, next] if previous.rider != next.rider => Some(index.saturating_add(1)),
                _ => None,
            })
            .collect()
    }
}

/// A single leg of a [`Route`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    /// Waypoint the leg leaves from.
    pub from: &'a Waypoint,
    /// Waypoint the leg arrives at.
    pub to: &'a Waypoint,
    /// Rider carrying the leg.
    pub rider: Option<&'a str>,
    /// Display colour of the leg.
    pub colour: Option<Colour>,
    /// Planar length of the leg.
    pub distance: f64,
}
