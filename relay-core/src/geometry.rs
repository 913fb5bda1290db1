//! Planar distance functions over waypoint coordinates.
//!
//! Latitude and longitude are treated as plain Cartesian axes. No geodesic
//! correction is applied, so distances are expressed in degrees.

use geo::{Distance, Euclidean, Point};
use thiserror::Error;

/// Errors returned by [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// Latitude or longitude was NaN or infinite.
    #[error("coordinate components must be finite")]
    NonFinite,
    /// Latitude fell outside `[-90, 90]` or longitude outside `[-180, 180]`.
    #[error("latitude must lie in [-90, 90] and longitude in [-180, 180]")]
    OutOfRange,
}

/// Largest accepted latitude magnitude in degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// Largest accepted longitude magnitude in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// An immutable `(latitude, longitude)` pair.
///
/// # Examples
/// ```
/// use relay_core::Coordinate;
///
/// let jaipur = Coordinate::new(26.9124, 75.7873)?;
/// assert_eq!(jaipur.lat(), 26.9124);
/// assert_eq!(jaipur.lng(), 75.7873);
/// # Ok::<(), relay_core::CoordinateError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCoordinate", into = "RawCoordinate"))]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Validate and construct a coordinate.
    ///
    /// Both components must be finite, with latitude in `[-90, 90]` and
    /// longitude in `[-180, 180]`. The bounds keep every planar distance
    /// between two coordinates finite.
    ///
    /// # Errors
    /// Returns [`CoordinateError::NonFinite`] for NaN or infinite components
    /// and [`CoordinateError::OutOfRange`] for components beyond the bounds.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !(lat.is_finite() && lng.is_finite()) {
            return Err(CoordinateError::NonFinite);
        }
        if lat.abs() > MAX_LATITUDE || lng.abs() > MAX_LONGITUDE {
            return Err(CoordinateError::OutOfRange);
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }

    /// Convert to a `geo` point with `x = longitude` and `y = latitude`.
    #[must_use]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.to_point()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lng)
    }
}

#[cfg(feature = "serde")]
impl From<Coordinate> for RawCoordinate {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            lat: coordinate.lat,
            lng: coordinate.lng,
        }
    }
}

/// Straight-line distance between two coordinates.
///
/// This is the edge weight of the search graph.
///
/// # Examples
/// ```
/// use relay_core::{Coordinate, geometry::distance};
///
/// let a = Coordinate::new(0.0, 0.0)?;
/// let b = Coordinate::new(3.0, 4.0)?;
/// assert_eq!(distance(a, b), 5.0);
/// # Ok::<(), relay_core::CoordinateError>(())
/// ```
#[must_use]
pub fn distance(from: Coordinate, to: Coordinate) -> f64 {
    Euclidean.distance(from.to_point(), to.to_point())
}

/// Admissible estimate of the remaining distance to `goal`.
///
/// Identical to [`distance`]; edges are straight lines, so the estimate never
/// exceeds the true remaining cost.
#[must_use]
pub fn heuristic(node: Coordinate, goal: Coordinate) -> f64 {
    distance(node, goal)
}
