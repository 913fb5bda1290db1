//! Named, located stops that make up the search graph.

use std::fmt;

use thiserror::Error;

use crate::Coordinate;

/// A 24-bit RGB display colour.
///
/// # Examples
/// ```
/// use relay_core::Colour;
///
/// let colour = Colour::from_rgb24(0x00ff_8800);
/// assert_eq!(colour.to_string(), "#ff8800");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Colour(u32);

/// Errors returned when parsing a [`Colour`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColourError {
    /// The value was not of the form `#rrggbb`.
    #[error("colour {0:?} is not of the form #rrggbb")]
    Malformed(String),
}

impl Colour {
    /// Largest representable colour value.
    pub const MAX: u32 = 0x00ff_ffff;

    /// Construct a colour, discarding bits above the 24-bit range.
    #[must_use]
    pub const fn from_rgb24(value: u32) -> Self {
        Self(value & Self::MAX)
    }

    /// Raw `0xRRGGBB` value.
    #[must_use]
    pub const fn rgb24(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl TryFrom<String> for Colour {
    type Error = ColourError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl std::str::FromStr for Colour {
    type Err = ColourError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let digits = text
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6)
            .ok_or_else(|| ColourError::Malformed(text.to_owned()))?;
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| ColourError::Malformed(text.to_owned()))
    }
}

/// A candidate stop in the route graph.
///
/// The name is the waypoint's identity: a candidate set must never contain
/// two waypoints with the same name. The rider label is rewritten by the
/// handoff tracker while a search runs.
///
/// # Examples
/// ```
/// use relay_core::{Coordinate, Waypoint};
///
/// let start = Waypoint::new("Start", Coordinate::new(26.9124, 75.7873)?);
/// assert_eq!(start.name, "Start");
/// assert!(start.rider.is_none());
/// # Ok::<(), relay_core::CoordinateError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    /// Unique name within a candidate set.
    pub name: String,
    /// Location of the stop.
    pub location: Coordinate,
    /// Rider currently responsible for the leg leaving this stop.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rider: Option<String>,
    /// Display colour used when rendering the stop and its outgoing leg.
    #[cfg_attr(feature = "serde", serde(default))]
    pub colour: Option<Colour>,
}

impl Waypoint {
    /// Construct an unlabelled, uncoloured waypoint.
    pub fn new(name: impl Into<String>, location: Coordinate) -> Self {
        Self {
            name: name.into(),
            location,
            rider: None,
            colour: None,
        }
    }

    /// Attach a rider label.
    #[must_use]
    pub fn with_rider(mut self, rider: impl Into<String>) -> Self {
        self.rider = Some(rider.into());
        self
    }

    /// Attach a display colour.
    #[must_use]
    pub const fn with_colour(mut self, colour: Colour) -> Self {
        self.colour = Some(colour);
        self
    }
}

/// Errors returned by [`RiderPool::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiderPoolError {
    /// The pool contained no riders.
    #[error("rider pool must contain at least one rider")]
    Empty,
}

/// Ordered, non-empty set of rider labels.
///
/// Riders are handed work in pool order and the pool wraps around once the
/// last rider has been used.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<String>", into = "Vec<String>"))]
pub struct RiderPool {
    riders: Vec<String>,
}

impl RiderPool {
    /// Number of riders in the default pool.
    pub const DEFAULT_SIZE: usize = 10;

    /// Validate and construct a pool from explicit labels.
    pub fn new(riders: Vec<String>) -> Result<Self, RiderPoolError> {
        if riders.is_empty() {
            return Err(RiderPoolError::Empty);
        }
        Ok(Self { riders })
    }

    /// Build a pool labelled `"Rider 0"` to `"Rider {size - 1}"`.
    ///
    /// A `size` of zero is treated as one.
    ///
    /// # Examples
    /// ```
    /// use relay_core::RiderPool;
    ///
    /// let pool = RiderPool::numbered(3);
    /// assert_eq!(pool.len(), 3);
    /// assert_eq!(pool.rider(4), "Rider 1");
    /// ```
    #[must_use]
    pub fn numbered(size: usize) -> Self {
        let riders = (0..size.max(1)).map(|ordinal| format!("Rider {ordinal}")).collect();
        Self { riders }
    }

    /// Number of riders in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.riders.len()
    }

    /// Always `false`; pools are non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }

    /// Rider at `ordinal`, wrapping around the pool.
    #[must_use]
    pub fn rider(&self, ordinal: usize) -> &str {
        self.riders
            .get(ordinal.checked_rem(self.riders.len()).unwrap_or(0))
            .map_or("", String::as_str)
    }

    /// Iterate over the labels in pool order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.riders.iter().map(String::as_str)
    }
}

impl Default for RiderPool {
    fn default() -> Self {
        Self::numbered(Self::DEFAULT_SIZE)
    }
}

impl TryFrom<Vec<String>> for RiderPool {
    type Error = RiderPoolError;

    fn try_from(riders: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(riders)
    }
}

impl From<RiderPool> for Vec<String> {
    fn from(pool: RiderPool) -> Self {
        pool.riders
    }
}
