//! Distance, time and fare estimates for a planned route.
//!
//! Search distances are planar degrees; quotes use great-circle distance in
//! kilometres so fares reflect ground travel.

use geo::{Distance, Haversine};
use relay_core::{Colour, Coordinate, Route};
use thiserror::Error;

/// Default average travel speed in kilometres per hour.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 40.0;

/// Default fare per kilometre.
pub const DEFAULT_RATE_PER_KM: f64 = 10.0;

const METRES_PER_KILOMETRE: f64 = 1_000.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Pricing inputs for [`quote_route`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuoteConfig {
    /// Assumed average speed in kilometres per hour.
    pub average_speed_kmh: f64,
    /// Fare charged per kilometre.
    pub rate_per_km: f64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            rate_per_km: DEFAULT_RATE_PER_KM,
        }
    }
}

/// Errors returned by [`quote_route`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuoteError {
    /// The average speed was zero, negative, NaN or infinite.
    #[error("average speed must be a positive, finite number of km/h (got {0})")]
    InvalidSpeed(f64),
    /// The rate was negative, NaN or infinite.
    #[error("rate per kilometre must be a finite, non-negative amount (got {0})")]
    InvalidRate(f64),
}

impl QuoteConfig {
    /// Check that speed and rate are usable.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(QuoteError::InvalidSpeed(self.average_speed_kmh));
        }
        if !self.rate_per_km.is_finite() || self.rate_per_km < 0.0 {
            return Err(QuoteError::InvalidRate(self.rate_per_km));
        }
        Ok(())
    }
}

/// Estimate for one leg of a route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LegQuote {
    /// Name of the waypoint the leg leaves from.
    pub from: String,
    /// Name of the waypoint the leg arrives at.
    pub to: String,
    /// Rider carrying the leg.
    pub rider: Option<String>,
    /// Display colour of the leg.
    pub colour: Option<Colour>,
    /// Great-circle length in kilometres.
    pub distance_km: f64,
    /// Travel time in minutes at the configured average speed.
    pub minutes: f64,
    /// Fare for the leg.
    pub fare: f64,
}

/// Per-leg estimates and totals for a route.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RideQuote {
    /// One entry per consecutive pair of route waypoints.
    pub legs: Vec<LegQuote>,
    /// Sum of leg distances in kilometres.
    pub total_distance_km: f64,
    /// Sum of leg travel times in minutes.
    pub total_minutes: f64,
    /// Sum of leg fares.
    pub total_fare: f64,
}

/// Price every leg of `route`.
///
/// An empty or single-stop route yields an empty quote.
///
/// # Errors
///
/// Returns [`QuoteError`] when `config` fails [`QuoteConfig::validate`].
///
/// # Examples
/// ```
/// use relay_core::{Coordinate, Route, Waypoint};
/// use relay_dispatch::{QuoteConfig, quote_route};
///
/// let route = Route::new(
///     vec![
///         Waypoint::new("Start", Coordinate::new(26.9124, 75.7873)?).with_rider("Rider 0"),
///         Waypoint::new("Destination", Coordinate::new(26.95, 75.825)?),
///     ],
///     0.053,
/// );
/// let quote = quote_route(&route, &QuoteConfig::default())?;
/// assert_eq!(quote.legs.len(), 1);
/// assert!(quote.total_distance_km > 5.0 && quote.total_distance_km < 6.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "quotes accumulate kilometre and fare totals"
)]
pub fn quote_route(route: &Route, config: &QuoteConfig) -> Result<RideQuote, QuoteError> {
    config.validate()?;
    let mut quote = RideQuote::default();
    for segment in route.segments() {
        let distance_km = great_circle_km(segment.from.location, segment.to.location);
        let leg = LegQuote {
            from: segment.from.name.clone(),
            to: segment.to.name.clone(),
            rider: segment.rider.map(str::to_owned),
            colour: segment.colour,
            distance_km,
            minutes: distance_km / config.average_speed_kmh * MINUTES_PER_HOUR,
            fare: distance_km * config.rate_per_km,
        };
        quote.total_distance_km += leg.distance_km;
        quote.total_minutes += leg.minutes;
        quote.total_fare += leg.fare;
        quote.legs.push(leg);
    }
    log::debug!(
        "quoted {} legs: {:.2} km, fare {:.2}",
        quote.legs.len(),
        quote.total_distance_km,
        quote.total_fare
    );
    Ok(quote)
}

#[expect(
    clippy::float_arithmetic,
    reason = "converts metres to kilometres"
)]
fn great_circle_km(from: Coordinate, to: Coordinate) -> f64 {
    Haversine.distance(from.to_point(), to.to_point()) / METRES_PER_KILOMETRE
}
