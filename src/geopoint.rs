// src/geopoint.rs

use serde::{Deserialize, Serialize};

use crate::error::GeocodeError;

/// Represents a geographical point in decimal degrees.
///
/// Deserialization goes through [`Coordinate::new`], so out-of-range input is rejected.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = GeocodeError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Creates a new `Coordinate`.
    ///
    /// Returns `GeocodeError::InvalidCoordinate` if latitude is not between -90 and 90,
    /// or longitude is not between -180 and 180 (NaN is rejected too).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeocodeError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeocodeError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Coordinate {
            latitude,
            longitude,
        })
    }

    /// Returns this coordinate shifted by the given deltas in degrees.
    ///
    /// Latitude saturates at the poles and longitude wraps across the antimeridian,
    /// so the result is always a valid coordinate.
    pub fn offset(&self, delta_latitude: f64, delta_longitude: f64) -> Self {
        let latitude = (self.latitude + delta_latitude).clamp(-90.0, 90.0);
        let mut longitude = self.longitude + delta_longitude;
        if longitude > 180.0 {
            longitude -= 360.0;
        } else if longitude < -180.0 {
            longitude += 360.0;
        }
        Coordinate {
            latitude,
            longitude,
        }
    }
}

/// A coordinate carrying a heat intensity in `[0, 1]`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct WeightedPoint {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub intensity: f64,
}

impl WeightedPoint {
    pub(crate) fn new(coordinate: Coordinate, intensity: f64) -> Self {
        WeightedPoint {
            coordinate,
            intensity: intensity.clamp(0.0, 1.0),
        }
    }
}
