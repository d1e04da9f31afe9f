use crate::error::GeomagError;
use crate::utils::constants::{WGS84_SEMI_MAJOR_AXIS, WGS84_SEMI_MINOR_AXIS};
use std::fmt;
use std::str::FromStr;

/// Tag naming the coordinate system of a position
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordinateKind {
    /// Spherical coordinates about the Earth's centre
    Geocentric,
    /// Altitude above the WGS-84 ellipsoid and geodetic latitude
    Geodetic,
}

impl FromStr for CoordinateKind {
    type Err = GeomagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "geocentric" | "spherical" => Ok(CoordinateKind::Geocentric),
            "geodetic" | "wgs84" => Ok(CoordinateKind::Geodetic),
            _ => Err(GeomagError::InvalidCoordinateKind(s.to_string())),
        }
    }
}

impl fmt::Display for CoordinateKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CoordinateKind::Geocentric => write!(f, "geocentric"),
            CoordinateKind::Geodetic => write!(f, "geodetic"),
        }
    }
}

/// A point at which the field is evaluated. Distances in km, angles in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Position {
    GeocentricSpherical {
        /// Distance from the Earth's centre
        radius: f64,
        longitude: f64,
        /// Geocentric latitude
        latitude: f64,
    },
    Geodetic {
        /// Height above the WGS-84 ellipsoid
        altitude: f64,
        longitude: f64,
        /// Geodetic latitude
        latitude: f64,
    },
}

impl Position {
    /// Builds a position of the given kind. `height` is the radius for geocentric
    /// positions and the altitude for geodetic ones.
    pub fn new(kind: CoordinateKind, height: f64, longitude: f64, latitude: f64) -> Position {
        match kind {
            CoordinateKind::Geocentric => Position::geocentric(height, longitude, latitude),
            CoordinateKind::Geodetic => Position::geodetic(height, longitude, latitude),
        }
    }

    pub fn geocentric(radius: f64, longitude: f64, latitude: f64) -> Position {
        Position::GeocentricSpherical {
            radius,
            longitude,
            latitude,
        }
    }

    pub fn geodetic(altitude: f64, longitude: f64, latitude: f64) -> Position {
        Position::Geodetic {
            altitude,
            longitude,
            latitude,
        }
    }

    pub fn kind(&self) -> CoordinateKind {
        match self {
            Position::GeocentricSpherical { .. } => CoordinateKind::Geocentric,
            Position::Geodetic { .. } => CoordinateKind::Geodetic,
        }
    }

    pub fn longitude(&self) -> f64 {
        match *self {
            Position::GeocentricSpherical { longitude, .. } | Position::Geodetic { longitude, .. } => {
                longitude
            }
        }
    }

    pub fn latitude(&self) -> f64 {
        match *self {
            Position::GeocentricSpherical { latitude, .. } | Position::Geodetic { latitude, .. } => {
                latitude
            }
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Position::GeocentricSpherical {
                radius,
                longitude,
                latitude,
            } => write!(
                f,
                "geocentric lat {latitude:.4}°, lon {longitude:.4}°, r {radius:.3} km"
            ),
            Position::Geodetic {
                altitude,
                longitude,
                latitude,
            } => write!(
                f,
                "geodetic lat {latitude:.4}°, lon {longitude:.4}°, alt {altitude:.3} km"
            ),
        }
    }
}

/// Geocentric spherical coordinates ready for harmonic synthesis, together with the
/// rotation δ between the geocentric and the local geodetic frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geocentric {
    /// km
    pub radius: f64,
    pub cos_theta: f64,
    pub sin_theta: f64,
    /// radians
    pub longitude: f64,
    pub cos_delta: f64,
    pub sin_delta: f64,
}

impl Geocentric {
    /// Geocentric colatitude in radians
    pub fn colatitude(&self) -> f64 {
        self.sin_theta.atan2(self.cos_theta)
    }

    /// Angle δ from the geocentric to the geodetic frame, in radians
    pub fn rotation_angle(&self) -> f64 {
        self.sin_delta.atan2(self.cos_delta)
    }
}

/// Converts a position into geocentric spherical coordinates.
///
/// Geocentric input passes through with δ = 0. Geodetic input is corrected for the
/// oblateness of the WGS-84 ellipsoid in closed form.
pub fn normalize(position: &Position) -> Geocentric {
    match *position {
        Position::GeocentricSpherical {
            radius,
            longitude,
            latitude,
        } => {
            let theta = std::f64::consts::FRAC_PI_2 - latitude.to_radians();
            Geocentric {
                radius,
                cos_theta: theta.cos(),
                sin_theta: theta.sin(),
                longitude: longitude.to_radians(),
                cos_delta: 1.0,
                sin_delta: 0.0,
            }
        }
        Position::Geodetic {
            altitude,
            longitude,
            latitude,
        } => {
            let a2 = WGS84_SEMI_MAJOR_AXIS * WGS84_SEMI_MAJOR_AXIS;
            let b2 = WGS84_SEMI_MINOR_AXIS * WGS84_SEMI_MINOR_AXIS;

            let theta = std::f64::consts::FRAC_PI_2 - latitude.to_radians();
            let (st, ct) = (theta.sin(), theta.cos());
            let one = a2 * st * st;
            let two = b2 * ct * ct;
            let rho = (one + two).sqrt();

            let radius =
                ((a2 * one + b2 * two) / (one + two) + altitude * altitude + 2.0 * altitude * rho)
                    .sqrt();
            let cos_delta = (altitude + rho) / radius;
            let sin_delta = (a2 - b2) / rho * ct * st / radius;

            Geocentric {
                radius,
                cos_theta: ct * cos_delta - st * sin_delta,
                sin_theta: st * cos_delta + ct * sin_delta,
                longitude: longitude.to_radians(),
                cos_delta,
                sin_delta,
            }
        }
    }
}
