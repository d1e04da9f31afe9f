/// Reference radius of the IGRF spherical harmonic expansion
pub const RADIUS_EARTH: f64 = 6371.2; // km

/// WGS-84 reference ellipsoid
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6378.137; // km
pub const WGS84_SEMI_MINOR_AXIS: f64 = 6356.752314245; // km

pub(crate) const NANOTESLA_TO_TESLA: f64 = 1.0e-9;
pub(crate) const NANOTESLA_TO_MICROTESLA: f64 = 1.0e-3;
pub(crate) const NANOTESLA_TO_GAUSS: f64 = 1.0e-5;

pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;
