use crate::error::{GeomagError, Result};
use crate::field::position::Position;
use crate::igrf::Igrf;
use crate::utils::constants::{NANOTESLA_TO_GAUSS, NANOTESLA_TO_MICROTESLA, NANOTESLA_TO_TESLA};
use crate::utils::time::FractionalYear;
use nalgebra::Vector3;
use std::fmt;
use std::str::FromStr;

/// Unit of magnetic flux density reported by [`GeoMagFlux`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FluxUnit {
    NanoTesla,
    MicroTesla,
    #[default]
    Tesla,
    Gauss,
}

impl FluxUnit {
    /// Factor converting nanotesla into this unit
    pub fn scale(&self) -> f64 {
        match self {
            FluxUnit::NanoTesla => 1.0,
            FluxUnit::MicroTesla => NANOTESLA_TO_MICROTESLA,
            FluxUnit::Tesla => NANOTESLA_TO_TESLA,
            FluxUnit::Gauss => NANOTESLA_TO_GAUSS,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            FluxUnit::NanoTesla => "nT",
            FluxUnit::MicroTesla => "uT",
            FluxUnit::Tesla => "T",
            FluxUnit::Gauss => "G",
        }
    }
}

impl FromStr for FluxUnit {
    type Err = GeomagError;

    /// Accepts unit names and symbols. The unit systems `si`, `mks` and `mksa`
    /// resolve to tesla, `cgs` to gauss.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nanotesla" | "nt" => Ok(FluxUnit::NanoTesla),
            "microtesla" | "ut" | "µt" => Ok(FluxUnit::MicroTesla),
            "tesla" | "t" | "si" | "mks" | "mksa" => Ok(FluxUnit::Tesla),
            "gauss" | "g" | "cgs" => Ok(FluxUnit::Gauss),
            _ => Err(GeomagError::InvalidUnit(s.to_string())),
        }
    }
}

impl fmt::Display for FluxUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An [`Igrf`] engine reporting flux density in a chosen unit
#[derive(Debug, Clone)]
pub struct GeoMagFlux {
    igrf: Igrf,
    unit: FluxUnit,
}

impl GeoMagFlux {
    pub fn new(igrf: Igrf, unit: FluxUnit) -> GeoMagFlux {
        GeoMagFlux { igrf, unit }
    }

    pub fn unit(&self) -> FluxUnit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: FluxUnit) {
        self.unit = unit;
    }

    pub fn igrf(&self) -> &Igrf {
        &self.igrf
    }

    /// Flux density at `position` and `epoch` as (north, east, down), in `self.unit()`.
    ///
    /// # Errors
    /// See [`Igrf::field`].
    pub fn field(&self, epoch: impl FractionalYear, position: &Position) -> Result<Vector3<f64>> {
        Ok(self.igrf.field(epoch, position)? * self.unit.scale())
    }
}

/// Quantities derived from a north, east, down field vector
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MagneticComponents {
    pub north: f64,
    pub east: f64,
    pub down: f64,
    /// Horizontal intensity H
    pub horizontal: f64,
    /// Total intensity F
    pub total: f64,
    /// Inclination I in degrees, positive downwards
    pub inclination: f64,
    /// Declination D in degrees, positive east of north
    pub declination: f64,
}

impl From<Vector3<f64>> for MagneticComponents {
    fn from(ned: Vector3<f64>) -> Self {
        let horizontal = ned.x.hypot(ned.y);
        MagneticComponents {
            north: ned.x,
            east: ned.y,
            down: ned.z,
            horizontal,
            total: ned.norm(),
            inclination: ned.z.atan2(horizontal).to_degrees(),
            declination: ned.y.atan2(ned.x).to_degrees(),
        }
    }
}
