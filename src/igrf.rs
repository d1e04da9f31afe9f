//! The field engine: a shared coefficient table plus the per-query pipeline
//! select → blend → normalize → synthesize → rotate.
use crate::error::Result;
use crate::field::position::{normalize, Position};
use crate::field::synthesis::{rotate, synthesize};
use crate::model::blend::blend;
use crate::model::snapshot::Snapshot;
use crate::model::table::CoefficientTable;
use crate::utils::time::FractionalYear;
use nalgebra::Vector3;
use rayon::prelude::*;
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

/// International Geomagnetic Reference Field model.
///
/// Holds an immutable coefficient table and keeps no per-query state, so a single
/// instance (or its clones, which share the table) can be queried from many threads.
#[derive(Debug, Clone)]
pub struct Igrf {
    table: Arc<CoefficientTable>,
}

impl Igrf {
    /// Builds the engine from the bundled IGRF-13 coefficients.
    ///
    /// # Errors
    /// Will return `Err` if the bundled coefficient file is missing or malformed.
    pub fn new() -> Result<Igrf> {
        Ok(Igrf::from_table(CoefficientTable::igrf13()?))
    }

    pub fn from_table(table: CoefficientTable) -> Igrf {
        Igrf {
            table: Arc::new(table),
        }
    }

    /// Builds the engine from a coefficient stream in the NOAA layout.
    ///
    /// # Errors
    /// See [`CoefficientTable::from_reader`].
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Igrf> {
        Ok(Igrf::from_table(CoefficientTable::from_reader(reader)?))
    }

    /// Builds the engine from a coefficient file in the NOAA layout.
    ///
    /// # Errors
    /// See [`CoefficientTable::from_file`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Igrf> {
        Ok(Igrf::from_table(CoefficientTable::from_file(path)?))
    }

    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }

    /// First and last epoch of the table. Epochs past the last main-field snapshot are
    /// only covered if the table ends with a secular-variation snapshot.
    pub fn coverage(&self) -> Option<(f64, f64)> {
        self.table.coverage()
    }

    /// The working coefficients for `epoch`.
    ///
    /// # Errors
    /// `EmptyTable` or `NoBracketFound` from the table lookup.
    pub fn model_at(&self, epoch: impl FractionalYear) -> Result<Snapshot> {
        let epoch = epoch.fractional_year();
        let (lower, upper) = self.table.select(epoch)?;
        Ok(blend(epoch, lower, upper))
    }

    /// Magnetic field at `position` and `epoch`, in nT, as (north, east, down).
    ///
    /// # Errors
    /// `EmptyTable` or `NoBracketFound` if the epoch is not covered.
    pub fn field(&self, epoch: impl FractionalYear, position: &Position) -> Result<Vector3<f64>> {
        let model = self.model_at(epoch)?;
        let geocentric = normalize(position);
        let field = synthesize(&model, &geocentric);
        Ok(rotate(&field, &geocentric))
    }

    /// Field at a geodetic position: altitude above the WGS-84 ellipsoid in km,
    /// longitude and geodetic latitude in degrees.
    ///
    /// # Errors
    /// See [`Igrf::field`].
    pub fn field_geodetic(
        &self,
        epoch: impl FractionalYear,
        altitude: f64,
        longitude: f64,
        latitude: f64,
    ) -> Result<Vector3<f64>> {
        self.field(epoch, &Position::geodetic(altitude, longitude, latitude))
    }

    /// Field at a geocentric position: radius in km, longitude and geocentric latitude
    /// in degrees.
    ///
    /// # Errors
    /// See [`Igrf::field`].
    pub fn field_geocentric(
        &self,
        epoch: impl FractionalYear,
        radius: f64,
        longitude: f64,
        latitude: f64,
    ) -> Result<Vector3<f64>> {
        self.field(epoch, &Position::geocentric(radius, longitude, latitude))
    }

    /// Evaluates many queries in parallel, preserving their order.
    ///
    /// # Errors
    /// Returns the error of the first failing query.
    pub fn par_field(&self, queries: &[(f64, Position)]) -> Result<Vec<Vector3<f64>>> {
        let results: Vec<Result<Vector3<f64>>> = queries
            .par_iter()
            .map(|(epoch, position)| self.field(*epoch, position))
            .collect();

        let mut fields = vec![];
        for res in results {
            match res {
                Ok(x) => fields.push(x),
                Err(e) => Err(e)?,
            }
        }
        Ok(fields)
    }
}
