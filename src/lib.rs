//! Geomagnetic field from the International Geomagnetic Reference Field (IGRF-13).
//!
//! The main entry point is [`Igrf`], which evaluates the field as a north, east, down
//! vector in nanotesla for an epoch and a [`Position`]. [`GeoMagFlux`] wraps an engine
//! to report the field in another unit.
//!
//! ```no_run
//! use geomag::{Igrf, Position};
//!
//! let igrf = Igrf::new()?;
//! let b = igrf.field(2020.0, &Position::geodetic(1.655, -105.0, 40.0))?;
//! println!("north {:.1} nT, east {:.1} nT, down {:.1} nT", b.x, b.y, b.z);
//! # Ok::<(), geomag::error::GeomagError>(())
//! ```
pub mod error;
pub mod field;
pub mod flux;
pub mod igrf;
pub mod model;
pub mod utils;

pub use error::{GeomagError, Result};
pub use field::position::{CoordinateKind, Position};
pub use flux::{FluxUnit, GeoMagFlux, MagneticComponents};
pub use igrf::Igrf;
pub use model::snapshot::{ModelKind, Snapshot};
pub use model::table::CoefficientTable;
pub use utils::time::{parse_epoch, FractionalYear};
