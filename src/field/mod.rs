pub mod legendre;
pub mod position;
pub mod synthesis;

pub use legendre::LegendreTable;
pub use position::{normalize, CoordinateKind, Geocentric, Position};
pub use synthesis::{rotate, synthesize, GeocentricField};
