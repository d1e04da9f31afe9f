pub mod blend;
pub mod parser;
pub mod snapshot;
pub mod table;

pub use blend::blend;
pub use snapshot::{coefficient_index, Harmonic, ModelKind, Snapshot, MAX_DEGREE, NUM_COEFFICIENTS};
pub use table::CoefficientTable;
