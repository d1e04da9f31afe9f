use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeomagError>;

#[derive(Error, Debug)]
pub enum GeomagError {
    /// No coefficient snapshots are loaded
    #[error("Coefficient table is empty")]
    EmptyTable,

    /// The requested epoch lies outside the epochs covered by the table
    #[error("No coefficient snapshots bracket epoch {0}")]
    NoBracketFound(f64),

    /// Unrecognized position tag
    #[error("Invalid coordinate kind: {0}")]
    InvalidCoordinateKind(String),

    /// Unparsable snapshot data in a coefficient stream
    #[error("Malformed coefficient stream: {0}")]
    MalformedCoefficientStream(String),

    /// An explicit list of snapshots breaks the table invariants
    #[error("Invalid coefficient table: {0}")]
    InvalidTable(String),

    /// A date string that is not ISO-8601 or a decimal year
    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),

    /// Unknown output unit name
    #[error("Invalid flux unit: {0}")]
    InvalidUnit(String),

    /// Unable to read a coefficient stream
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
