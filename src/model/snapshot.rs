use std::fmt;

/// Maximum degree (and order) of the IGRF expansion
pub const MAX_DEGREE: usize = 13;

/// Number of packed Gauss coefficients, n_max * (n_max + 2)
pub const NUM_COEFFICIENTS: usize = MAX_DEGREE * (MAX_DEGREE + 2);

pub type Coefficients = [f64; NUM_COEFFICIENTS];

/// How the coefficients of a snapshot should be read
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModelKind {
    /// DGRF, a definitive main-field model
    Definitive,
    /// IGRF, a main-field model that may still be revised
    Predictive,
    /// SV, annual rate of change of the coefficients (nT/year)
    SecularVariation,
    /// Working model obtained by interpolating two main-field snapshots
    Interpolated,
    /// Working model obtained by extrapolating with a secular-variation snapshot
    Extrapolated,
}

impl ModelKind {
    /// Maps the column labels of a NOAA coefficient file
    pub fn from_label(label: &str) -> Option<ModelKind> {
        match label {
            "DGRF" => Some(ModelKind::Definitive),
            "IGRF" => Some(ModelKind::Predictive),
            "SV" => Some(ModelKind::SecularVariation),
            _ => None,
        }
    }

    /// True for the kinds produced by blending, which never belong in a table
    pub fn is_working(&self) -> bool {
        matches!(self, ModelKind::Interpolated | ModelKind::Extrapolated)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            ModelKind::Definitive => "DGRF",
            ModelKind::Predictive => "IGRF",
            ModelKind::SecularVariation => "SV",
            ModelKind::Interpolated => "interpolated",
            ModelKind::Extrapolated => "extrapolated",
        };
        write!(f, "{label}")
    }
}

/// Which half of a Gauss coefficient pair
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Harmonic {
    G,
    H,
}

/// Position of g(n, m) or h(n, m) in the packed coefficient array.
///
/// Coefficients are packed in IGRF column order: for n = 1..=13 and m = 0..=n,
/// g(n, 0) alone, then g(n, m), h(n, m) for m >= 1.
///
/// # Panics
/// Panics if `n` is outside `1..=MAX_DEGREE`, `m > n`, or `h` is requested for `m == 0`.
pub fn coefficient_index(n: usize, m: usize, harmonic: Harmonic) -> usize {
    assert!(
        (1..=MAX_DEGREE).contains(&n) && m <= n,
        "degree/order ({n}, {m}) outside the packed coefficient range"
    );
    let degree_start = n * n - 1;
    match (m, harmonic) {
        (0, Harmonic::G) => degree_start,
        (0, Harmonic::H) => panic!("h({n}, 0) is not part of the expansion"),
        (_, Harmonic::G) => degree_start + 2 * m - 1,
        (_, Harmonic::H) => degree_start + 2 * m,
    }
}

/// A named set of Gauss coefficients valid at one epoch
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Fractional year
    pub epoch: f64,
    pub kind: ModelKind,
    pub coefficients: Coefficients,
}

impl Snapshot {
    pub fn new(epoch: f64, kind: ModelKind, coefficients: Coefficients) -> Snapshot {
        Snapshot {
            epoch,
            kind,
            coefficients,
        }
    }

    pub fn g(&self, n: usize, m: usize) -> f64 {
        self.coefficients[coefficient_index(n, m, Harmonic::G)]
    }

    /// h(n, 0) does not exist and reads as zero
    pub fn h(&self, n: usize, m: usize) -> f64 {
        if m == 0 {
            0.0
        } else {
            self.coefficients[coefficient_index(n, m, Harmonic::H)]
        }
    }
}
