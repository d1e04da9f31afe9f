use crate::model::snapshot::{ModelKind, Snapshot, NUM_COEFFICIENTS};
use tracing::trace;

/// Produces the working coefficients for `epoch` from its bracketing snapshots.
///
/// Between two main-field snapshots each coefficient is interpolated linearly. When
/// `upper` is a secular-variation snapshot its coefficients are annual rates and the
/// coefficients of `lower` are extrapolated linearly from `lower.epoch`.
pub fn blend(epoch: f64, lower: &Snapshot, upper: &Snapshot) -> Snapshot {
    let mut coefficients = [0.0; NUM_COEFFICIENTS];

    let kind = if upper.kind == ModelKind::SecularVariation {
        let dt = epoch - lower.epoch;
        for ((c, low), rate) in coefficients
            .iter_mut()
            .zip(lower.coefficients.iter())
            .zip(upper.coefficients.iter())
        {
            *c = low + dt * rate;
        }
        ModelKind::Extrapolated
    } else {
        let f = (epoch - lower.epoch) / (upper.epoch - lower.epoch);
        for ((c, low), up) in coefficients
            .iter_mut()
            .zip(lower.coefficients.iter())
            .zip(upper.coefficients.iter())
        {
            *c = (1.0 - f) * low + f * up;
        }
        ModelKind::Interpolated
    };
    trace!(epoch, lower = lower.epoch, upper = upper.epoch, %kind, "blended working model");

    Snapshot::new(epoch, kind, coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::CoefficientTable;

    fn flat(epoch: f64, kind: ModelKind, value: f64) -> Snapshot {
        Snapshot::new(epoch, kind, [value; NUM_COEFFICIENTS])
    }

    #[test]
    fn interpolation() {
        let lower = flat(2000.0, ModelKind::Definitive, 10.0);
        let upper = flat(2005.0, ModelKind::Definitive, 20.0);
        let model = blend(2001.0, &lower, &upper);
        assert_eq!(model.kind, ModelKind::Interpolated);
        assert_eq!(model.epoch, 2001.0);
        assert!(model.coefficients.iter().all(|&c| c == 12.0));
    }

    #[test]
    fn extrapolation() {
        let lower = flat(2020.0, ModelKind::Predictive, 10.0);
        let rate = flat(2025.0, ModelKind::SecularVariation, -2.0);
        let model = blend(2022.5, &lower, &rate);
        assert_eq!(model.kind, ModelKind::Extrapolated);
        assert!(model.coefficients.iter().all(|&c| c == 5.0));
    }

    #[test]
    fn lower_bound_is_reproduced() {
        let table = CoefficientTable::igrf13().unwrap();
        for pair in table.snapshots().windows(2) {
            let model = blend(pair[0].epoch, &pair[0], &pair[1]);
            assert_eq!(model.coefficients, pair[0].coefficients);
        }
    }

    #[test]
    fn upper_bound_is_reproduced() {
        let table = CoefficientTable::igrf13().unwrap();
        let (lower, upper) = table.select(2020.0).unwrap();
        let model = blend(2020.0, lower, upper);
        assert_eq!(model.kind, ModelKind::Interpolated);
        assert_eq!(model.coefficients, upper.coefficients);
    }
}
