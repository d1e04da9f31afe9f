use crate::error::{GeomagError, Result};
use crate::model::snapshot::{ModelKind, Snapshot};
use tracing::{debug, trace};

/// Immutable, epoch-ordered collection of coefficient snapshots.
///
/// Epochs are strictly ascending. At most one `SecularVariation` snapshot is allowed,
/// and only as the final entry, where it marks the extrapolation horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    snapshots: Vec<Snapshot>,
}

impl CoefficientTable {
    /// Builds a table from snapshots already sorted by epoch.
    ///
    /// # Errors
    /// Will return `Err` if the epochs are not strictly ascending, if a secular-variation
    /// snapshot is anywhere but last, or if a working-model kind is present.
    pub fn new(snapshots: Vec<Snapshot>) -> Result<CoefficientTable> {
        for (i, snapshot) in snapshots.iter().enumerate() {
            if !snapshot.epoch.is_finite() {
                return Err(GeomagError::InvalidTable(format!(
                    "snapshot {i} has a non-finite epoch"
                )));
            }
            if snapshot.kind.is_working() {
                return Err(GeomagError::InvalidTable(format!(
                    "snapshot {i} at {} is a working model ({})",
                    snapshot.epoch, snapshot.kind
                )));
            }
            if snapshot.kind == ModelKind::SecularVariation && i + 1 != snapshots.len() {
                return Err(GeomagError::InvalidTable(format!(
                    "secular variation at {} must be the final snapshot",
                    snapshot.epoch
                )));
            }
        }
        for pair in snapshots.windows(2) {
            if pair[0].epoch >= pair[1].epoch {
                return Err(GeomagError::InvalidTable(format!(
                    "epochs must be strictly ascending, found {} before {}",
                    pair[0].epoch, pair[1].epoch
                )));
            }
        }

        let table = CoefficientTable { snapshots };
        if let Some((first, last)) = table.coverage() {
            debug!(
                snapshots = table.len(),
                first, last, "built coefficient table"
            );
        }
        Ok(table)
    }

    /// Finds the tightest pair `(lower, upper)` with `lower.epoch <= epoch <= upper.epoch`.
    ///
    /// An exact match with a snapshot epoch returns that snapshot as `upper`, except for
    /// the first snapshot which is returned as `lower` of the first pair.
    ///
    /// # Errors
    /// `EmptyTable` if there are no snapshots, `NoBracketFound` if `epoch` precedes the
    /// first snapshot or lies beyond the last one.
    pub fn select(&self, epoch: f64) -> Result<(&Snapshot, &Snapshot)> {
        if self.snapshots.is_empty() {
            return Err(GeomagError::EmptyTable);
        }
        let i = self.snapshots.partition_point(|s| s.epoch < epoch);
        let upper = match i {
            0 if self.snapshots.len() > 1 && self.snapshots[0].epoch == epoch => 1,
            0 => Err(GeomagError::NoBracketFound(epoch))?,
            i if i == self.snapshots.len() => Err(GeomagError::NoBracketFound(epoch))?,
            i => i,
        };
        let (lower, upper) = (&self.snapshots[upper - 1], &self.snapshots[upper]);
        trace!(
            epoch,
            lower = lower.epoch,
            upper = upper.epoch,
            upper_kind = %upper.kind,
            "selected bracketing snapshots"
        );
        Ok((lower, upper))
    }

    /// Epochs of the first and last snapshot
    pub fn coverage(&self) -> Option<(f64, f64)> {
        Some((self.snapshots.first()?.epoch, self.snapshots.last()?.epoch))
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

impl<'a> IntoIterator for &'a CoefficientTable {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::snapshot::NUM_COEFFICIENTS;

    fn snapshot(epoch: f64, kind: ModelKind) -> Snapshot {
        Snapshot::new(epoch, kind, [epoch; NUM_COEFFICIENTS])
    }

    fn table() -> CoefficientTable {
        CoefficientTable::new(vec![
            snapshot(2000.0, ModelKind::Definitive),
            snapshot(2005.0, ModelKind::Definitive),
            snapshot(2010.0, ModelKind::Predictive),
            snapshot(2015.0, ModelKind::SecularVariation),
        ])
        .unwrap()
    }

    #[test]
    fn select_inside() {
        let table = table();
        let (lower, upper) = table.select(2007.3).unwrap();
        assert_eq!((lower.epoch, upper.epoch), (2005.0, 2010.0));
        let (lower, upper) = table.select(2012.0).unwrap();
        assert_eq!((lower.epoch, upper.epoch), (2010.0, 2015.0));
        assert_eq!(upper.kind, ModelKind::SecularVariation);
    }

    #[test]
    fn select_exact() {
        let table = table();
        let (lower, upper) = table.select(2005.0).unwrap();
        assert_eq!((lower.epoch, upper.epoch), (2000.0, 2005.0));
        let (lower, upper) = table.select(2000.0).unwrap();
        assert_eq!((lower.epoch, upper.epoch), (2000.0, 2005.0));
        let (lower, upper) = table.select(2015.0).unwrap();
        assert_eq!((lower.epoch, upper.epoch), (2010.0, 2015.0));
    }

    #[test]
    fn select_out_of_range() {
        let table = table();
        assert!(matches!(
            table.select(1999.99),
            Err(GeomagError::NoBracketFound(_))
        ));
        assert!(matches!(
            table.select(2015.01),
            Err(GeomagError::NoBracketFound(_))
        ));
        assert!(matches!(
            table.select(f64::NAN),
            Err(GeomagError::NoBracketFound(_))
        ));
    }

    #[test]
    fn select_empty() {
        let table = CoefficientTable::new(vec![]).unwrap();
        assert!(matches!(table.select(2000.0), Err(GeomagError::EmptyTable)));
        assert_eq!(table.coverage(), None);
    }

    #[test]
    fn single_snapshot_has_no_bracket() {
        let table = CoefficientTable::new(vec![snapshot(2000.0, ModelKind::Predictive)]).unwrap();
        assert!(matches!(
            table.select(2000.0),
            Err(GeomagError::NoBracketFound(_))
        ));
    }

    #[test]
    fn rejects_unsorted() {
        let result = CoefficientTable::new(vec![
            snapshot(2005.0, ModelKind::Definitive),
            snapshot(2000.0, ModelKind::Definitive),
        ]);
        assert!(matches!(result, Err(GeomagError::InvalidTable(_))));
        let result = CoefficientTable::new(vec![
            snapshot(2005.0, ModelKind::Definitive),
            snapshot(2005.0, ModelKind::Predictive),
        ]);
        assert!(matches!(result, Err(GeomagError::InvalidTable(_))));
    }

    #[test]
    fn rejects_misplaced_secular_variation() {
        let result = CoefficientTable::new(vec![
            snapshot(2000.0, ModelKind::Definitive),
            snapshot(2005.0, ModelKind::SecularVariation),
            snapshot(2010.0, ModelKind::SecularVariation),
        ]);
        assert!(matches!(result, Err(GeomagError::InvalidTable(_))));
    }

    #[test]
    fn rejects_working_models() {
        let result = CoefficientTable::new(vec![
            snapshot(2000.0, ModelKind::Definitive),
            snapshot(2002.5, ModelKind::Interpolated),
        ]);
        assert!(matches!(result, Err(GeomagError::InvalidTable(_))));
    }
}
