//! Reader for coefficient files in the NOAA `igrfNNcoeffs.txt` layout:
//!
//! ```text
//! # comment lines
//! c/s deg ord IGRF  DGRF  ...  IGRF   SV
//! g/h n   m   1900.0 1945.0 ... 2020.0 2020-25
//! g   1   0   -31543 -30594 ... -29404.8 5.7
//! h   1   1   5922   5810   ... 4652.5  -25.9
//! ```
//!
//! Every column after the third is one snapshot. The `c/s` row names the model kinds,
//! the `g/h` row gives the epochs and each `g`/`h` row carries one coefficient per
//! snapshot for the degree and order in its second and third columns.
use crate::error::{GeomagError, Result};
use crate::model::snapshot::{
    coefficient_index, Coefficients, Harmonic, ModelKind, Snapshot, MAX_DEGREE, NUM_COEFFICIENTS,
};
use crate::model::table::CoefficientTable;
use itertools::Itertools;
use rust_embed::RustEmbed;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::trace;

#[derive(RustEmbed)]
#[folder = "data/"]
struct ModelFiles;

/// IGRF-13, 1900.0 to 2020.0 plus the 2020-25 secular variation
pub const DEFAULT_MODEL_FILE: &str = "igrf13coeffs.txt";

#[derive(Debug, PartialEq)]
enum RowKind {
    Comment,
    ModelKinds,
    Epochs,
    Coefficient(Harmonic),
    Unknown,
}

fn row_kind(label: &str) -> RowKind {
    match label {
        l if l.starts_with('#') => RowKind::Comment,
        "c/s" => RowKind::ModelKinds,
        "g/h" => RowKind::Epochs,
        "g" => RowKind::Coefficient(Harmonic::G),
        "h" => RowKind::Coefficient(Harmonic::H),
        _ => RowKind::Unknown,
    }
}

/// Parses an epoch column header such as `1995.0` or `2020-25`.
///
/// A hyphenated range names the epoch at its upper end. A short upper bound borrows
/// the leading digits of the lower bound, so `2020-25` is 2025.0 and `1995-2000` is 2000.0.
fn parse_epoch_token(token: &str) -> Option<f64> {
    match token.split_once('-') {
        Some((lower, upper)) if !lower.is_empty() => {
            let lower_year = lower.split('.').next().unwrap_or(lower);
            if !lower_year.chars().all(|c| c.is_ascii_digit())
                || !upper.chars().all(|c| c.is_ascii_digit())
                || upper.is_empty()
            {
                return None;
            }
            let year = if upper.len() < lower_year.len() {
                format!("{}{}", &lower_year[..lower_year.len() - upper.len()], upper)
            } else {
                upper.to_string()
            };
            year.parse::<f64>().ok()
        }
        _ => token.parse::<f64>().ok().filter(|e| e.is_finite()),
    }
}

fn malformed(line: usize, reason: &str) -> GeomagError {
    GeomagError::MalformedCoefficientStream(format!("line {line}: {reason}"))
}

impl CoefficientTable {
    /// The bundled IGRF-13 coefficients
    ///
    /// # Errors
    /// Only fails if the bundled file is missing or corrupt.
    pub fn igrf13() -> Result<CoefficientTable> {
        let file = ModelFiles::get(DEFAULT_MODEL_FILE).ok_or_else(|| {
            GeomagError::MalformedCoefficientStream(format!(
                "bundled model file {DEFAULT_MODEL_FILE} not found"
            ))
        })?;
        CoefficientTable::from_reader(BufReader::new(file.data.as_ref()))
    }

    /// Reads a coefficient file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<CoefficientTable> {
        let file = File::open(path)?;
        CoefficientTable::from_reader(BufReader::new(file))
    }

    /// Parses a stream in the NOAA coefficient-file layout.
    ///
    /// Non-numeric tokens among the value columns are skipped. Coefficients missing
    /// from the stream (e.g. a file that stops at degree 10) are left at zero.
    ///
    /// # Errors
    /// `EmptyTable` if the stream declares no snapshots, `MalformedCoefficientStream` if
    /// rows are out of place or do not carry one value per snapshot, `InvalidTable` if
    /// the snapshots break the table ordering rules.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<CoefficientTable> {
        let mut kinds: Vec<ModelKind> = vec![];
        let mut epochs: Vec<f64> = vec![];
        let mut columns: Vec<Coefficients> = vec![];

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = i + 1;
            let mut tokens = line.split_whitespace();
            let label = match tokens.next() {
                Some(l) => l,
                None => continue,
            };

            match row_kind(label) {
                RowKind::Comment | RowKind::Unknown => continue,
                RowKind::ModelKinds => {
                    kinds = tokens.filter_map(ModelKind::from_label).collect();
                    columns = vec![[0.0; NUM_COEFFICIENTS]; kinds.len()];
                    epochs.clear();
                }
                RowKind::Epochs => {
                    if kinds.is_empty() {
                        return Err(malformed(line_num, "epoch row before the c/s header"));
                    }
                    epochs = tokens
                        .filter_map(|token| {
                            let epoch = parse_epoch_token(token);
                            if epoch.is_none() {
                                trace!(line = line_num, token, "skipping epoch token");
                            }
                            epoch
                        })
                        .collect();
                    if epochs.len() != kinds.len() {
                        return Err(malformed(
                            line_num,
                            &format!("{} epochs for {} models", epochs.len(), kinds.len()),
                        ));
                    }
                }
                RowKind::Coefficient(harmonic) => {
                    if kinds.is_empty() {
                        return Err(malformed(line_num, "coefficient row before the c/s header"));
                    }
                    let (degree, order) = tokens
                        .next_tuple()
                        .ok_or_else(|| malformed(line_num, "missing degree and order"))?;
                    let n = degree
                        .parse::<usize>()
                        .map_err(|_| malformed(line_num, "degree is not an integer"))?;
                    let m = order
                        .parse::<usize>()
                        .map_err(|_| malformed(line_num, "order is not an integer"))?;
                    if !(1..=MAX_DEGREE).contains(&n) || m > n {
                        return Err(malformed(
                            line_num,
                            &format!("degree/order ({n}, {m}) outside 1..={MAX_DEGREE}"),
                        ));
                    }
                    if harmonic == Harmonic::H && m == 0 {
                        return Err(malformed(line_num, "h coefficient with order 0"));
                    }

                    let values: Vec<f64> = tokens
                        .filter_map(|token| match token.parse::<f64>() {
                            Ok(v) if v.is_finite() => Some(v),
                            _ => {
                                trace!(line = line_num, token, "skipping coefficient token");
                                None
                            }
                        })
                        .collect();
                    if values.len() != kinds.len() {
                        return Err(malformed(
                            line_num,
                            &format!("{} values for {} models", values.len(), kinds.len()),
                        ));
                    }
                    let index = coefficient_index(n, m, harmonic);
                    for (column, value) in columns.iter_mut().zip(values) {
                        column[index] = value;
                    }
                }
            }
        }

        if kinds.is_empty() {
            return Err(GeomagError::EmptyTable);
        }
        if epochs.len() != kinds.len() {
            return Err(GeomagError::MalformedCoefficientStream(
                "missing g/h epoch row".to_string(),
            ));
        }
        let snapshots = epochs
            .into_iter()
            .zip(kinds)
            .zip(columns)
            .map(|((epoch, kind), coefficients)| Snapshot::new(epoch, kind, coefficients))
            .collect();
        CoefficientTable::new(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_FILE: &str = "\
# two models and a rate, degree 1 only
c/s deg ord DGRF IGRF SV
g/h n m 2010.0 2015.0 2015-20
g 1 0 -29496.57 -29441.46 10.3
g 1 1 -1586.42 -1501.77 18.1
h 1 1 4944.26 4795.99 -26.6
";

    #[test]
    fn epoch_tokens() {
        assert_eq!(parse_epoch_token("1900.0"), Some(1900.0));
        assert_eq!(parse_epoch_token("2020-25"), Some(2025.0));
        assert_eq!(parse_epoch_token("2015-20"), Some(2020.0));
        assert_eq!(parse_epoch_token("1995-2000"), Some(2000.0));
        assert_eq!(parse_epoch_token("2020.0-25"), Some(2025.0));
        assert_eq!(parse_epoch_token("2020-5"), Some(2025.0));
        assert_eq!(parse_epoch_token("2020-"), None);
        assert_eq!(parse_epoch_token("n"), None);
        assert_eq!(parse_epoch_token("-12.5"), Some(-12.5));
        assert_eq!(parse_epoch_token("inf"), None);
    }

    #[test]
    fn small_file() {
        let table = CoefficientTable::from_reader(SMALL_FILE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        let epochs: Vec<f64> = table.iter().map(|s| s.epoch).collect();
        assert_eq!(epochs, vec![2010.0, 2015.0, 2020.0]);
        let kinds: Vec<ModelKind> = table.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ModelKind::Definitive,
                ModelKind::Predictive,
                ModelKind::SecularVariation
            ]
        );
        let sv = table.get(2).unwrap();
        assert_eq!(sv.g(1, 0), 10.3);
        assert_eq!(sv.g(1, 1), 18.1);
        assert_eq!(sv.h(1, 1), -26.6);
        assert_eq!(sv.g(2, 0), 0.0);
    }

    #[test]
    fn skips_junk_tokens() {
        let text = "\
c/s deg ord IGRF IGRF
g/h n m 2000.0 2005.0
g 1 0 -29619.4 ? -29554.63
";
        let table = CoefficientTable::from_reader(text.as_bytes()).unwrap();
        assert_eq!(table.get(1).unwrap().g(1, 0), -29554.63);
    }

    #[test]
    fn column_count_mismatch() {
        let text = "\
c/s deg ord IGRF IGRF
g/h n m 2000.0 2005.0
g 1 0 -29619.4
";
        assert!(matches!(
            CoefficientTable::from_reader(text.as_bytes()),
            Err(GeomagError::MalformedCoefficientStream(_))
        ));
    }

    #[test]
    fn rows_out_of_place() {
        let text = "g 1 0 -29619.4 -29554.63\n";
        assert!(matches!(
            CoefficientTable::from_reader(text.as_bytes()),
            Err(GeomagError::MalformedCoefficientStream(_))
        ));
        let text = "c/s deg ord IGRF IGRF\ng 1 0 1.0 2.0\n";
        assert!(matches!(
            CoefficientTable::from_reader(text.as_bytes()),
            Err(GeomagError::MalformedCoefficientStream(_))
        ));
    }

    #[test]
    fn bad_degree_order() {
        let header = "c/s deg ord IGRF IGRF\ng/h n m 2000.0 2005.0\n";
        for row in ["g 14 0 1 2", "g 2 3 1 2", "h 2 0 1 2", "g x 0 1 2", "g 1"] {
            let text = format!("{header}{row}\n");
            assert!(matches!(
                CoefficientTable::from_reader(text.as_bytes()),
                Err(GeomagError::MalformedCoefficientStream(_))
            ));
        }
    }

    #[test]
    fn empty_stream() {
        assert!(matches!(
            CoefficientTable::from_reader("# nothing here\n".as_bytes()),
            Err(GeomagError::EmptyTable)
        ));
    }

    #[test]
    fn unsorted_columns() {
        let text = "\
c/s deg ord IGRF IGRF
g/h n m 2005.0 2000.0
g 1 0 1.0 2.0
";
        assert!(matches!(
            CoefficientTable::from_reader(text.as_bytes()),
            Err(GeomagError::InvalidTable(_))
        ));
    }

    #[test]
    fn bundled_igrf13() {
        let table = CoefficientTable::igrf13().unwrap();
        assert_eq!(table.len(), 26);
        assert_eq!(table.coverage(), Some((1900.0, 2025.0)));
        assert_eq!(table.get(9).unwrap().kind, ModelKind::Definitive);

        let igrf2020 = table.get(24).unwrap();
        assert_eq!(igrf2020.epoch, 2020.0);
        assert_eq!(igrf2020.kind, ModelKind::Predictive);
        assert_eq!(igrf2020.g(1, 0), -29404.8);
        assert_eq!(igrf2020.g(1, 1), -1450.9);
        assert_eq!(igrf2020.h(1, 1), 4652.5);
        assert_eq!(igrf2020.h(13, 13), -0.6);

        let sv = table.get(25).unwrap();
        assert_eq!(sv.kind, ModelKind::SecularVariation);
        assert_eq!(sv.g(1, 0), 5.7);
        assert_eq!(sv.h(1, 1), -25.9);
    }
}
