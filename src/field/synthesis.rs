use crate::field::legendre::LegendreTable;
use crate::field::position::Geocentric;
use crate::model::snapshot::{Snapshot, MAX_DEGREE};
use crate::utils::constants::RADIUS_EARTH;
use nalgebra::Vector3;

/// Field components in the geocentric spherical frame, in nT
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeocentricField {
    /// Br, positive outwards
    pub radial: f64,
    /// Bθ, positive towards increasing colatitude (southwards)
    pub polar: f64,
    /// Bφ, positive eastwards
    pub azimuthal: f64,
}

/// Sums the spherical-harmonic expansion of `model` at `position`.
///
/// At the poles, where sin θ vanishes, the azimuthal term uses the limit
/// m·P(n, m) / sin θ → cos θ·dP(n, m).
pub fn synthesize(model: &Snapshot, position: &Geocentric) -> GeocentricField {
    let (st, ct) = (position.sin_theta, position.cos_theta);
    let at_pole = st.abs() <= f64::EPSILON;

    let mut cos_m = [1.0; MAX_DEGREE + 1];
    let mut sin_m = [0.0; MAX_DEGREE + 1];
    for m in 1..=MAX_DEGREE {
        let angle = m as f64 * position.longitude;
        cos_m[m] = angle.cos();
        sin_m[m] = angle.sin();
    }

    let legendre = LegendreTable::new(st, ct);
    let scale = RADIUS_EARTH / position.radius;
    let mut ratio = scale * scale;

    let mut field = GeocentricField {
        radial: 0.0,
        polar: 0.0,
        azimuthal: 0.0,
    };
    for n in 1..=MAX_DEGREE {
        ratio *= scale;
        for m in 0..=n {
            let (g, h) = (model.g(n, m), model.h(n, m));
            let p = legendre.p(n, m);
            let dp = legendre.dp(n, m);

            let along = g * cos_m[m] + h * sin_m[m];
            field.radial += (n + 1) as f64 * ratio * along * p;
            field.polar -= ratio * along * dp;

            if m > 0 {
                let across = h * cos_m[m] - g * sin_m[m];
                if at_pole {
                    field.azimuthal -= ct * ratio * across * dp;
                } else {
                    field.azimuthal -= m as f64 / st * ratio * across * p;
                }
            }
        }
    }
    field
}

/// Rotates geocentric components into the local north, east, down frame.
/// The rotation is the identity for geocentric positions.
pub fn rotate(field: &GeocentricField, position: &Geocentric) -> Vector3<f64> {
    let (cd, sd) = (position.cos_delta, position.sin_delta);
    Vector3::new(
        -field.polar * cd - field.radial * sd,
        field.azimuthal,
        field.polar * sd - field.radial * cd,
    )
}
