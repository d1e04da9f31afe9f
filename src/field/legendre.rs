use crate::model::snapshot::MAX_DEGREE;

/// Number of (n, m) pairs with 0 <= m <= n <= MAX_DEGREE
pub const TABLE_SIZE: usize = (MAX_DEGREE + 1) * (MAX_DEGREE + 2) / 2;

/// Position of (n, m) in the packed triangular table
#[inline]
pub fn index(n: usize, m: usize) -> usize {
    n * (n + 1) / 2 + m
}

/// Schmidt quasi-normalised associated Legendre functions P(n, m) of cos θ and their
/// derivatives with respect to the colatitude θ, up to degree 13.
#[derive(Debug, Clone)]
pub struct LegendreTable {
    p: [f64; TABLE_SIZE],
    dp: [f64; TABLE_SIZE],
}

impl LegendreTable {
    /// Runs the forward recurrence for the colatitude given by its sine and cosine
    pub fn new(sin_theta: f64, cos_theta: f64) -> LegendreTable {
        let (st, ct) = (sin_theta, cos_theta);
        let mut p = [0.0; TABLE_SIZE];
        let mut dp = [0.0; TABLE_SIZE];

        p[index(0, 0)] = 1.0;
        p[index(1, 1)] = st;
        dp[index(0, 0)] = 0.0;
        dp[index(1, 1)] = ct;

        for n in 1..=MAX_DEGREE {
            for m in 0..=n {
                let k = index(n, m);
                if n == m {
                    if n == 1 {
                        continue;
                    }
                    let prev = index(n - 1, n - 1);
                    let factor = (1.0 - 0.5 / n as f64).sqrt();
                    p[k] = factor * st * p[prev];
                    dp[k] = factor * (st * dp[prev] + ct * p[prev]);
                } else {
                    let (nf, mf) = (n as f64, m as f64);
                    let denominator = (nf * nf - mf * mf).sqrt();
                    let c1 = (2.0 * nf - 1.0) / denominator;
                    let prev = index(n - 1, m);
                    // P(n - 2, m) only exists for m <= n - 2
                    let (p2, dp2, c2) = if m + 2 <= n {
                        let prev2 = index(n - 2, m);
                        let c2 = ((nf - 1.0) * (nf - 1.0) - mf * mf).sqrt() / denominator;
                        (p[prev2], dp[prev2], c2)
                    } else {
                        (0.0, 0.0, 0.0)
                    };
                    p[k] = c1 * ct * p[prev] - c2 * p2;
                    dp[k] = c1 * (ct * dp[prev] - st * p[prev]) - c2 * dp2;
                }
            }
        }

        LegendreTable { p, dp }
    }

    /// P(n, m)
    #[inline]
    pub fn p(&self, n: usize, m: usize) -> f64 {
        self.p[index(n, m)]
    }

    /// dP(n, m) / dθ
    #[inline]
    pub fn dp(&self, n: usize, m: usize) -> f64 {
        self.dp[index(n, m)]
    }
}
