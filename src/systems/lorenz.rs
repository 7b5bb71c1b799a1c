// SPDX-License-Identifier: AGPL-3.0-only

//! The Lorenz equations.
//!
//! ```text
//! x' = σ (y − x)
//! y' = x (r − z) − y
//! z' = x y − b z
//! ```
//!
//! Jacobian:
//!
//! ```text
//! | −σ      σ    0  |
//! | r − z  −1   −x  |
//! |  y      x   −b  |
//! ```
//!
//! Its trace `−(σ + 1 + b)` is independent of the state, so the sum of the
//! Lyapunov exponents is known exactly.
//!
//! # Provenance
//!
//! Lorenz (1963) "Deterministic nonperiodic flow", J. Atmos. Sci. 20, 130

use serde::{Deserialize, Serialize};

use crate::tangent::TangentSystem;

/// Fixed Lorenz parameters; evaluating the flow is a pure method call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct LorenzParams {
    /// Prandtl number σ.
    pub sigma: f64,
    /// Reduced Rayleigh number r.
    pub r: f64,
    /// Geometric factor b.
    pub b: f64,
}

impl LorenzParams {
    /// Arbitrary parameter set.
    pub const fn new(sigma: f64, r: f64, b: f64) -> Self {
        Self { sigma, r, b }
    }

    /// The classical chaotic configuration σ = 10, r = 28, b = 8/3.
    pub const fn classic() -> Self {
        Self::new(10.0, 28.0, 8.0 / 3.0)
    }

    /// Analytic phase-space divergence `−(σ + 1 + b)`.
    #[must_use]
    pub fn divergence(&self) -> f64 {
        -(self.sigma + 1.0 + self.b)
    }

    /// Non-trivial fixed points `C± = (±√(b(r−1)), ±√(b(r−1)), r − 1)`.
    ///
    /// `None` for `r <= 1`, where the origin is the only equilibrium.
    #[must_use]
    pub fn fixed_points(&self) -> Option<[[f64; 3]; 2]> {
        if self.r <= 1.0 {
            return None;
        }
        let c = (self.b * (self.r - 1.0)).sqrt();
        Some([[c, c, self.r - 1.0], [-c, -c, self.r - 1.0]])
    }
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self::classic()
    }
}

/// Lorenz flow at `xyz` for the given parameters.
#[must_use]
pub fn lorenz(xyz: [f64; 3], params: &LorenzParams) -> [f64; 3] {
    let [x, y, z] = xyz;
    [
        params.sigma * (y - x),
        x * (params.r - z) - y,
        x * y - params.b * z,
    ]
}

impl TangentSystem for LorenzParams {
    fn dim(&self) -> usize {
        3
    }

    fn flow(&self, x: &[f64], out: &mut [f64]) {
        out.copy_from_slice(&lorenz([x[0], x[1], x[2]], self));
    }

    fn linearised(&self, x: &[f64], dx: &[f64], out: &mut [f64]) {
        let (px, py, pz) = (x[0], x[1], x[2]);
        let (dx, dy, dz) = (dx[0], dx[1], dx[2]);
        out[0] = -self.sigma * dx + self.sigma * dy;
        out[1] = (self.r - pz) * dx - dy - px * dz;
        out[2] = py * dx + px * dy - self.b * dz;
    }

    fn divergence(&self, _x: &[f64]) -> f64 {
        LorenzParams::divergence(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tangent::jacobian;
    use crate::tolerances::{EXACT_F64, JACOBIAN_FD_TOLERANCE};

    #[test]
    fn classic_divergence() {
        let p = LorenzParams::classic();
        assert!((p.divergence() + 41.0 / 3.0).abs() < EXACT_F64);
        assert_eq!(LorenzParams::default(), p);
    }

    #[test]
    fn fixed_points_are_stationary() {
        let p = LorenzParams::classic();
        for c in p.fixed_points().unwrap() {
            for v in lorenz(c, &p) {
                assert!(v.abs() < 1e-12, "flow at fixed point: {v}");
            }
        }
        assert!(LorenzParams::new(10.0, 0.5, 8.0 / 3.0).fixed_points().is_none());
    }

    #[test]
    fn origin_is_stationary() {
        assert_eq!(lorenz([0.0; 3], &LorenzParams::classic()), [0.0; 3]);
    }

    #[test]
    fn linearisation_matches_finite_difference() {
        let p = LorenzParams::classic();
        let x = [5.2, 8.5, 27.0];
        let j = jacobian(&p, &x);
        let eps = 1e-6;
        for col in 0..3 {
            let mut xp = x;
            let mut xm = x;
            xp[col] += eps;
            xm[col] -= eps;
            let fp = lorenz(xp, &p);
            let fm = lorenz(xm, &p);
            for row in 0..3 {
                let fd = (fp[row] - fm[row]) / (2.0 * eps);
                assert!(
                    (fd - j[row][col]).abs() < JACOBIAN_FD_TOLERANCE,
                    "J[{row}][{col}] = {}, finite difference {fd}",
                    j[row][col]
                );
            }
        }
    }

    #[test]
    fn analytic_divergence_matches_trace() {
        let p = LorenzParams::classic();
        let j = jacobian(&p, &[-3.0, 1.0, 12.0]);
        let trace = j[0][0] + j[1][1] + j[2][2];
        assert!((trace - TangentSystem::divergence(&p, &[-3.0, 1.0, 12.0])).abs() < EXACT_F64);
    }
}
