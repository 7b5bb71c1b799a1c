// SPDX-License-Identifier: AGPL-3.0-only

//! Tangent-space coupling: phase point + perturbation vectors as one state.
//!
//! The Lyapunov accumulator integrates the nonlinear flow and its
//! linearization together. [`AugmentedState`] packs the phase point `x`
//! (length `d`) and `k` perturbation vectors into a row-major (k+1)×d block:
//! row 0 is `x`, rows 1..=k are the perturbations. The block implements
//! [`Evolvable`], so any integrator in [`crate::integrators`] advances it
//! without knowing its shape.
//!
//! A dynamical system plugs in through [`TangentSystem`]: the flow `f(x)` and
//! the Jacobian-vector product `J(x)·δx`. [`augmented_derivative`] combines
//! the two into the derivative of the whole block.

use crate::error::{LyapunovError, Result};
use crate::integrators::Evolvable;

/// A continuous-time system together with its linearization.
///
/// Implementations write into caller-provided buffers of length
/// [`dim`](Self::dim); the accumulator calls these four times per RK4 step
/// for every row of the augmented block.
pub trait TangentSystem {
    /// Phase-space dimension `d`.
    fn dim(&self) -> usize;

    /// Nonlinear flow: `out = f(x)`.
    fn flow(&self, x: &[f64], out: &mut [f64]);

    /// Linearized flow at `x` applied to a perturbation: `out = J(x) · dx`.
    fn linearised(&self, x: &[f64], dx: &[f64], out: &mut [f64]);

    /// Phase-space divergence `tr J(x)`.
    ///
    /// The default assembles the trace from `d` Jacobian-vector products;
    /// systems with a closed form should override it.
    fn divergence(&self, x: &[f64]) -> f64 {
        let d = self.dim();
        let mut e = vec![0.0; d];
        let mut col = vec![0.0; d];
        let mut trace = 0.0;
        for i in 0..d {
            e[i] = 1.0;
            self.linearised(x, &e, &mut col);
            trace += col[i];
            e[i] = 0.0;
        }
        trace
    }
}

impl<T: TangentSystem + ?Sized> TangentSystem for &T {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn flow(&self, x: &[f64], out: &mut [f64]) {
        (**self).flow(x, out);
    }

    fn linearised(&self, x: &[f64], dx: &[f64], out: &mut [f64]) {
        (**self).linearised(x, dx, out);
    }

    fn divergence(&self, x: &[f64]) -> f64 {
        (**self).divergence(x)
    }
}

/// Dense Jacobian `J(x)` as rows, assembled column by column from
/// Jacobian-vector products.
#[must_use]
pub fn jacobian<S: TangentSystem + ?Sized>(system: &S, x: &[f64]) -> Vec<Vec<f64>> {
    let d = system.dim();
    let mut rows = vec![vec![0.0; d]; d];
    let mut e = vec![0.0; d];
    let mut col = vec![0.0; d];
    for j in 0..d {
        e[j] = 1.0;
        system.linearised(x, &e, &mut col);
        for (row, &c) in rows.iter_mut().zip(&col) {
            row[j] = c;
        }
        e[j] = 0.0;
    }
    rows
}

/// Phase point plus `k` perturbation vectors, stored as a (k+1)×d block.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedState {
    dim: usize,
    data: Vec<f64>,
}

impl AugmentedState {
    /// Phase-space dimension `d` (row width).
    #[must_use]
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Number of perturbation vectors `k`.
    #[must_use]
    pub fn n_perturbations(&self) -> usize {
        self.data.len() / self.dim.max(1) - 1
    }

    /// Row 0: the phase-space point.
    #[must_use]
    pub fn position(&self) -> &[f64] {
        &self.data[..self.dim]
    }

    /// Perturbation vector `i` (row `i + 1`).
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.n_perturbations()`.
    #[must_use]
    pub fn perturbation(&self, i: usize) -> &[f64] {
        let start = (i + 1) * self.dim;
        &self.data[start..start + self.dim]
    }

    /// Iterator over the perturbation rows.
    pub fn perturbations(&self) -> impl Iterator<Item = &[f64]> {
        self.data[self.dim..].chunks_exact(self.dim.max(1))
    }

    /// Whether every entry is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    fn zeros_like(&self) -> Self {
        Self {
            dim: self.dim,
            data: vec![0.0; self.data.len()],
        }
    }
}

impl Evolvable for AugmentedState {
    fn add_scaled(&self, other: &Self, scale: f64) -> Self {
        debug_assert_eq!(self.data.len(), other.data.len());
        Self {
            dim: self.dim,
            data: self.data.add_scaled(&other.data, scale),
        }
    }

    fn scaled(&self, scale: f64) -> Self {
        Self {
            dim: self.dim,
            data: self.data.scaled(scale),
        }
    }
}

/// Combine a phase point and a perturbation set into one augmented block.
///
/// # Errors
///
/// [`LyapunovError::DimensionMismatch`] if `x` is empty or any perturbation
/// row differs in length from `x`.
pub fn augment_position(x: &[f64], u: &[Vec<f64>]) -> Result<AugmentedState> {
    let dim = x.len();
    if dim == 0 {
        return Err(LyapunovError::DimensionMismatch {
            context: "augment_position phase point",
            expected: 1,
            found: 0,
        });
    }
    let mut data = Vec::with_capacity(dim * (u.len() + 1));
    data.extend_from_slice(x);
    for row in u {
        if row.len() != dim {
            return Err(LyapunovError::DimensionMismatch {
                context: "augment_position perturbation row",
                expected: dim,
                found: row.len(),
            });
        }
        data.extend_from_slice(row);
    }
    Ok(AugmentedState { dim, data })
}

/// Split an augmented block back into `(x, u)`.
#[must_use]
pub fn unaugment_position(xu: &AugmentedState) -> (Vec<f64>, Vec<Vec<f64>>) {
    let x = xu.position().to_vec();
    let u = xu.perturbations().map(<[f64]>::to_vec).collect();
    (x, u)
}

/// Derivative of the augmented block: row 0 gets `f(x)`, every perturbation
/// row gets `J(x) · u_i`, all evaluated at the same phase point.
#[must_use]
pub fn augmented_derivative<S: TangentSystem + ?Sized>(
    system: &S,
    xu: &AugmentedState,
) -> AugmentedState {
    let d = xu.dim;
    let mut out = xu.zeros_like();
    let x = xu.position();
    let (head, tail) = out.data.split_at_mut(d);
    system.flow(x, head);
    for (du, row) in xu.perturbations().zip(tail.chunks_exact_mut(d)) {
        system.linearised(x, du, row);
    }
    out
}
