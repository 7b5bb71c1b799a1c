// SPDX-License-Identifier: AGPL-3.0-only

//! Finite-difference derivatives on a periodic 1D grid.
//!
//! A stencil is a tridiagonal matrix with periodic corners: row `i` combines
//! the values at `i - 1`, `i`, `i + 1` (indices wrapping). Dotting it with a
//! vector of samples applies the stencil at every point, e.g. a neighbour
//! average with `make_stencil(n, 0.0, 0.5, 0.5)`.

use crate::error::{LyapunovError, Result};
use crate::matrix::{mat_vec, scale_in_place, tridiag};

/// Periodic tridiagonal stencil of size `n`.
///
/// `i`, `i_next`, `i_prev` multiply the values at positions `i`, `i + 1`
/// and `i - 1` respectively.
///
/// # Errors
///
/// [`LyapunovError::InvalidParameter`] for `n < 3`, where the wrapped
/// neighbours would overlap the diagonal.
pub fn make_stencil(n: usize, i: f64, i_next: f64, i_prev: f64) -> Result<Vec<Vec<f64>>> {
    if n < 3 {
        return Err(LyapunovError::InvalidParameter(format!(
            "periodic stencil needs at least 3 points, got {n}"
        )));
    }
    let mut m = tridiag(n, i, i_next, i_prev);
    m[n - 1][0] = i_next;
    m[0][n - 1] = i_prev;
    Ok(m)
}

/// A linear derivative operator on periodic samples with fixed spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralDifference {
    stencil: Vec<Vec<f64>>,
}

impl CentralDifference {
    /// Number of grid points the operator expects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stencil.len()
    }

    /// Whether the operator is empty (never, by construction).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stencil.is_empty()
    }

    /// Apply the operator to samples `phi`.
    ///
    /// # Errors
    ///
    /// [`LyapunovError::DimensionMismatch`] if `phi.len() != self.len()`.
    pub fn apply(&self, phi: &[f64]) -> Result<Vec<f64>> {
        mat_vec(&self.stencil, phi)
    }
}

fn check_spacing(dx: f64) -> Result<()> {
    if dx.is_finite() && dx > 0.0 {
        Ok(())
    } else {
        Err(LyapunovError::InvalidParameter(format!(
            "grid spacing must be finite and > 0, got {dx}"
        )))
    }
}

/// First derivative, second-order central difference:
/// `(φ[i+1] − φ[i−1]) / 2dx`.
///
/// # Errors
///
/// [`LyapunovError::InvalidParameter`] for `n < 3` or a non-positive `dx`.
pub fn make_central_difference1(n: usize, dx: f64) -> Result<CentralDifference> {
    check_spacing(dx)?;
    let mut stencil = make_stencil(n, 0.0, 1.0, -1.0)?;
    scale_in_place(&mut stencil, 1.0 / (2.0 * dx));
    Ok(CentralDifference { stencil })
}

/// Second derivative, second-order central difference:
/// `(φ[i+1] − 2φ[i] + φ[i−1]) / dx²`.
///
/// # Errors
///
/// [`LyapunovError::InvalidParameter`] for `n < 3` or a non-positive `dx`.
pub fn make_central_difference2(n: usize, dx: f64) -> Result<CentralDifference> {
    check_spacing(dx)?;
    let mut stencil = make_stencil(n, -2.0, 1.0, 1.0)?;
    scale_in_place(&mut stencil, 1.0 / (dx * dx));
    Ok(CentralDifference { stencil })
}
