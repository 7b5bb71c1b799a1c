// SPDX-License-Identifier: AGPL-3.0-only

//! Linear autonomous system `x' = A x`.
//!
//! The tangent flow equals the flow, so the Lyapunov exponents are the real
//! parts of the eigenvalues of `A`. For a diagonal `A` with an identity
//! initial perturbation set they come out in diagonal order, which makes this
//! the exact oracle for the accumulator.

use serde::{Deserialize, Serialize};

use crate::error::{LyapunovError, Result};
use crate::tangent::TangentSystem;

/// `x' = A x` with a dense square matrix `A`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSystem {
    matrix: Vec<Vec<f64>>,
}

impl LinearSystem {
    /// Build from the rows of a square matrix.
    ///
    /// # Errors
    ///
    /// [`LyapunovError::DimensionMismatch`] if the matrix is empty or not
    /// square.
    pub fn new(matrix: Vec<Vec<f64>>) -> Result<Self> {
        let n = matrix.len();
        if n == 0 {
            return Err(LyapunovError::DimensionMismatch {
                context: "LinearSystem rows",
                expected: 1,
                found: 0,
            });
        }
        if let Some(row) = matrix.iter().find(|row| row.len() != n) {
            return Err(LyapunovError::DimensionMismatch {
                context: "LinearSystem square matrix",
                expected: n,
                found: row.len(),
            });
        }
        Ok(Self { matrix })
    }

    /// Diagonal system with the given rates.
    ///
    /// # Errors
    ///
    /// [`LyapunovError::DimensionMismatch`] if `rates` is empty.
    pub fn diagonal(rates: &[f64]) -> Result<Self> {
        let n = rates.len();
        let matrix = (0..n)
            .map(|i| {
                let mut row = vec![0.0; n];
                row[i] = rates[i];
                row
            })
            .collect();
        Self::new(matrix)
    }

    /// Rows of `A`.
    #[must_use]
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    fn apply(&self, v: &[f64], out: &mut [f64]) {
        for (o, row) in out.iter_mut().zip(&self.matrix) {
            *o = crate::vector::dot(row, v);
        }
    }
}

impl TangentSystem for LinearSystem {
    fn dim(&self) -> usize {
        self.matrix.len()
    }

    fn flow(&self, x: &[f64], out: &mut [f64]) {
        self.apply(x, out);
    }

    fn linearised(&self, _x: &[f64], dx: &[f64], out: &mut [f64]) {
        self.apply(dx, out);
    }

    fn divergence(&self, _x: &[f64]) -> f64 {
        self.matrix.iter().enumerate().map(|(i, row)| row[i]).sum()
    }
}
