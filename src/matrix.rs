// SPDX-License-Identifier: AGPL-3.0-only

//! Small dense matrix helpers (row-major `Vec<Vec<f64>>`).

use crate::error::{LyapunovError, Result};
use crate::vector::dot;

/// `n`×`n` tridiagonal matrix with `d` on the diagonal, `u` on the first
/// upper diagonal and `l` on the first lower diagonal.
#[must_use]
pub fn tridiag(n: usize, d: f64, u: f64, l: f64) -> Vec<Vec<f64>> {
    let mut m = vec![vec![0.0; n]; n];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = d;
        if i + 1 < n {
            row[i + 1] = u;
        }
        if i > 0 {
            row[i - 1] = l;
        }
    }
    m
}

/// Matrix-vector product `M · v`.
///
/// # Errors
///
/// [`LyapunovError::DimensionMismatch`] if a row of `m` differs in length
/// from `v`.
pub fn mat_vec(m: &[Vec<f64>], v: &[f64]) -> Result<Vec<f64>> {
    m.iter()
        .map(|row| {
            if row.len() == v.len() {
                Ok(dot(row, v))
            } else {
                Err(LyapunovError::DimensionMismatch {
                    context: "mat_vec row width",
                    expected: v.len(),
                    found: row.len(),
                })
            }
        })
        .collect()
}

/// Multiply every entry by `factor`.
pub fn scale_in_place(m: &mut [Vec<f64>], factor: f64) {
    m.iter_mut().flatten().for_each(|x| *x *= factor);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn tridiag_layout() {
        let m = tridiag(4, -2.0, 1.0, 3.0);
        assert_eq!(m[0], vec![-2.0, 1.0, 0.0, 0.0]);
        assert_eq!(m[1], vec![3.0, -2.0, 1.0, 0.0]);
        assert_eq!(m[3], vec![0.0, 0.0, 3.0, -2.0]);
    }

    #[test]
    fn tridiag_degenerate_sizes() {
        assert!(tridiag(0, 1.0, 1.0, 1.0).is_empty());
        assert_eq!(tridiag(1, 5.0, 1.0, 1.0), vec![vec![5.0]]);
    }

    #[test]
    fn mat_vec_identity_and_mismatch() {
        let id = tridiag(3, 1.0, 0.0, 0.0);
        assert_eq!(mat_vec(&id, &[1.0, 2.0, 3.0]).unwrap(), vec![1.0, 2.0, 3.0]);
        assert!(mat_vec(&id, &[1.0, 2.0]).is_err());
    }

    #[test]
    fn scale_entries() {
        let mut m = tridiag(2, 2.0, 1.0, 1.0);
        scale_in_place(&mut m, 0.5);
        assert_eq!(m, vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
    }
}
