// SPDX-License-Identifier: AGPL-3.0-only

//! Vector utilities and Gram-Schmidt orthogonalization.
//!
//! Two Gram-Schmidt variants are offered because they round differently when
//! the input set is close to linearly dependent:
//!
//! - **Classical**: every projection is taken against the *original* input
//!   vector, summed, and subtracted once.
//! - **Modified**: projections are subtracted one at a time from the running
//!   partial result (Parker & Chua, *Practical Numerical Algorithms for
//!   Chaotic Systems*, p. 80). Numerically preferred.
//!
//! Output vector `i` is orthogonal to outputs `0..i`, and the output set spans
//! the same subspace as the input. With `normalised = false` the orthogonal
//! but non-unit vectors are returned; their norms are the growth factors the
//! Lyapunov accumulator needs.
//!
//! A zero input vector, or one that vanishes after projection, is reported as
//! [`LyapunovError::DegenerateVector`] instead of propagating NaN.

use serde::{Deserialize, Serialize};

use crate::error::{LyapunovError, Result};
use crate::tolerances::LINEAR_DEPENDENCE_RTOL;

/// Euclidean inner product. Extra trailing elements of the longer slice are
/// ignored; callers validate shapes.
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean length of a vector.
#[must_use]
pub fn vec_abs(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}

/// Unit vector along `v`.
///
/// # Errors
///
/// [`LyapunovError::DegenerateVector`] if `v` has zero length,
/// [`LyapunovError::NonFinite`] if its length overflows.
pub fn normalise(v: &[f64]) -> Result<Vec<f64>> {
    normalise_indexed(v, 0)
}

/// Projection of `x` onto direction `u`: `u · (u·x / u·u)`.
///
/// # Errors
///
/// [`LyapunovError::DegenerateVector`] if `u` is the zero vector.
pub fn project(u: &[f64], x: &[f64]) -> Result<Vec<f64>> {
    project_indexed(u, x, 0)
}

fn project_indexed(u: &[f64], x: &[f64], index: usize) -> Result<Vec<f64>> {
    let uu = dot(u, u);
    if uu < f64::MIN_POSITIVE {
        return Err(LyapunovError::DegenerateVector { index });
    }
    let coeff = dot(u, x) / uu;
    Ok(u.iter().map(|ui| ui * coeff).collect())
}

fn normalise_indexed(v: &[f64], index: usize) -> Result<Vec<f64>> {
    let norm = vec_abs(v);
    if !norm.is_finite() {
        return Err(LyapunovError::NonFinite { step: None });
    }
    if norm < f64::MIN_POSITIVE {
        return Err(LyapunovError::DegenerateVector { index });
    }
    Ok(v.iter().map(|x| x / norm).collect())
}

/// Selects a Gram-Schmidt variant at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GramSchmidt {
    /// Project the original vector against every earlier output.
    #[default]
    Classical,
    /// Project the running partial result, one output at a time.
    Modified,
}

impl GramSchmidt {
    /// Orthogonalize (and optionally normalise) `vs` with this variant.
    ///
    /// # Errors
    ///
    /// See [`gram_schmidt`].
    pub fn apply(self, vs: &[Vec<f64>], normalised: bool) -> Result<Vec<Vec<f64>>> {
        match self {
            Self::Classical => gram_schmidt(vs, normalised),
            Self::Modified => gram_schmidt_modified(vs, normalised),
        }
    }

    /// Short label for reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Classical => "classical",
            Self::Modified => "modified",
        }
    }
}

/// Classical Gram-Schmidt orthogonalization / orthonormalization.
///
/// # Errors
///
/// - [`LyapunovError::DimensionMismatch`] for ragged input or more vectors
///   than dimensions.
/// - [`LyapunovError::DegenerateVector`] for a zero or dependent vector.
/// - [`LyapunovError::NonFinite`] if any input holds NaN or inf.
pub fn gram_schmidt(vs: &[Vec<f64>], normalised: bool) -> Result<Vec<Vec<f64>>> {
    check_vector_set(vs)?;
    let mut us: Vec<Vec<f64>> = Vec::with_capacity(vs.len());
    for (i, v) in vs.iter().enumerate() {
        let mut u = v.clone();
        for (j, w) in us.iter().enumerate() {
            let p = project_indexed(w, v, j)?;
            for (ui, pi) in u.iter_mut().zip(&p) {
                *ui -= pi;
            }
        }
        check_independent(&u, v, i)?;
        us.push(u);
    }
    finish(us, normalised)
}

/// Modified Gram-Schmidt orthogonalization / orthonormalization.
///
/// # Errors
///
/// Same conditions as [`gram_schmidt`].
pub fn gram_schmidt_modified(vs: &[Vec<f64>], normalised: bool) -> Result<Vec<Vec<f64>>> {
    check_vector_set(vs)?;
    let mut us: Vec<Vec<f64>> = Vec::with_capacity(vs.len());
    for (i, v) in vs.iter().enumerate() {
        let mut u = v.clone();
        for (j, w) in us.iter().enumerate() {
            let p = project_indexed(w, &u, j)?;
            for (ui, pi) in u.iter_mut().zip(&p) {
                *ui -= pi;
            }
        }
        check_independent(&u, v, i)?;
        us.push(u);
    }
    finish(us, normalised)
}

/// Largest `|u_i · u_j|` over distinct pairs, normalised by the two lengths.
///
/// Zero for an exactly orthogonal set; used by tests and validation binaries.
#[must_use]
pub fn orthogonality_defect(us: &[Vec<f64>]) -> f64 {
    let mut worst = 0.0f64;
    for i in 0..us.len() {
        for j in (i + 1)..us.len() {
            let scale = vec_abs(&us[i]) * vec_abs(&us[j]);
            if scale > 0.0 {
                worst = worst.max((dot(&us[i], &us[j]) / scale).abs());
            }
        }
    }
    worst
}

fn check_vector_set(vs: &[Vec<f64>]) -> Result<()> {
    let Some(first) = vs.first() else {
        return Ok(());
    };
    let d = first.len();
    if let Some(bad) = vs.iter().find(|v| v.len() != d) {
        return Err(LyapunovError::DimensionMismatch {
            context: "gram_schmidt row width",
            expected: d,
            found: bad.len(),
        });
    }
    if vs.len() > d {
        return Err(LyapunovError::DimensionMismatch {
            context: "gram_schmidt vector count (k <= d)",
            expected: d,
            found: vs.len(),
        });
    }
    if vs.iter().flatten().any(|x| !x.is_finite()) {
        return Err(LyapunovError::NonFinite { step: None });
    }
    Ok(())
}

// A residual this small relative to its input is rounding noise, not a
// direction.
fn check_independent(u: &[f64], v: &[f64], index: usize) -> Result<()> {
    let residual = vec_abs(u);
    if residual < f64::MIN_POSITIVE || residual <= LINEAR_DEPENDENCE_RTOL * vec_abs(v) {
        return Err(LyapunovError::DegenerateVector { index });
    }
    Ok(())
}

fn finish(us: Vec<Vec<f64>>, normalised: bool) -> Result<Vec<Vec<f64>>> {
    if !normalised {
        return Ok(us);
    }
    us.iter()
        .enumerate()
        .map(|(i, u)| normalise_indexed(u, i))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tolerances::EXACT_F64;

    fn skewed_basis() -> Vec<Vec<f64>> {
        vec![
            vec![0.8, 0.3, 0.1],
            vec![0.2, 0.9, 0.4],
            vec![0.5, 0.1, 0.7],
        ]
    }

    #[test]
    fn vec_abs_pythagorean() {
        assert!((vec_abs(&[3.0, 4.0]) - 5.0).abs() < EXACT_F64);
        assert!(vec_abs(&[]).abs() < EXACT_F64);
    }

    #[test]
    fn project_onto_axis() {
        let p = project(&[2.0, 0.0], &[3.0, 5.0]).unwrap();
        assert!((p[0] - 3.0).abs() < EXACT_F64);
        assert!(p[1].abs() < EXACT_F64);
    }

    #[test]
    fn project_onto_zero_is_error() {
        let err = project(&[0.0, 0.0], &[1.0, 1.0]).unwrap_err();
        assert_eq!(err, LyapunovError::DegenerateVector { index: 0 });
    }

    #[test]
    fn normalise_zero_is_error() {
        assert!(matches!(
            normalise(&[0.0; 3]),
            Err(LyapunovError::DegenerateVector { index: 0 })
        ));
    }

    #[test]
    fn classical_orthonormal() {
        let us = gram_schmidt(&skewed_basis(), true).unwrap();
        assert!(orthogonality_defect(&us) < EXACT_F64);
        for u in &us {
            assert!((vec_abs(u) - 1.0).abs() < EXACT_F64);
        }
    }

    #[test]
    fn modified_orthonormal() {
        let us = gram_schmidt_modified(&skewed_basis(), true).unwrap();
        assert!(orthogonality_defect(&us) < EXACT_F64);
        for u in &us {
            assert!((vec_abs(u) - 1.0).abs() < EXACT_F64);
        }
    }

    #[test]
    fn unnormalised_keeps_first_vector() {
        let vs = skewed_basis();
        let us = gram_schmidt(&vs, false).unwrap();
        assert_eq!(us[0], vs[0]);
        assert!(orthogonality_defect(&us) < EXACT_F64);
    }

    #[test]
    fn variants_agree_on_well_conditioned_input() {
        let a = gram_schmidt(&skewed_basis(), true).unwrap();
        let b = gram_schmidt_modified(&skewed_basis(), true).unwrap();
        for (ua, ub) in a.iter().zip(&b) {
            for (x, y) in ua.iter().zip(ub) {
                assert!((x - y).abs() < EXACT_F64);
            }
        }
    }

    #[test]
    fn fewer_vectors_than_dimensions() {
        let vs = vec![vec![1.0, 1.0, 0.0, 0.0], vec![1.0, 0.0, 1.0, 0.0]];
        let us = gram_schmidt_modified(&vs, true).unwrap();
        assert_eq!(us.len(), 2);
        assert!(orthogonality_defect(&us) < EXACT_F64);
    }

    #[test]
    fn dependent_vectors_rejected() {
        let vs = vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0], vec![0.0, 0.0, 1.0]];
        assert_eq!(
            gram_schmidt(&vs, true).unwrap_err(),
            LyapunovError::DegenerateVector { index: 1 }
        );
        assert_eq!(
            gram_schmidt_modified(&vs, false).unwrap_err(),
            LyapunovError::DegenerateVector { index: 1 }
        );
    }

    #[test]
    fn zero_vector_rejected() {
        let vs = vec![vec![0.0, 0.0], vec![1.0, 0.0]];
        assert_eq!(
            gram_schmidt(&vs, false).unwrap_err(),
            LyapunovError::DegenerateVector { index: 0 }
        );
    }

    #[test]
    fn too_many_vectors_rejected() {
        let vs = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
        assert!(matches!(
            gram_schmidt(&vs, true),
            Err(LyapunovError::DimensionMismatch { found: 3, .. })
        ));
    }

    #[test]
    fn ragged_rows_rejected() {
        let vs = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0]];
        assert!(matches!(
            gram_schmidt_modified(&vs, true),
            Err(LyapunovError::DimensionMismatch { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn nan_input_rejected() {
        let vs = vec![vec![f64::NAN, 0.0], vec![0.0, 1.0]];
        assert!(matches!(
            gram_schmidt(&vs, true),
            Err(LyapunovError::NonFinite { step: None })
        ));
    }

    #[test]
    fn empty_set_is_empty() {
        assert!(gram_schmidt(&[], true).unwrap().is_empty());
    }

    #[test]
    fn enum_dispatch_matches_functions() {
        let vs = skewed_basis();
        assert_eq!(
            GramSchmidt::Modified.apply(&vs, true).unwrap(),
            gram_schmidt_modified(&vs, true).unwrap()
        );
        assert_eq!(
            GramSchmidt::Classical.apply(&vs, false).unwrap(),
            gram_schmidt(&vs, false).unwrap()
        );
        assert_eq!(GramSchmidt::default(), GramSchmidt::Classical);
    }
}
