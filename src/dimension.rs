// SPDX-License-Identifier: AGPL-3.0-only

//! Kaplan-Yorke (Lyapunov) dimension of an exponent spectrum.
//!
//! With the exponents sorted as λ₁ ≥ λ₂ ≥ … and `k` the largest count whose
//! partial sum is still positive,
//!
//! ```text
//! D_KY = k + (λ₁ + … + λ_k) / |λ_{k+1}|
//! ```
//!
//! # Provenance
//!
//! Kaplan & Yorke (1979) "Chaotic behavior of multidimensional difference
//! equations", Lecture Notes in Mathematics 730, 204

use serde::{Deserialize, Serialize};

use crate::error::{LyapunovError, Result};

/// Result of the Kaplan-Yorke estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KaplanYorke {
    /// Length of the leading run of sorted exponents with positive partial sum.
    pub k: usize,
    /// Fractional dimension `D_KY >= 0`.
    pub dimension: f64,
}

/// Kaplan-Yorke dimension of an unordered spectrum.
///
/// The input is not modified; a descending copy is sorted internally. Ties
/// cannot change `k` because the partial-sum test only depends on the values.
///
/// # Errors
///
/// - [`LyapunovError::InvalidParameter`] for an empty spectrum.
/// - [`LyapunovError::NonFinite`] if any exponent is NaN or infinite.
/// - [`LyapunovError::DimensionDomain`] if every partial sum is positive
///   (no exponent after the prefix to divide by).
#[allow(clippy::cast_precision_loss)]
pub fn kaplan_yorke_dimension(exponents: &[f64]) -> Result<KaplanYorke> {
    if exponents.is_empty() {
        return Err(LyapunovError::InvalidParameter(
            "Kaplan-Yorke dimension of an empty spectrum".into(),
        ));
    }
    if exponents.iter().any(|e| !e.is_finite()) {
        return Err(LyapunovError::NonFinite { step: None });
    }

    let mut sorted = exponents.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut k = 0;
    let mut partial = 0.0;
    let mut cumsum = 0.0;
    for &e in &sorted {
        cumsum += e;
        if cumsum <= 0.0 {
            break;
        }
        k += 1;
        partial = cumsum;
    }

    if k == sorted.len() {
        return Err(LyapunovError::DimensionDomain {
            count: sorted.len(),
        });
    }
    if k == 0 {
        return Ok(KaplanYorke { k, dimension: 0.0 });
    }
    // cumsum_k > 0 and cumsum_{k+1} <= 0, so sorted[k] < 0 strictly.
    Ok(KaplanYorke {
        k,
        dimension: k as f64 + partial / sorted[k].abs(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tolerances::KAPLAN_YORKE_TOLERANCE;

    #[test]
    fn lorenz_like_spectrum() {
        let ky = kaplan_yorke_dimension(&[0.9, 0.0, -14.57]).unwrap();
        assert_eq!(ky.k, 2);
        assert!((ky.dimension - (2.0 + 0.9 / 14.57)).abs() < 1e-12);
        assert!((ky.dimension - 2.062).abs() < KAPLAN_YORKE_TOLERANCE);
    }

    #[test]
    fn input_order_irrelevant() {
        let a = kaplan_yorke_dimension(&[0.9, 0.0, -14.57]).unwrap();
        let b = kaplan_yorke_dimension(&[-14.57, 0.9, 0.0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn all_positive_is_domain_error() {
        assert_eq!(
            kaplan_yorke_dimension(&[5.0, 3.0, 2.0]).unwrap_err(),
            LyapunovError::DimensionDomain { count: 3 }
        );
    }

    #[test]
    fn all_non_positive_is_zero() {
        let ky = kaplan_yorke_dimension(&[-0.1, -1.0, 0.0]).unwrap();
        assert_eq!(ky.k, 0);
        assert!(ky.dimension.abs() < f64::EPSILON);
    }

    #[test]
    fn partial_sum_crossing_inside_positive_tail() {
        // Sorted: 1.0, 0.5, -1.0, -2.0 → partial sums 1.0, 1.5, 0.5, -1.5
        let ky = kaplan_yorke_dimension(&[-2.0, 0.5, -1.0, 1.0]).unwrap();
        assert_eq!(ky.k, 3);
        assert!((ky.dimension - 3.25).abs() < 1e-12);
    }

    #[test]
    fn exact_zero_partial_sum_stops_prefix() {
        // Partial sums 1.0, 0.0 → only the first term counts.
        let ky = kaplan_yorke_dimension(&[1.0, -1.0]).unwrap();
        assert_eq!(ky.k, 1);
        assert!((ky.dimension - 2.0).abs() < 1e-12);
    }

    #[test]
    fn ties_do_not_change_result() {
        let ky = kaplan_yorke_dimension(&[0.5, 0.5, -2.0, -2.0]).unwrap();
        assert_eq!(ky.k, 2);
        assert!((ky.dimension - 2.5).abs() < 1e-12);
    }

    #[test]
    fn empty_and_nan_rejected() {
        assert!(matches!(
            kaplan_yorke_dimension(&[]),
            Err(LyapunovError::InvalidParameter(_))
        ));
        assert!(matches!(
            kaplan_yorke_dimension(&[0.1, f64::NAN]),
            Err(LyapunovError::NonFinite { step: None })
        ));
    }
}
