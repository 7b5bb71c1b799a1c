// SPDX-License-Identifier: AGPL-3.0-only

//! Centralized numerical tolerances with justification.
//!
//! Every threshold used by the library, its tests, and the validation
//! binaries is defined here. No ad-hoc magic numbers.
//!
//! | Category | Basis | Example |
//! |----------|-------|---------|
//! | Machine precision | IEEE 754 f64 | 1e-10 for exact arithmetic |
//! | Integration | RK4 truncation at the reference step | 0.05 on the exponent sum |
//! | Literature | Published Lorenz spectrum | ±0.1 on λ₁ |

// ═══════════════════════════════════════════════════════════════════
// Machine-precision tolerances (IEEE 754 f64)
// ═══════════════════════════════════════════════════════════════════

/// Tolerance for operations that should be exact in f64 arithmetic.
///
/// f64 has ~15.9 significant digits; 1e-10 allows 5 digits of accumulated
/// rounding in short compositions (projection, normalization, dot products).
pub const EXACT_F64: f64 = 1e-10;

/// Relative residual below which a Gram-Schmidt vector is declared dependent.
///
/// Subtracting the projections of an exactly dependent vector leaves a
/// residual of a few ulps times its length (~1e-16). 1e-13 keeps three orders
/// of margin above that noise while still accepting vectors that are merely
/// ill-conditioned.
pub const LINEAR_DEPENDENCE_RTOL: f64 = 1e-13;

// ═══════════════════════════════════════════════════════════════════
// Integrator tolerances
// ═══════════════════════════════════════════════════════════════════

/// RK4 one-unit-time integration of `x' = -x` at h = 0.01.
///
/// Local error per step is h⁵/120 ≈ 8e-13; over 100 steps the global error
/// is a few 1e-11. 1e-9 leaves two orders of margin.
pub const RK4_DECAY_TOLERANCE: f64 = 1e-9;

/// Observed convergence order must be within this distance of the nominal one.
///
/// Order estimated from log2 of the error ratio between h and h/2; the
/// asymptotic regime is reached to within ~0.1 for the step sizes tested.
pub const CONVERGENCE_ORDER_TOLERANCE: f64 = 0.2;

/// Analytic Jacobian vs central difference of the flow with ε = 1e-6.
///
/// Lorenz is quadratic, so the central difference has no truncation error;
/// what remains is cancellation, ~1e-16 · |f| / ε ≈ 1e-9 for |f| ~ 30.
pub const JACOBIAN_FD_TOLERANCE: f64 = 1e-6;

// ═══════════════════════════════════════════════════════════════════
// Lyapunov spectrum tolerances
// ═══════════════════════════════════════════════════════════════════

/// Sum of the Lorenz spectrum vs the phase-space divergence −(σ + 1 + b).
///
/// The sum of exponents equals the time-averaged trace of the Jacobian, which
/// is constant for Lorenz. At h = 0.001, T = 100 the residual is dominated by
/// the transient of the first few time units and stays well under 0.05.
pub const LORENZ_DIVERGENCE_TOLERANCE: f64 = 0.05;

/// Deviation of the flow-direction (neutral) Lorenz exponent from zero.
///
/// Finite-time estimate of a zero exponent decays as O(1/T); at T = 100 it
/// is typically of order 1e-2. 0.1 classifies it unambiguously against the
/// positive (~0.9) and negative (~−14.6) exponents.
pub const LORENZ_NEUTRAL_TOLERANCE: f64 = 0.1;

/// Largest Lorenz exponent vs the literature value 0.9056.
///
/// Finite-time, single-trajectory estimates at T = 100 scatter by a few
/// percent around the asymptotic value (Sprott 2003, Table A.1).
pub const LORENZ_LAMBDA1_TOLERANCE: f64 = 0.1;

/// Linear diagonal system: exponents equal the diagonal entries.
///
/// The tangent flow is exactly exp(A t) and stays axis-aligned, so the only
/// error is RK4 truncation of exp(λ h) per step, O(h⁴ λ⁵ / 120).
pub const LINEAR_SPECTRUM_TOLERANCE: f64 = 1e-6;

/// Classical-twice vs single modified pass on the Lorenz spectrum.
///
/// The base trajectory does not depend on the perturbations, so both variants
/// follow the identical orbit. With re-orthonormalization every step the
/// perturbations are never far from orthogonal and the variants differ only
/// by rounding. The re-orthonormalized frame is attracted to the same
/// Lyapunov vectors from any nearby start, so rounding differences do not
/// accumulate.
pub const VARIANT_AGREEMENT_TOLERANCE: f64 = 0.02;

// ═══════════════════════════════════════════════════════════════════
// Kaplan-Yorke and finite-difference tolerances
// ═══════════════════════════════════════════════════════════════════

/// Kaplan-Yorke dimension recomputed from literal exponents: exact arithmetic.
pub const KAPLAN_YORKE_TOLERANCE: f64 = 1e-3;

/// Kaplan-Yorke dimension of a computed Lorenz spectrum vs 2.0621.
///
/// D_KY = 2 + λ₁/|λ₃|; the λ₁ tolerance of 0.1 propagates to 0.1/14.57 ≈ 7e-3.
pub const LORENZ_KAPLAN_YORKE_TOLERANCE: f64 = 1e-2;

/// Central differences of sin(2πx) on 100 points (dx = 0.01).
///
/// Truncation error is (2π)³ dx²/6 ≈ 4e-3 for the first derivative and
/// (2π)⁴ dx²/12 ≈ 1.3e-2 for the second. Errors are compared after dividing
/// by the derivative amplitudes 2π and 4π², giving ~6e-4 and ~3e-4.
pub const CENTRAL_DIFFERENCE_TOLERANCE: f64 = 1e-2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_ordering() {
        assert!(EXACT_F64 > LINEAR_DEPENDENCE_RTOL);
        assert!(RK4_DECAY_TOLERANCE < EXACT_F64 * 100.0);
        assert!(LINEAR_SPECTRUM_TOLERANCE < LORENZ_DIVERGENCE_TOLERANCE);
        assert!(LORENZ_DIVERGENCE_TOLERANCE < LORENZ_NEUTRAL_TOLERANCE);
        assert!(KAPLAN_YORKE_TOLERANCE < LORENZ_KAPLAN_YORKE_TOLERANCE);
    }
}
