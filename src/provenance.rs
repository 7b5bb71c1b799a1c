// SPDX-License-Identifier: AGPL-3.0-only

//! Reference values for the validation binaries and integration tests.
//!
//! Every expected number a check compares against is either a closed-form
//! consequence of the system parameters or a published long-time estimate.
//! This module keeps the value, its unit, and where it comes from together.
//!
//! ## Sources
//!
//! | Publication | Notes |
//! |-------------|-------|
//! | Lorenz (1963) J. Atmos. Sci. 20, 130 | σ = 10, r = 28, b = 8/3; double-approximation scheme |
//! | Sprott (2003) *Chaos and Time-Series Analysis*, App. A | Lorenz spectrum 0.9056, 0, −14.5723 |
//! | Kaplan & Yorke (1979) LNM 730, 204 | Lyapunov dimension definition |

use crate::systems::LorenzParams;

/// A reference value with its origin.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceValue {
    /// Human-readable label
    pub label: &'static str,
    /// Publication or derivation the value comes from
    pub source: &'static str,
    /// The reference value itself
    pub value: f64,
    /// Unit or description
    pub unit: &'static str,
}

// ═══════════════════════════════════════════════════════════════════
// Lorenz system, σ = 10, r = 28, b = 8/3
// ═══════════════════════════════════════════════════════════════════

/// Classic Lorenz parameters.
pub const LORENZ_CLASSIC: LorenzParams = LorenzParams::classic();

/// Initial phase point of the reference run (on the attractor's basin,
/// away from the fixed points).
pub const LORENZ_X0: [f64; 3] = [5.2, 8.5, 27.0];

/// Phase-space divergence `−(σ + 1 + b)`; the exponents must sum to it.
pub const LORENZ_DIVERGENCE: ReferenceValue = ReferenceValue {
    label: "Lorenz divergence −(σ+1+b)",
    source: "closed form, trace of the Jacobian",
    value: -41.0 / 3.0,
    unit: "1/time",
};

/// Largest exponent λ₁.
pub const LORENZ_LAMBDA1: ReferenceValue = ReferenceValue {
    label: "Lorenz λ₁",
    source: "Sprott (2003) App. A",
    value: 0.9056,
    unit: "1/time",
};

/// Neutral exponent along the flow, λ₂ = 0 for any bounded non-fixed-point orbit.
pub const LORENZ_LAMBDA2: ReferenceValue = ReferenceValue {
    label: "Lorenz λ₂",
    source: "flow direction is neutral (Haken 1983)",
    value: 0.0,
    unit: "1/time",
};

/// Contracting exponent λ₃.
pub const LORENZ_LAMBDA3: ReferenceValue = ReferenceValue {
    label: "Lorenz λ₃",
    source: "Sprott (2003) App. A",
    value: -14.5723,
    unit: "1/time",
};

/// Kaplan-Yorke dimension `2 + λ₁/|λ₃|`.
pub const LORENZ_KAPLAN_YORKE: ReferenceValue = ReferenceValue {
    label: "Lorenz Kaplan-Yorke dimension",
    source: "Sprott (2003) App. A",
    value: 2.0621,
    unit: "dimensionless",
};

/// The three published exponents, descending.
#[must_use]
pub const fn lorenz_spectrum() -> [ReferenceValue; 3] {
    [LORENZ_LAMBDA1, LORENZ_LAMBDA2, LORENZ_LAMBDA3]
}

// ═══════════════════════════════════════════════════════════════════
// Kaplan-Yorke worked example
// ═══════════════════════════════════════════════════════════════════

/// Rounded Lorenz-like spectrum used as the worked Kaplan-Yorke example.
pub const KY_EXAMPLE_SPECTRUM: [f64; 3] = [0.9, 0.0, -14.57];

/// `2 + 0.9 / 14.57`.
pub const KY_EXAMPLE_DIMENSION: ReferenceValue = ReferenceValue {
    label: "Kaplan-Yorke of [0.9, 0, −14.57]",
    source: "closed form",
    value: 2.0 + 0.9 / 14.57,
    unit: "dimensionless",
};
