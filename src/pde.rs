// SPDX-License-Identifier: AGPL-3.0-only

//! Time filters for three-level (leapfrog) integration schemes.
//!
//! Leapfrog couples time levels `n − 1` and `n + 1` only, so the even and
//! odd levels drift apart (the computational mode). The Robert-Asselin (RA)
//! filter damps this by nudging level `n` towards the mean of its
//! neighbours; the RAW variant splits the nudge between `n` and `n + 1` so
//! the three-level mean is preserved for `α = 0.5`.
//!
//! # Provenance
//!
//! Robert (1966) J. Meteor. Soc. Japan 44, 237
//! Asselin (1972) Mon. Wea. Rev. 100, 487
//! Williams (2009) "A proposed modification to the Robert-Asselin time
//! filter", Mon. Wea. Rev. 137, 2538

use crate::integrators::Evolvable;

/// Default RA weighting ε.
pub const RA_EPSILON: f64 = 0.1;

/// Default RAW strength ν (equivalent to 2ε).
pub const RAW_NU: f64 = 0.2;

/// Default RAW split α (Williams 2009). `α = 1` reduces RAW to RA.
pub const RAW_ALPHA: f64 = 0.53;

/// A field at time levels `n − 1`, `n`, `n + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeLevels<T> {
    /// φ(n − 1)
    pub prev: T,
    /// φ(n)
    pub current: T,
    /// φ(n + 1)
    pub next: T,
}

impl<T: Evolvable> TimeLevels<T> {
    /// Bundle three levels.
    pub const fn new(prev: T, current: T, next: T) -> Self {
        Self {
            prev,
            current,
            next,
        }
    }

    /// Discrete curvature `φ(n−1) − 2φ(n) + φ(n+1)`.
    fn curvature(&self) -> T {
        self.prev
            .add_scaled(&self.current, -2.0)
            .add_scaled(&self.next, 1.0)
    }
}

/// Robert-Asselin filter:
/// `φ̄(n) = φ(n) + ε [φ(n+1) − 2φ(n) + φ(n−1)]`; other levels unchanged.
#[must_use]
pub fn ra_filter<T: Evolvable>(levels: &TimeLevels<T>, epsilon: f64) -> TimeLevels<T> {
    let d = levels.curvature();
    TimeLevels {
        prev: levels.prev.clone(),
        current: levels.current.add_scaled(&d, epsilon),
        next: levels.next.clone(),
    }
}

/// Robert-Asselin-Williams filter with `d = ν/2 [φ(n−1) − 2φ(n) + φ(n+1)]`:
/// `φ̄(n) = φ(n) + α d`, `φ̄(n+1) = φ(n+1) + (α − 1) d`.
#[must_use]
pub fn raw_filter<T: Evolvable>(levels: &TimeLevels<T>, nu: f64, alpha: f64) -> TimeLevels<T> {
    let d = levels.curvature().scaled(0.5 * nu);
    TimeLevels {
        prev: levels.prev.clone(),
        current: levels.current.add_scaled(&d, alpha),
        next: levels.next.add_scaled(&d, alpha - 1.0),
    }
}
