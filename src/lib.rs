// SPDX-License-Identifier: AGPL-3.0-only

//! hotSpring Lyapunov — exponent spectra of continuous-time dynamical systems
//!
//! Integrates a nonlinear system together with its tangent (linearised)
//! system, re-orthonormalizes the perturbation vectors by Gram-Schmidt, and
//! accumulates their logarithmic growth into the Lyapunov spectrum and the
//! Kaplan-Yorke dimension.
//!
//! ## Core
//!   - `vector` — dot products, norms, classical and modified Gram-Schmidt
//!   - `integrators` — fixed-step RK4, forward Euler, Lorenz double approximation
//!   - `tangent` — `TangentSystem` trait and the augmented (phase + tangent) state
//!   - `lyapunov` — exponent accumulator (`LyapunovRun`, `lyapunov_exponents`)
//!   - `dimension` — Kaplan-Yorke dimension
//!   - `systems` — Lorenz equations and linear test systems
//!
//! ## Numerical collaborators
//!   - `matrix` — dense tridiagonal construction
//!   - `derive` — periodic finite-difference stencils
//!   - `pde` — Robert-Asselin and Robert-Asselin-Williams time filters
//!   - `util`, `profiling` — memoization, wall-clock formatting and timing
//!
//! ## Validation infrastructure
//!   - `tolerances` — every pass/fail threshold with its justification
//!   - `provenance` — reference values and their sources
//!   - `validation` — `ValidationHarness` pass/fail accounting, exit codes
//!   - `report` — `--key=value` overrides and JSON summaries
//!
//! ## Validation binaries
//!   - `validate_lyapunov` — Lorenz spectrum, divergence oracle, Kaplan-Yorke,
//!     determinism, classical vs modified Gram-Schmidt
//!   - `validate_numerics` — orthogonalizers, integrator orders, stencils, filters

pub mod derive;
pub mod dimension;
pub mod error;
pub mod integrators;
pub mod lyapunov;
pub mod matrix;
pub mod pde;
pub mod profiling;
pub mod provenance;
pub mod report;
pub mod systems;
pub mod tangent;
pub mod tolerances;
pub mod util;
pub mod validation;
pub mod vector;

pub use dimension::{kaplan_yorke_dimension, KaplanYorke};
pub use error::{LyapunovError, Result};
pub use integrators::{rk4, Evolvable, Integrator};
pub use lyapunov::{
    identity_basis, lyapunov_exponents, LyapunovConfig, LyapunovRun, LyapunovSpectrum,
};
pub use systems::{LinearSystem, LorenzParams};
pub use tangent::{augment_position, augmented_derivative, unaugment_position, TangentSystem};
pub use vector::{gram_schmidt, gram_schmidt_modified, GramSchmidt};
