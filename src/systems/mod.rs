// SPDX-License-Identifier: AGPL-3.0-only

//! Reference dynamical systems with hand-written linearizations.
//!
//! - [`lorenz`] — Lorenz (1963) convection model, the classical chaotic
//!   benchmark with a known spectrum and constant divergence.
//! - [`linear`] — `x' = A x`, whose exponents are known in closed form;
//!   used as an exact oracle for the accumulator.

pub mod linear;
pub mod lorenz;

pub use linear::LinearSystem;
pub use lorenz::{lorenz, LorenzParams};
