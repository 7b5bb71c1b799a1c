// SPDX-License-Identifier: AGPL-3.0-only

//! Lyapunov spectrum by continuous Gram-Schmidt re-orthonormalization.
//!
//! The phase point and `k` perturbation vectors are advanced together as one
//! [`AugmentedState`]. After each step (or every `reorthonormalize_every`
//! steps) the perturbations are orthogonalized without normalization, which
//! separates the growth of each direction (the norms `‖v_i‖`) from its
//! orientation, then normalized to start the next interval. The exponents are
//!
//! ```text
//! λ_i = (1/T) Σ_steps ln ‖v_i‖
//! ```
//!
//! reported in the order of the initial perturbation directions.
//!
//! Each step depends on the previous one, so a single run is strictly
//! sequential. [`LyapunovRun`] exposes the stepping so callers can poll
//! progress or stop between steps; [`lyapunov_exponents`] runs to completion.
//!
//! # Provenance
//!
//! Benettin, Galgani, Giorgilli, Strelcyn (1980) Meccanica 15, 9
//! Wolf, Swift, Swinney, Vastano (1985) Physica D 16, 285
//! Parker & Chua (1989) *Practical Numerical Algorithms for Chaotic Systems* §4

use serde::{Deserialize, Serialize};

use crate::dimension::{kaplan_yorke_dimension, KaplanYorke};
use crate::error::{LyapunovError, Result};
use crate::integrators::Integrator;
use crate::tangent::{
    augment_position, augmented_derivative, unaugment_position, AugmentedState, TangentSystem,
};
use crate::vector::{vec_abs, GramSchmidt};

/// Parameters of a single exponent computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct LyapunovConfig {
    /// Total integration time `T`.
    pub total_time: f64,
    /// Fixed step `h`, `0 < h ≪ T`.
    pub step: f64,
    /// Re-orthonormalize every this many steps (and always on the last one).
    /// `1` reproduces the reference algorithm; larger values are cheaper and
    /// change the finite-time estimate slightly.
    pub reorthonormalize_every: usize,
    /// Gram-Schmidt variant used for both orthogonalization passes.
    pub orthogonalizer: GramSchmidt,
    /// Fixed-step method advancing the augmented state.
    pub integrator: Integrator,
}

impl LyapunovConfig {
    /// RK4, classical Gram-Schmidt, re-orthonormalization every step.
    pub const fn new(total_time: f64, step: f64) -> Self {
        Self {
            total_time,
            step,
            reorthonormalize_every: 1,
            orthogonalizer: GramSchmidt::Classical,
            integrator: Integrator::Rk4,
        }
    }

    /// T = 100, h = 0.001: the resolution at which the Lorenz spectrum sum
    /// matches the divergence to within 0.05.
    pub const fn reference() -> Self {
        Self::new(100.0, 0.001)
    }

    /// Set the re-orthonormalization interval.
    pub const fn with_reorthonormalize_every(mut self, steps: usize) -> Self {
        self.reorthonormalize_every = steps;
        self
    }

    /// Set the Gram-Schmidt variant.
    pub const fn with_orthogonalizer(mut self, orthogonalizer: GramSchmidt) -> Self {
        self.orthogonalizer = orthogonalizer;
        self
    }

    /// Set the integrator.
    pub const fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    /// Reject parameters a run cannot start with.
    ///
    /// # Errors
    ///
    /// [`LyapunovError::InvalidParameter`] for non-finite or non-positive
    /// `T` or `h`, `h > T`, or a zero re-orthonormalization interval.
    pub fn validate(&self) -> Result<()> {
        if !(self.total_time.is_finite() && self.total_time > 0.0) {
            return Err(LyapunovError::InvalidParameter(format!(
                "total_time must be finite and > 0, got {}",
                self.total_time
            )));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(LyapunovError::InvalidParameter(format!(
                "step must be finite and > 0, got {}",
                self.step
            )));
        }
        if self.step > self.total_time {
            return Err(LyapunovError::InvalidParameter(format!(
                "step {} exceeds total_time {}",
                self.step, self.total_time
            )));
        }
        if self.reorthonormalize_every == 0 {
            return Err(LyapunovError::InvalidParameter(
                "reorthonormalize_every must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Number of steps `N = floor(T / h)`.
    ///
    /// A ratio within rounding of an integer counts as that integer, so
    /// `T = 100, h = 0.001` gives exactly 100 000 steps.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn n_steps(&self) -> usize {
        let ratio = self.total_time / self.step;
        let nearest = ratio.round();
        let n = if (ratio - nearest).abs() <= 1e-9 * nearest.max(1.0) {
            nearest
        } else {
            ratio.floor()
        };
        n.max(0.0) as usize
    }
}

impl Default for LyapunovConfig {
    fn default() -> Self {
        Self::reference()
    }
}

/// Exponent spectrum produced by a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyapunovSpectrum {
    /// Exponents in the order of the initial perturbation directions.
    pub exponents: Vec<f64>,
    /// Configuration the spectrum was computed with.
    pub config: LyapunovConfig,
    /// Steps actually taken.
    pub steps: usize,
    /// Phase point at the end of the run.
    pub final_position: Vec<f64>,
}

impl LyapunovSpectrum {
    /// Number of exponents `k`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    /// Whether the spectrum is empty (never true for a completed run).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Sum of the exponents; for a full spectrum this approximates the
    /// time-averaged phase-space divergence.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.exponents.iter().sum()
    }

    /// Largest exponent.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.exponents
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Copy of the exponents sorted from largest to smallest.
    #[must_use]
    pub fn sorted_descending(&self) -> Vec<f64> {
        let mut sorted = self.exponents.clone();
        sorted.sort_by(|a, b| b.total_cmp(a));
        sorted
    }

    /// Kaplan-Yorke dimension of this spectrum.
    ///
    /// # Errors
    ///
    /// See [`kaplan_yorke_dimension`].
    pub fn kaplan_yorke(&self) -> Result<KaplanYorke> {
        kaplan_yorke_dimension(&self.exponents)
    }
}

/// An exponent computation in progress.
///
/// Owns its augmented state and accumulator exclusively; independent runs
/// share nothing.
#[derive(Debug, Clone)]
pub struct LyapunovRun<S: TangentSystem> {
    system: S,
    config: LyapunovConfig,
    state: AugmentedState,
    sums: Vec<f64>,
    steps_taken: usize,
    steps_total: usize,
    since_reorth: usize,
}

impl<S: TangentSystem> LyapunovRun<S> {
    /// Validate inputs and set up the augmented state.
    ///
    /// # Errors
    ///
    /// - [`LyapunovError::InvalidParameter`]: bad `config` or empty `u0`.
    /// - [`LyapunovError::DimensionMismatch`]: `x0` vs `system.dim()`,
    ///   ragged `u0`, or `k > d`.
    /// - [`LyapunovError::DegenerateVector`]: `u0` is not linearly
    ///   independent.
    /// - [`LyapunovError::NonFinite`]: NaN or inf in `x0` or `u0`.
    pub fn new(system: S, x0: &[f64], u0: &[Vec<f64>], config: LyapunovConfig) -> Result<Self> {
        config.validate()?;
        let d = system.dim();
        if x0.len() != d {
            return Err(LyapunovError::DimensionMismatch {
                context: "initial point vs system dimension",
                expected: d,
                found: x0.len(),
            });
        }
        if u0.is_empty() {
            return Err(LyapunovError::InvalidParameter(
                "at least one perturbation vector is required".into(),
            ));
        }
        let state = augment_position(x0, u0)?;
        if u0.len() > d {
            return Err(LyapunovError::DimensionMismatch {
                context: "perturbation count (k <= d)",
                expected: d,
                found: u0.len(),
            });
        }
        if !state.is_finite() {
            return Err(LyapunovError::NonFinite { step: None });
        }
        config.orthogonalizer.apply(u0, false)?;

        Ok(Self {
            system,
            sums: vec![0.0; u0.len()],
            steps_total: config.n_steps(),
            config,
            state,
            steps_taken: 0,
            since_reorth: 0,
        })
    }

    /// Advance one step. Returns `Ok(false)` once all steps are taken.
    ///
    /// # Errors
    ///
    /// - [`LyapunovError::NonFinite`] if the state overflows.
    /// - [`LyapunovError::NumericalCollapse`] if a perturbation direction
    ///   loses all magnitude.
    pub fn step(&mut self) -> Result<bool> {
        if self.is_finished() {
            return Ok(false);
        }
        let index = self.steps_taken;
        let system = &self.system;
        let next = self
            .config
            .integrator
            .step(&self.state, self.config.step, |s: &AugmentedState| {
                augmented_derivative(system, s)
            });
        if !next.is_finite() {
            return Err(LyapunovError::NonFinite { step: Some(index) });
        }

        self.steps_taken += 1;
        self.since_reorth += 1;
        if self.since_reorth >= self.config.reorthonormalize_every || self.is_finished() {
            self.state = self.reorthonormalize(&next, index)?;
            self.since_reorth = 0;
        } else {
            self.state = next;
        }
        Ok(true)
    }

    /// Take up to `n` steps; returns how many were taken.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`step`](Self::step).
    pub fn advance(&mut self, n: usize) -> Result<usize> {
        let mut taken = 0;
        while taken < n && self.step()? {
            taken += 1;
        }
        Ok(taken)
    }

    /// Run the remaining steps and produce the spectrum.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`step`](Self::step).
    pub fn run(mut self) -> Result<LyapunovSpectrum> {
        while self.step()? {}
        self.finish()
    }

    /// Produce the spectrum of a completed run.
    ///
    /// # Errors
    ///
    /// [`LyapunovError::InvalidParameter`] if steps remain.
    pub fn finish(self) -> Result<LyapunovSpectrum> {
        if !self.is_finished() {
            return Err(LyapunovError::InvalidParameter(format!(
                "run stopped after {} of {} steps",
                self.steps_taken, self.steps_total
            )));
        }
        let t = self.config.total_time;
        Ok(LyapunovSpectrum {
            exponents: self.sums.iter().map(|s| s / t).collect(),
            config: self.config,
            steps: self.steps_taken,
            final_position: self.state.position().to_vec(),
        })
    }

    /// Finite-time exponent estimate over the steps taken so far.
    ///
    /// Only sums folded in at a re-orthonormalization count, so with an
    /// interval above 1 the estimate lags by up to one interval. Zeros
    /// before the first step.
    #[must_use]
    pub fn current_estimate(&self) -> Vec<f64> {
        let elapsed = self.elapsed();
        if elapsed > 0.0 {
            self.sums.iter().map(|s| s / elapsed).collect()
        } else {
            vec![0.0; self.sums.len()]
        }
    }

    /// Steps taken so far.
    #[must_use]
    pub const fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Total steps `N` of the run.
    #[must_use]
    pub const fn steps_total(&self) -> usize {
        self.steps_total
    }

    /// Integration time covered so far.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.steps_taken as f64 * self.config.step
    }

    /// Whether every step has been taken.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.steps_taken >= self.steps_total
    }

    /// Current augmented state.
    #[must_use]
    pub const fn state(&self) -> &AugmentedState {
        &self.state
    }

    /// The system being integrated.
    #[must_use]
    pub const fn system(&self) -> &S {
        &self.system
    }

    fn reorthonormalize(&mut self, next: &AugmentedState, step: usize) -> Result<AugmentedState> {
        let collapse = |e: LyapunovError| match e {
            LyapunovError::DegenerateVector { index } => LyapunovError::NumericalCollapse {
                step,
                direction: index,
            },
            LyapunovError::NonFinite { .. } => LyapunovError::NonFinite { step: Some(step) },
            other => other,
        };
        let gs = self.config.orthogonalizer;
        let (x, u) = unaugment_position(next);
        let v = gs.apply(&u, false).map_err(collapse)?;
        let u_next = gs.apply(&v, true).map_err(collapse)?;
        for (direction, (sum, vi)) in self.sums.iter_mut().zip(&v).enumerate() {
            let norm = vec_abs(vi);
            if norm <= 0.0 {
                return Err(LyapunovError::NumericalCollapse { step, direction });
            }
            *sum += norm.ln();
        }
        augment_position(&x, &u_next)
    }
}

/// Compute the Lyapunov spectrum of `system` from `x0` with initial
/// perturbations `u0` (typically the identity basis).
///
/// # Errors
///
/// See [`LyapunovRun::new`] and [`LyapunovRun::step`].
pub fn lyapunov_exponents<S: TangentSystem>(
    system: S,
    x0: &[f64],
    u0: &[Vec<f64>],
    config: LyapunovConfig,
) -> Result<LyapunovSpectrum> {
    LyapunovRun::new(system, x0, u0, config)?.run()
}

/// The `d`×`d` identity basis, the usual initial perturbation set.
#[must_use]
pub fn identity_basis(d: usize) -> Vec<Vec<f64>> {
    (0..d)
        .map(|i| {
            let mut row = vec![0.0; d];
            row[i] = 1.0;
            row
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::systems::{LinearSystem, LorenzParams};
    use crate::tolerances::LINEAR_SPECTRUM_TOLERANCE;

    #[test]
    fn n_steps_rounds_representable_ratio() {
        assert_eq!(LyapunovConfig::new(100.0, 0.001).n_steps(), 100_000);
        assert_eq!(LyapunovConfig::new(1.0, 0.1).n_steps(), 10);
        assert_eq!(LyapunovConfig::new(1.0, 0.3).n_steps(), 3);
        assert_eq!(LyapunovConfig::new(0.5, 0.5).n_steps(), 1);
    }

    #[test]
    fn invalid_parameters_rejected_before_stepping() {
        let sys = LorenzParams::classic();
        let x0 = [1.0, 1.0, 1.0];
        let u0 = identity_basis(3);
        for config in [
            LyapunovConfig::new(10.0, 0.0),
            LyapunovConfig::new(10.0, -0.01),
            LyapunovConfig::new(0.0, 0.01),
            LyapunovConfig::new(f64::NAN, 0.01),
            LyapunovConfig::new(0.01, 0.1),
            LyapunovConfig::new(10.0, 0.01).with_reorthonormalize_every(0),
        ] {
            assert!(matches!(
                LyapunovRun::new(sys, &x0, &u0, config),
                Err(LyapunovError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn shape_errors() {
        let sys = LorenzParams::classic();
        let config = LyapunovConfig::new(1.0, 0.01);
        assert!(matches!(
            LyapunovRun::new(sys, &[1.0, 1.0], &identity_basis(2), config),
            Err(LyapunovError::DimensionMismatch { expected: 3, found: 2, .. })
        ));
        let mut four = identity_basis(3);
        four.push(vec![1.0, 1.0, 1.0]);
        assert!(matches!(
            LyapunovRun::new(sys, &[1.0; 3], &four, config),
            Err(LyapunovError::DimensionMismatch { expected: 3, found: 4, .. })
        ));
        assert!(matches!(
            LyapunovRun::new(sys, &[1.0; 3], &[vec![1.0, 0.0]], config),
            Err(LyapunovError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            LyapunovRun::new(sys, &[1.0; 3], &[], config),
            Err(LyapunovError::InvalidParameter(_))
        ));
    }

    #[test]
    fn degenerate_initial_perturbations_rejected() {
        let u0 = vec![vec![1.0, 0.0, 0.0], vec![2.0, 0.0, 0.0]];
        let err = LyapunovRun::new(
            LorenzParams::classic(),
            &[1.0; 3],
            &u0,
            LyapunovConfig::new(1.0, 0.01),
        )
        .unwrap_err();
        assert_eq!(err, LyapunovError::DegenerateVector { index: 1 });
    }

    #[test]
    fn diagonal_linear_system_exact() {
        let rates = [0.5, -1.0, -3.0];
        let sys = LinearSystem::diagonal(&rates).unwrap();
        let spec = lyapunov_exponents(
            &sys,
            &[1.0, 1.0, 1.0],
            &identity_basis(3),
            LyapunovConfig::new(10.0, 0.01),
        )
        .unwrap();
        assert_eq!(spec.steps, 1000);
        for (got, want) in spec.exponents.iter().zip(rates) {
            assert!(
                (got - want).abs() < LINEAR_SPECTRUM_TOLERANCE,
                "got {got}, want {want}"
            );
        }
    }

    #[test]
    fn partial_spectrum_tracks_leading_directions() {
        // k = 1 < d: one perturbation converges onto the most expanding direction.
        let sys = LinearSystem::diagonal(&[0.2, -0.4]).unwrap();
        let spec = lyapunov_exponents(
            &sys,
            &[1.0, 1.0],
            &[vec![1.0, 1.0]],
            LyapunovConfig::new(200.0, 0.01),
        )
        .unwrap();
        assert_eq!(spec.len(), 1);
        assert!((spec.exponents[0] - 0.2).abs() < 0.01);
    }

    #[test]
    fn stepping_in_chunks_matches_one_shot() {
        let sys = LorenzParams::classic();
        let x0 = [5.2, 8.5, 27.0];
        let u0 = identity_basis(3);
        let config = LyapunovConfig::new(1.0, 0.01);

        let one_shot = lyapunov_exponents(sys, &x0, &u0, config).unwrap();

        let mut run = LyapunovRun::new(sys, &x0, &u0, config).unwrap();
        assert_eq!(run.steps_total(), 100);
        assert_eq!(run.advance(30).unwrap(), 30);
        assert_eq!(run.steps_taken(), 30);
        assert!((run.elapsed() - 0.3).abs() < 1e-12);
        assert!(!run.is_finished());
        assert_eq!(run.advance(1000).unwrap(), 70);
        assert!(run.is_finished());
        assert!(!run.step().unwrap());
        assert_eq!(run.finish().unwrap(), one_shot);
    }

    #[test]
    fn finish_before_end_is_error() {
        let mut run = LyapunovRun::new(
            LorenzParams::classic(),
            &[1.0; 3],
            &identity_basis(3),
            LyapunovConfig::new(1.0, 0.01),
        )
        .unwrap();
        run.advance(5).unwrap();
        assert_eq!(run.current_estimate().len(), 3);
        assert!(matches!(
            run.finish(),
            Err(LyapunovError::InvalidParameter(_))
        ));
    }

    #[test]
    fn perturbations_stay_orthonormal() {
        let mut run = LyapunovRun::new(
            LorenzParams::classic(),
            &[5.2, 8.5, 27.0],
            &identity_basis(3),
            LyapunovConfig::new(1.0, 0.01),
        )
        .unwrap();
        run.advance(50).unwrap();
        let (_, u) = unaugment_position(run.state());
        assert!(crate::vector::orthogonality_defect(&u) < 1e-10);
        for ui in &u {
            assert!((vec_abs(ui) - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn batched_reorthonormalization_on_linear_system() {
        let rates = [0.3, -0.7];
        let sys = LinearSystem::diagonal(&rates).unwrap();
        let config = LyapunovConfig::new(5.0, 0.01).with_reorthonormalize_every(7);
        let spec = lyapunov_exponents(&sys, &[1.0, 0.0], &identity_basis(2), config).unwrap();
        assert_eq!(spec.config.reorthonormalize_every, 7);
        for (got, want) in spec.exponents.iter().zip(rates) {
            assert!((got - want).abs() < LINEAR_SPECTRUM_TOLERANCE);
        }
    }

    #[test]
    fn overflow_reported_with_step() {
        // x' = 1e3 x overflows f64 within a few hundred unit-time steps.
        let sys = LinearSystem::diagonal(&[1.0e3]).unwrap();
        let err = lyapunov_exponents(
            &sys,
            &[1.0],
            &identity_basis(1),
            LyapunovConfig::new(100.0, 1.0),
        )
        .unwrap_err();
        assert!(matches!(err, LyapunovError::NonFinite { step: Some(_) }));
    }

    #[test]
    fn collapse_reported_with_step_and_direction() {
        // Euler with h·λ = -1 maps every perturbation to exactly zero.
        let sys = LinearSystem::diagonal(&[-1.0, -1.0]).unwrap();
        let config = LyapunovConfig::new(5.0, 1.0).with_integrator(Integrator::ForwardEuler);
        let err = lyapunov_exponents(&sys, &[1.0, 1.0], &identity_basis(2), config).unwrap_err();
        assert_eq!(
            err,
            LyapunovError::NumericalCollapse {
                step: 0,
                direction: 0
            }
        );
    }

    #[test]
    fn spectrum_helpers() {
        let spec = LyapunovSpectrum {
            exponents: vec![0.0, 0.9, -14.57],
            config: LyapunovConfig::reference(),
            steps: 100_000,
            final_position: vec![0.0; 3],
        };
        assert_eq!(spec.len(), 3);
        assert!(!spec.is_empty());
        assert!((spec.sum() + 13.67).abs() < 1e-12);
        assert!((spec.max() - 0.9).abs() < 1e-15);
        assert_eq!(spec.sorted_descending(), vec![0.9, 0.0, -14.57]);
        assert_eq!(spec.kaplan_yorke().unwrap().k, 2);
    }
}
