// SPDX-License-Identifier: AGPL-3.0-only

//! Fixed-step integrators for autonomous systems `x' = f(x)`.
//!
//! All methods are generic over [`Evolvable`]: anything that supports
//! addition and scaling by a real number. That covers plain scalars, phase
//! vectors, and the augmented (phase point + tangent vectors) block the
//! Lyapunov accumulator advances.
//!
//! There is no error estimation and no step-size control. Choosing `h` small
//! enough for stability and accuracy is the caller's job.

use serde::{Deserialize, Serialize};

/// A state that can be advanced by a linear-combination integrator.
pub trait Evolvable: Clone {
    /// `self + other · scale`.
    #[must_use]
    fn add_scaled(&self, other: &Self, scale: f64) -> Self;

    /// `self · scale`.
    #[must_use]
    fn scaled(&self, scale: f64) -> Self;
}

impl Evolvable for f64 {
    fn add_scaled(&self, other: &Self, scale: f64) -> Self {
        other.mul_add(scale, *self)
    }

    fn scaled(&self, scale: f64) -> Self {
        self * scale
    }
}

impl Evolvable for Vec<f64> {
    fn add_scaled(&self, other: &Self, scale: f64) -> Self {
        self.iter()
            .zip(other)
            .map(|(a, b)| b.mul_add(scale, *a))
            .collect()
    }

    fn scaled(&self, scale: f64) -> Self {
        self.iter().map(|a| a * scale).collect()
    }
}

impl<const N: usize> Evolvable for [f64; N] {
    fn add_scaled(&self, other: &Self, scale: f64) -> Self {
        std::array::from_fn(|i| other[i].mul_add(scale, self[i]))
    }

    fn scaled(&self, scale: f64) -> Self {
        self.map(|a| a * scale)
    }
}

/// Forward Euler: `x + h f(x)`.
pub fn forward_euler<S, F>(x: &S, h: f64, f: F) -> S
where
    S: Evolvable,
    F: Fn(&S) -> S,
{
    x.add_scaled(&f(x), h)
}

/// Classical fourth-order Runge-Kutta.
///
/// ```text
/// k1 = h f(x)
/// k2 = h f(x + k1/2)
/// k3 = h f(x + k2/2)
/// k4 = h f(x + k3)
/// x + (k1 + 2 k2 + 2 k3 + k4) / 6
/// ```
pub fn rk4<S, F>(x: &S, h: f64, f: F) -> S
where
    S: Evolvable,
    F: Fn(&S) -> S,
{
    let k1 = f(x).scaled(h);
    let k2 = f(&x.add_scaled(&k1, 0.5)).scaled(h);
    let k3 = f(&x.add_scaled(&k2, 0.5)).scaled(h);
    let k4 = f(&x.add_scaled(&k3, 1.0)).scaled(h);
    let incr = k1
        .add_scaled(&k2, 2.0)
        .add_scaled(&k3, 2.0)
        .add_scaled(&k4, 1.0);
    x.add_scaled(&incr, 1.0 / 6.0)
}

/// Lorenz's (1963) double approximation: two Euler steps, averaged with the
/// starting point. Algebraically this is Heun's method.
pub fn double_approx<S, F>(x: &S, h: f64, f: F) -> S
where
    S: Evolvable,
    F: Fn(&S) -> S,
{
    let x1 = forward_euler(x, h, &f);
    let x2 = forward_euler(&x1, h, &f);
    x.add_scaled(&x2, 1.0).scaled(0.5)
}

/// Run-time selection of a fixed-step method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Integrator {
    /// First-order forward Euler.
    ForwardEuler,
    /// Fourth-order Runge-Kutta.
    #[default]
    Rk4,
    /// Lorenz double approximation (second order).
    DoubleApprox,
}

impl Integrator {
    /// Advance `x` by one step of size `h`.
    pub fn step<S, F>(self, x: &S, h: f64, f: F) -> S
    where
        S: Evolvable,
        F: Fn(&S) -> S,
    {
        match self {
            Self::ForwardEuler => forward_euler(x, h, f),
            Self::Rk4 => rk4(x, h, f),
            Self::DoubleApprox => double_approx(x, h, f),
        }
    }

    /// Nominal global convergence order.
    #[must_use]
    pub const fn order(self) -> u32 {
        match self {
            Self::ForwardEuler => 1,
            Self::Rk4 => 4,
            Self::DoubleApprox => 2,
        }
    }

    /// Short label for reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ForwardEuler => "euler",
            Self::Rk4 => "rk4",
            Self::DoubleApprox => "double_approx",
        }
    }
}

/// Apply `steps` fixed steps of `method` starting from `x0`.
pub fn integrate<S, F>(method: Integrator, x0: &S, h: f64, steps: usize, f: F) -> S
where
    S: Evolvable,
    F: Fn(&S) -> S,
{
    let mut x = x0.clone();
    for _ in 0..steps {
        x = method.step(&x, h, &f);
    }
    x
}
