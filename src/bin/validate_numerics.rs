// SPDX-License-Identifier: AGPL-3.0-only

//! Validate the numerical building blocks of the Lyapunov pipeline
//!
//! Tests: Gram-Schmidt (orthogonality, normalization, span), fixed-step
//! integrator convergence orders, tangent linearization of Lorenz,
//! periodic central differences, RA/RAW time filters.
//! Reference: closed-form solutions (exp(−t), sin(2πx), trace of the Jacobian)

use std::f64::consts::PI;

use hotspring_lyapunov::derive::{make_central_difference1, make_central_difference2};
use hotspring_lyapunov::integrators::{integrate, Integrator};
use hotspring_lyapunov::pde::{ra_filter, raw_filter, TimeLevels, RAW_NU};
use hotspring_lyapunov::profiling::timethis;
use hotspring_lyapunov::provenance::{LORENZ_CLASSIC, LORENZ_DIVERGENCE, LORENZ_X0};
use hotspring_lyapunov::tangent::{jacobian, TangentSystem};
use hotspring_lyapunov::tolerances;
use hotspring_lyapunov::validation::ValidationHarness;
use hotspring_lyapunov::vector::{dot, orthogonality_defect, vec_abs, GramSchmidt};

/// Largest residual of reconstructing each input from its projections onto
/// an orthonormal set, relative to the input length.
fn span_residual(inputs: &[Vec<f64>], basis: &[Vec<f64>]) -> f64 {
    inputs
        .iter()
        .map(|v| {
            let mut r = v.clone();
            for u in basis {
                let c = dot(u, v);
                for (ri, ui) in r.iter_mut().zip(u) {
                    *ri -= c * ui;
                }
            }
            vec_abs(&r) / vec_abs(v)
        })
        .fold(0.0, f64::max)
}

fn decay_error(method: Integrator, h: f64) -> f64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let steps = (1.0 / h).round() as usize;
    let x = integrate(method, &1.0_f64, h, steps, |x: &f64| -x);
    (x - (-1.0_f64).exp()).abs()
}

fn validate_gram_schmidt(harness: &mut ValidationHarness) {
    println!("── Gram-Schmidt ──");
    let inputs = vec![
        vec![1.0, 2.0, 0.0, -1.0],
        vec![0.5, 1.0, 1.0, 0.0],
        vec![3.0, -1.0, 2.0, 1.0],
        vec![1.0, 1.0, 1.0, 1.0],
    ];
    for gs in [GramSchmidt::Classical, GramSchmidt::Modified] {
        let name = gs.label();
        match (gs.apply(&inputs, false), gs.apply(&inputs, true)) {
            (Ok(raw), Ok(unit)) => {
                let defect = orthogonality_defect(&unit);
                let norm_err = unit
                    .iter()
                    .map(|u| (vec_abs(u) - 1.0).abs())
                    .fold(0.0, f64::max);
                let span = span_residual(&inputs, &unit);
                let first_kept = raw[0] == inputs[0];
                println!("  {name}: defect={defect:.2e} |‖u‖−1|={norm_err:.2e} span={span:.2e}");
                harness.check_upper(&format!("{name} orthogonality"), defect, tolerances::EXACT_F64);
                harness.check_upper(&format!("{name} normalization"), norm_err, tolerances::EXACT_F64);
                harness.check_upper(&format!("{name} span preserved"), span, tolerances::EXACT_F64);
                harness.check_bool(&format!("{name} first vector unchanged"), first_kept);
            }
            (Err(e), _) | (_, Err(e)) => {
                println!("  ❌ {name} failed: {e}");
                harness.check_bool(&format!("{name} orthogonalization"), false);
            }
        }
    }

    let dependent = vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]];
    let rejected = GramSchmidt::Classical.apply(&dependent, true).is_err()
        && GramSchmidt::Modified.apply(&dependent, true).is_err();
    println!("  dependent input rejected: {rejected}");
    harness.check_bool("linearly dependent input rejected", rejected);
    println!();
}

fn validate_integrators(harness: &mut ValidationHarness) {
    println!("── Fixed-step integrators on x' = −x ──");
    for method in [Integrator::ForwardEuler, Integrator::DoubleApprox, Integrator::Rk4] {
        let e1 = decay_error(method, 0.1);
        let e2 = decay_error(method, 0.05);
        let order = (e1 / e2).log2();
        println!(
            "  {:<14} err(h=0.1)={e1:.3e} err(h=0.05)={e2:.3e} order={order:.2}",
            method.label()
        );
        harness.check_abs(
            &format!("{} convergence order", method.label()),
            order,
            f64::from(method.order()),
            tolerances::CONVERGENCE_ORDER_TOLERANCE,
        );
    }
    let e = decay_error(Integrator::Rk4, 0.01);
    println!("  rk4 err(h=0.01) = {e:.3e}");
    harness.check_upper("rk4 decay h=0.01", e, tolerances::RK4_DECAY_TOLERANCE);
    println!();
}

fn validate_tangent(harness: &mut ValidationHarness) {
    println!("── Lorenz linearization ──");
    let x = LORENZ_X0;
    let j = jacobian(&LORENZ_CLASSIC, &x);
    let trace: f64 = (0..3).map(|i| j[i][i]).sum();
    println!("  tr J(x0) = {trace:+.6} (div = {:+.6})", LORENZ_DIVERGENCE.value);
    harness.check_abs("tr J = −(σ+1+b)", trace, LORENZ_DIVERGENCE.value, tolerances::EXACT_F64);

    // Central difference of the flow along each axis.
    let eps = 1e-6;
    let mut worst = 0.0f64;
    for (col, _) in x.iter().enumerate() {
        let mut plus = x;
        let mut minus = x;
        plus[col] += eps;
        minus[col] -= eps;
        let (mut fp, mut fm) = ([0.0; 3], [0.0; 3]);
        LORENZ_CLASSIC.flow(&plus, &mut fp);
        LORENZ_CLASSIC.flow(&minus, &mut fm);
        for row in 0..3 {
            let fd = (fp[row] - fm[row]) / (2.0 * eps);
            worst = worst.max((fd - j[row][col]).abs());
        }
    }
    println!("  max |J − J_fd| = {worst:.2e}");
    harness.check_upper(
        "Jacobian vs finite difference",
        worst,
        tolerances::JACOBIAN_FD_TOLERANCE,
    );
    println!();
}

fn validate_stencils(harness: &mut ValidationHarness) {
    println!("── Periodic central differences of sin(2πx) ──");
    let n = 100;
    let dx = 1.0 / 100.0;
    let xs: Vec<f64> = (0..n).map(|i| f64::from(i) * dx).collect();
    let phi: Vec<f64> = xs.iter().map(|x| (2.0 * PI * x).sin()).collect();
    let n = xs.len();

    let results = timethis("  stencils", || {
        let d1 = make_central_difference1(n, dx).and_then(|op| op.apply(&phi));
        let d2 = make_central_difference2(n, dx).and_then(|op| op.apply(&phi));
        (d1, d2)
    });
    match results {
        (Ok(d1), Ok(d2)) => {
            let amp1 = 2.0 * PI;
            let amp2 = amp1 * amp1;
            let err1 = d1
                .iter()
                .zip(&xs)
                .map(|(d, x)| ((d - amp1 * (2.0 * PI * x).cos()) / amp1).abs())
                .fold(0.0, f64::max);
            let err2 = d2
                .iter()
                .zip(&phi)
                .map(|(d, p)| ((d + amp2 * p) / amp2).abs())
                .fold(0.0, f64::max);
            println!("  d/dx   max rel err = {err1:.3e}");
            println!("  d²/dx² max rel err = {err2:.3e}");
            harness.check_upper("first derivative", err1, tolerances::CENTRAL_DIFFERENCE_TOLERANCE);
            harness.check_upper("second derivative", err2, tolerances::CENTRAL_DIFFERENCE_TOLERANCE);
        }
        (Err(e), _) | (_, Err(e)) => {
            println!("  ❌ stencil failed: {e}");
            harness.check_bool("central differences", false);
        }
    }
    println!();
}

fn validate_filters(harness: &mut ValidationHarness) {
    println!("── Robert-Asselin(-Williams) filters ──");
    let levels = TimeLevels::new(vec![1.0, -0.5, 2.0], vec![1.4, 0.0, 1.0], vec![0.9, 0.7, 2.5]);
    let ra = ra_filter(&levels, 0.5 * RAW_NU);
    let raw_unit = raw_filter(&levels, RAW_NU, 1.0);
    let diff: f64 = ra
        .current
        .iter()
        .zip(&raw_unit.current)
        .chain(ra.next.iter().zip(&raw_unit.next))
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    println!("  max |RA − RAW(α=1)| = {diff:.2e}");
    harness.check_upper("RAW(α=1) = RA", diff, tolerances::EXACT_F64);

    let raw_half = raw_filter(&levels, RAW_NU, 0.5);
    let mean_shift: f64 = (0..3)
        .map(|i| {
            let before = levels.prev[i] + levels.current[i] + levels.next[i];
            let after = raw_half.prev[i] + raw_half.current[i] + raw_half.next[i];
            (before - after).abs()
        })
        .fold(0.0, f64::max);
    println!("  three-level mean shift, RAW(α=0.5) = {mean_shift:.2e}");
    harness.check_upper("RAW(α=0.5) preserves three-level mean", mean_shift, tolerances::EXACT_F64);
    println!();
}

fn main() {
    println!("═══════════════════════════════════════════════════════════");
    println!("  Numerical Building Blocks Validation");
    println!("  Reference: closed-form solutions");
    println!("═══════════════════════════════════════════════════════════\n");

    let mut harness = ValidationHarness::new("numerics");

    validate_gram_schmidt(&mut harness);
    validate_integrators(&mut harness);
    validate_tangent(&mut harness);
    validate_stencils(&mut harness);
    validate_filters(&mut harness);

    harness.finish();
}
