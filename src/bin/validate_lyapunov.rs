// SPDX-License-Identifier: AGPL-3.0-only

//! Validate the Lyapunov spectrum of the Lorenz system
//!
//! Checks: exponent sum vs phase-space divergence, sign pattern (+, 0, −),
//! λ₁ and λ₃ vs published values, Kaplan-Yorke dimension, bit-identical
//! reruns, classical vs modified Gram-Schmidt agreement.
//! Reference: Sprott (2003), closed-form divergence −(σ+1+b)
//!
//! Usage: `validate_lyapunov [--time=100] [--step=0.001] [--reorth=1] [--json=path]`

use std::path::Path;

use hotspring_lyapunov::error::LyapunovError;
use hotspring_lyapunov::lyapunov::{identity_basis, lyapunov_exponents, LyapunovConfig, LyapunovRun};
use hotspring_lyapunov::profiling::Timer;
use hotspring_lyapunov::provenance::{
    self, LORENZ_CLASSIC, LORENZ_DIVERGENCE, LORENZ_KAPLAN_YORKE, LORENZ_X0,
};
use hotspring_lyapunov::report::{parse_cli_f64, parse_cli_str, parse_cli_usize, save_json};
use hotspring_lyapunov::tolerances;
use hotspring_lyapunov::util::{seconds_to_time, Memoize};
use hotspring_lyapunov::validation::ValidationHarness;
use hotspring_lyapunov::vector::GramSchmidt;
use hotspring_lyapunov::LyapunovSpectrum;

const PROGRESS_REPORTS: usize = 10;

fn parse_args() -> LyapunovConfig {
    let args: Vec<String> = std::env::args().collect();
    let reference = LyapunovConfig::reference();
    LyapunovConfig::new(
        parse_cli_f64(&args, "--time", reference.total_time),
        parse_cli_f64(&args, "--step", reference.step),
    )
    .with_reorthonormalize_every(parse_cli_usize(&args, "--reorth", 1))
}

fn print_spectrum(spectrum: &LyapunovSpectrum) {
    for (i, l) in spectrum.exponents.iter().enumerate() {
        println!("  λ{} = {l:+.4}", i + 1);
    }
    println!("  Σλ = {:+.5}", spectrum.sum());
}

/// Main run with progress, stepping the accumulator in chunks.
fn run_with_progress(config: LyapunovConfig) -> Result<LyapunovSpectrum, LyapunovError> {
    let mut run = LyapunovRun::new(LORENZ_CLASSIC, &LORENZ_X0, &identity_basis(3), config)?;
    let chunk = (run.steps_total() / PROGRESS_REPORTS).max(1);
    let timer = Timer::start("Lorenz spectrum");
    while !run.is_finished() {
        run.advance(chunk)?;
        let est = run.current_estimate();
        println!(
            "  t = {:>8.2}  [{:>3}%]  λ ≈ [{:+.4}, {:+.4}, {:+.4}]  wall {}",
            run.elapsed(),
            100 * run.steps_taken() / run.steps_total(),
            est[0],
            est[1],
            est[2],
            seconds_to_time(timer.elapsed_secs())
        );
    }
    println!("  {}", timer.report());
    run.finish()
}

fn main() {
    let config = parse_args();
    let args: Vec<String> = std::env::args().collect();
    let json_path = parse_cli_str(&args, "--json").map(str::to_string);

    println!("═══════════════════════════════════════════════════════════");
    println!("  Lyapunov Spectrum Validation — Lorenz (σ=10, r=28, b=8/3)");
    println!("  Reference: Sprott (2003); divergence −(σ+1+b) = −41/3");
    println!("═══════════════════════════════════════════════════════════");
    println!(
        "  T = {}  h = {}  steps = {}  reorth every {}",
        config.total_time,
        config.step,
        config.n_steps(),
        config.reorthonormalize_every
    );
    println!("  x0 = {LORENZ_X0:?}  u0 = I₃\n");

    let mut harness = ValidationHarness::new("lyapunov");

    if let Err(e) = config.validate() {
        println!("  ❌ invalid configuration: {e}");
        harness.check_bool("configuration valid", false);
        harness.finish();
    }

    // ─── Spectrum ──────────────────────────────────────────────────
    println!("── Lorenz spectrum (classical Gram-Schmidt) ──");
    let spectrum = match run_with_progress(config) {
        Ok(s) => s,
        Err(e) => {
            println!("  ❌ run failed: {e}");
            harness.check_bool("Lorenz run completes", false);
            harness.finish();
        }
    };
    harness.check_bool("Lorenz run completes", true);
    print_spectrum(&spectrum);
    println!();

    // ─── Divergence oracle ─────────────────────────────────────────
    println!("── Sum vs divergence ──");
    println!(
        "  Σλ = {:+.5}, div = {:+.5}",
        spectrum.sum(),
        LORENZ_DIVERGENCE.value
    );
    harness.check_abs(
        "Σλ = −(σ+1+b)",
        spectrum.sum(),
        LORENZ_DIVERGENCE.value,
        tolerances::LORENZ_DIVERGENCE_TOLERANCE,
    );
    println!();

    // ─── Sign pattern and literature ───────────────────────────────
    println!("── Sign pattern vs {} ──", provenance::LORENZ_LAMBDA1.source);
    let sorted = spectrum.sorted_descending();
    let positive = sorted.iter().filter(|&&l| l > tolerances::LORENZ_NEUTRAL_TOLERANCE).count();
    let neutral = sorted
        .iter()
        .filter(|l| l.abs() < tolerances::LORENZ_NEUTRAL_TOLERANCE)
        .count();
    let negative = sorted.iter().filter(|&&l| l < -tolerances::LORENZ_NEUTRAL_TOLERANCE).count();
    println!("  positive={positive} neutral={neutral} negative={negative}");
    harness.check_bool("exactly one positive exponent", positive == 1);
    harness.check_bool("exactly one neutral exponent", neutral == 1);
    harness.check_bool("exactly one negative exponent", negative == 1);
    let [l1, l2, l3] = provenance::lorenz_spectrum();
    for (reference, observed, tol) in [
        (l1, sorted[0], tolerances::LORENZ_LAMBDA1_TOLERANCE),
        (l2, sorted[1], tolerances::LORENZ_NEUTRAL_TOLERANCE),
        (l3, sorted[2], tolerances::LORENZ_LAMBDA1_TOLERANCE),
    ] {
        println!("  {} = {observed:+.4} (ref {:+.4})", reference.label, reference.value);
        harness.check_abs(reference.label, observed, reference.value, tol);
    }
    println!();

    // ─── Kaplan-Yorke ──────────────────────────────────────────────
    println!("── Kaplan-Yorke dimension ──");
    match spectrum.kaplan_yorke() {
        Ok(ky) => {
            println!("  D_KY = {:.4} (k = {}, ref {:.4})", ky.dimension, ky.k, LORENZ_KAPLAN_YORKE.value);
            harness.check_bool("Kaplan-Yorke prefix k = 2", ky.k == 2);
            harness.check_abs(
                LORENZ_KAPLAN_YORKE.label,
                ky.dimension,
                LORENZ_KAPLAN_YORKE.value,
                tolerances::LORENZ_KAPLAN_YORKE_TOLERANCE,
            );
        }
        Err(e) => {
            println!("  ❌ {e}");
            harness.check_bool("Kaplan-Yorke dimension defined", false);
        }
    }
    println!();

    // ─── Orthogonalizer comparison ─────────────────────────────────
    // Shorter runs keep this section cheap; the comparison is about the
    // variants, not about convergence in T.
    println!("── Classical vs modified Gram-Schmidt ──");
    let short = LyapunovConfig::new(config.total_time / 10.0, config.step)
        .with_reorthonormalize_every(config.reorthonormalize_every);
    let mut runs = Memoize::new(|gs: &GramSchmidt| {
        let timer = Timer::start(gs.label());
        let out = lyapunov_exponents(
            LORENZ_CLASSIC,
            &LORENZ_X0,
            &identity_basis(3),
            short.with_orthogonalizer(*gs),
        );
        println!("  {}", timer.report());
        out
    });
    let classical = runs.get(&GramSchmidt::Classical).clone();
    let modified = runs.get(&GramSchmidt::Modified).clone();
    match (&classical, &modified) {
        (Ok(c), Ok(m)) => {
            let max_diff = c
                .exponents
                .iter()
                .zip(&m.exponents)
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
            println!("  classical: {:?}", c.exponents);
            println!("  modified:  {:?}", m.exponents);
            harness.check_upper(
                "max |λ_classical − λ_modified|",
                max_diff,
                tolerances::VARIANT_AGREEMENT_TOLERANCE,
            );
        }
        _ => {
            println!("  ❌ comparison run failed");
            harness.check_bool("orthogonalizer comparison runs", false);
        }
    }
    println!();

    // ─── Determinism ───────────────────────────────────────────────
    println!("── Determinism ──");
    let rerun = lyapunov_exponents(LORENZ_CLASSIC, &LORENZ_X0, &identity_basis(3), short);
    let identical = matches!((&rerun, &classical), (Ok(a), Ok(b)) if a == b);
    println!("  rerun bit-identical: {identical}");
    harness.check_bool("identical runs are bit-identical", identical);

    if let Some(path) = json_path {
        let summary = serde_json::json!({
            "spectrum": &spectrum,
            "kaplan_yorke": spectrum.kaplan_yorke().ok(),
            "validation": &harness,
        });
        match save_json(Path::new(&path), &summary) {
            Ok(p) => println!("\n  Results saved to {}", p.display()),
            Err(e) => println!("\n  ❌ {e}"),
        }
    }

    harness.finish();
}
