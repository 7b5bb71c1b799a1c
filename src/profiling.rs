// SPDX-License-Identifier: AGPL-3.0-only

//! Wall-clock timing for validation binaries.

use std::time::Instant;

/// A running wall-clock timer with a label.
#[derive(Debug, Clone)]
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    /// Start timing now.
    #[must_use]
    pub fn start(label: &str) -> Self {
        Self {
            label: label.to_string(),
            start: Instant::now(),
        }
    }

    /// Seconds since [`start`](Self::start).
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// `"<label> : <seconds> seconds"`.
    #[must_use]
    pub fn report(&self) -> String {
        format!("{} : {:.3} seconds", self.label, self.elapsed_secs())
    }
}

/// Run `f`, print how long it took, and return its result.
pub fn timethis<R>(label: &str, f: impl FnOnce() -> R) -> R {
    let timer = Timer::start(label);
    let out = f();
    println!("{}", timer.report());
    out
}
