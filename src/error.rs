// SPDX-License-Identifier: AGPL-3.0-only

//! Typed errors for Lyapunov spectrum computation.
//!
//! Every failure mode of a run is deterministic given its inputs, so callers
//! get an enum they can pattern-match on (bad parameters, degenerate
//! perturbations, collapse mid-run) rather than a NaN-filled spectrum.

use std::fmt;

/// Errors arising from orthogonalization, integration, or post-processing.
#[derive(Debug, Clone, PartialEq)]
pub enum LyapunovError {
    /// A run or estimator parameter is out of its domain (non-positive step,
    /// step larger than the total time, empty spectrum, ...).
    InvalidParameter(String),

    /// Shapes disagree: state vs perturbation widths, `k > d`, or a system
    /// whose dimension does not match the initial point.
    DimensionMismatch {
        /// Where the mismatch was detected.
        context: &'static str,
        /// Expected length.
        expected: usize,
        /// Length actually found.
        found: usize,
    },

    /// Gram-Schmidt input vector `index` is zero or linearly dependent on
    /// the vectors before it.
    DegenerateVector {
        /// Position of the offending vector in the input set.
        index: usize,
    },

    /// A perturbation direction lost all magnitude during a run.
    NumericalCollapse {
        /// Integration step (0-based) at which the collapse was detected.
        step: usize,
        /// Perturbation direction whose norm reached zero.
        direction: usize,
    },

    /// The augmented state overflowed or produced NaN.
    NonFinite {
        /// Integration step (0-based); `None` outside a run.
        step: Option<usize>,
    },

    /// Kaplan-Yorke dimension requested for a spectrum whose cumulative sum
    /// never drops to zero or below.
    DimensionDomain {
        /// Number of exponents in the offending spectrum.
        count: usize,
    },

    /// Writing a result report failed (path and underlying error).
    Io(String),
}

impl fmt::Display for LyapunovError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
            Self::DimensionMismatch {
                context,
                expected,
                found,
            } => write!(
                f,
                "Dimension mismatch in {context}: expected {expected}, found {found}"
            ),
            Self::DegenerateVector { index } => write!(
                f,
                "Degenerate vector at index {index}: zero or linearly dependent"
            ),
            Self::NumericalCollapse { step, direction } => write!(
                f,
                "Perturbation direction {direction} collapsed to zero norm at step {step}"
            ),
            Self::NonFinite { step: Some(step) } => {
                write!(f, "Non-finite state encountered at step {step}")
            }
            Self::NonFinite { step: None } => write!(f, "Non-finite value encountered"),
            Self::DimensionDomain { count } => write!(
                f,
                "Kaplan-Yorke dimension undefined: none of the {count} exponents \
                 brings the cumulative sum to zero or below"
            ),
            Self::Io(msg) => write!(f, "Report I/O failed: {msg}"),
        }
    }
}

impl std::error::Error for LyapunovError {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LyapunovError>;
