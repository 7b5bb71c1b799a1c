// SPDX-License-Identifier: AGPL-3.0-only

//! Command-line overrides and JSON result files for the validation binaries.
//!
//! Arguments use the `--key=value` form; anything unparseable falls back to
//! the default so a typo never aborts a long run halfway through setup.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{LyapunovError, Result};

fn find_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    let prefix = format!("{key}=");
    args.iter().find_map(|a| a.strip_prefix(&prefix))
}

/// `--key=<usize>` or `default`.
#[must_use]
pub fn parse_cli_usize(args: &[String], key: &str, default: usize) -> usize {
    find_value(args, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// `--key=<f64>` or `default`. Non-finite values are ignored.
#[must_use]
pub fn parse_cli_f64(args: &[String], key: &str, default: f64) -> f64 {
    find_value(args, key)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// `--key=<text>` if present.
#[must_use]
pub fn parse_cli_str<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    find_value(args, key).filter(|v| !v.is_empty())
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`LyapunovError::Io`] if serialization, directory creation, or
/// the write fails.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| LyapunovError::Io(format!("JSON serialize: {e}")))?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|e| LyapunovError::Io(format!("create {}: {e}", dir.display())))?;
    }
    std::fs::write(path, json)
        .map_err(|e| LyapunovError::Io(format!("write {}: {e}", path.display())))?;
    Ok(path.to_path_buf())
}
