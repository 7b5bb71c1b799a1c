// SPDX-License-Identifier: AGPL-3.0-only

//! Small helpers: wall-clock formatting and memoization of pure functions.

use std::collections::HashMap;
use std::hash::Hash;

/// Format a duration in seconds as `HH:MM:SS` (fractional seconds dropped,
/// hours not wrapped at 24).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn seconds_to_time(t: f64) -> String {
    let total = t.max(0.0) as u64;
    let (m, s) = (total / 60, total % 60);
    let (h, m) = (m / 60, m % 60);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Caches the results of an expensive pure function by argument.
///
/// The first call with a given key runs the function and stores its result;
/// later calls with an equal key return the stored value without
/// recomputation. Only sound for functions without side effects.
pub struct Memoize<K, V, F> {
    f: F,
    cache: HashMap<K, V>,
}

impl<K, V, F> Memoize<K, V, F>
where
    K: Hash + Eq + Clone,
    F: FnMut(&K) -> V,
{
    /// Wrap `f` with an empty cache.
    pub fn new(f: F) -> Self {
        Self {
            f,
            cache: HashMap::new(),
        }
    }

    /// Result for `key`, computed at most once.
    pub fn get(&mut self, key: &K) -> &V {
        if !self.cache.contains_key(key) {
            let value = (self.f)(key);
            self.cache.insert(key.clone(), value);
        }
        &self.cache[key]
    }

    /// Number of cached results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drop every cached result.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<K, V, F> std::fmt::Debug for Memoize<K, V, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memoize")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(seconds_to_time(0.0), "00:00:00");
        assert_eq!(seconds_to_time(59.9), "00:00:59");
        assert_eq!(seconds_to_time(3_725.0), "01:02:05");
        assert_eq!(seconds_to_time(90_000.0), "25:00:00");
        assert_eq!(seconds_to_time(-4.0), "00:00:00");
    }

    #[test]
    fn memoize_computes_once_per_key() {
        let mut calls = 0;
        {
            let mut square = Memoize::new(|x: &u64| {
                calls += 1;
                x * x
            });
            assert!(square.is_empty());
            assert_eq!(*square.get(&4), 16);
            assert_eq!(*square.get(&4), 16);
            assert_eq!(*square.get(&5), 25);
            assert_eq!(square.len(), 2);
            square.clear();
            assert_eq!(*square.get(&4), 16);
        }
        assert_eq!(calls, 3);
    }
}
