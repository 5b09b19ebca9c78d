//! Input sizes for a benchmark sweep.
//!
//! Sizes are dense below `threshold1`, every 8th value up to `threshold2`, and
//! powers-of-two multiples of `threshold2` beyond that, so that small sizes are
//! sampled finely while the run count stays bounded up to `end`.

use std::{
    env::{self, VarError},
    iter,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{FindError, Result};

/// Environment variable holding a JSON [`RangeConfig`].
pub const RANGE_ENV: &str = "FIND_BENCH_RANGE";

const SPARSE_STEP: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub start: usize,
    pub end: usize,
    pub threshold1: usize,
    pub threshold2: usize,
}

impl Default for RangeConfig {
    fn default() -> Self {
        RangeConfig {
            start: 1,
            end: 1_000_000,
            threshold1: 1024,
            threshold2: 4096,
        }
    }
}

impl RangeConfig {
    pub fn new(start: usize, end: usize, threshold1: usize, threshold2: usize) -> Self {
        RangeConfig {
            start,
            end,
            threshold1,
            threshold2,
        }
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read the config from [`RANGE_ENV`], or return `default` when it is unset.
    ///
    /// A set but unreadable value is an error, never a silent fallback.
    pub fn from_env_or(default: RangeConfig) -> Result<Self> {
        match env::var(RANGE_ENV) {
            Ok(s) => Self::from_json(&s),
            Err(VarError::NotPresent) => Ok(default),
            Err(VarError::NotUnicode(_)) => Err(FindError::InvalidRange(format!(
                "{RANGE_ENV} is not valid unicode"
            ))),
        }
    }

    /// Check `1 <= start <= threshold1 <= threshold2 <= end`.
    ///
    /// [`RangeConfig::sizes`] does not require this; it just emits fewer sizes.
    pub fn validate(&self) -> Result<()> {
        let RangeConfig {
            start,
            end,
            threshold1,
            threshold2,
        } = *self;
        if start == 0 {
            return Err(FindError::InvalidRange("start must be at least 1".into()));
        }
        if !(start <= threshold1 && threshold1 <= threshold2 && threshold2 <= end) {
            return Err(FindError::InvalidRange(format!(
                "expected start <= threshold1 <= threshold2 <= end, got {start} {threshold1} {threshold2} {end}"
            )));
        }
        Ok(())
    }

    /// The ordered sizes of the sweep. Every phase stops at `end`.
    pub fn sizes(self) -> impl Iterator<Item = usize> + Clone {
        let RangeConfig {
            start,
            end,
            threshold1,
            threshold2,
        } = self;
        let dense = (start..threshold1).take_while(move |&i| i <= end);
        let sparse = (threshold1..=threshold2)
            .step_by(SPARSE_STEP)
            .take_while(move |&i| i <= end);
        // Overflow, or a zero threshold that would double forever, ends the phase.
        let exponential = iter::successors(threshold2.checked_mul(2).filter(|&i| i > 0), |&i| {
            i.checked_mul(2)
        })
        .take_while(move |&i| i <= end);
        dense.chain(sparse).chain(exponential)
    }
}

/// Materialize [`RangeConfig::sizes`] for the given parameters.
pub fn generate_range_arguments(
    start: usize,
    end: usize,
    threshold1: usize,
    threshold2: usize,
) -> Vec<usize> {
    let sizes: Vec<usize> = RangeConfig::new(start, end, threshold1, threshold2)
        .sizes()
        .collect();
    debug!(
        "{} sizes for range {start}..={end} ({threshold1}, {threshold2})",
        sizes.len()
    );
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn all_phases_truncated() {
        // 13 > threshold2 ends the sparse phase, 24 > end skips the exponential one.
        assert_eq!(generate_range_arguments(1, 20, 5, 12), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn exponential_only() {
        let expected = [1, 2, 4, 8, 16, 32, 64, 128, 256, 512];
        assert_eq!(generate_range_arguments(1, 1000, 1, 1), expected);
    }

    #[test]
    fn three_phases() {
        let sizes = generate_range_arguments(1, 200, 4, 24);
        assert_eq!(sizes, vec![1, 2, 3, 4, 12, 20, 48, 96, 192]);
    }

    #[test]
    fn end_is_inclusive() {
        assert_eq!(generate_range_arguments(1, 64, 2, 16), vec![1, 2, 10, 32, 64]);
        assert_eq!(generate_range_arguments(3, 3, 3, 3), vec![3]);
    }

    #[test]
    fn threshold1_beyond_end() {
        assert_eq!(generate_range_arguments(1, 6, 10, 20), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn malformed_ranges_are_tolerated() {
        // threshold1 > threshold2: the sparse phase is empty.
        assert_eq!(generate_range_arguments(1, 100, 4, 2), vec![1, 2, 3, 4, 8, 16, 32, 64]);
        // start > end: nothing at all below the exponential phase.
        assert_eq!(generate_range_arguments(10, 5, 12, 12), Vec::<usize>::new());
        // zero threshold2 does not spin.
        assert_eq!(generate_range_arguments(0, 10, 0, 0), vec![0]);
    }

    #[test]
    fn no_overflow_near_usize_max() {
        let big = usize::MAX / 2 + 1;
        let sizes = RangeConfig::new(1, usize::MAX, 1, big).sizes().take(3).collect_vec();
        assert_eq!(sizes, vec![1, 9, 17]);
        let tail = RangeConfig::new(big, usize::MAX, big, big).sizes().collect_vec();
        assert_eq!(tail, vec![big]);
    }

    #[test]
    fn default_sweep() {
        let config = RangeConfig::default();
        config.validate().unwrap();
        let sizes = config.sizes().collect_vec();
        assert_eq!(sizes.first(), Some(&1));
        assert!(sizes.iter().tuple_windows().all(|(a, b)| a < b));
        // 1..1024, 1024..=4096 step 8, 8192..=524288 doubling
        assert_eq!(sizes.len(), 1023 + 385 + 7);
        assert_eq!(sizes.last(), Some(&524288));
    }

    #[test]
    fn restartable() {
        let sizes = RangeConfig::new(1, 1 << 12, 8, 64).sizes();
        assert_eq!(sizes.clone().collect_vec(), sizes.collect_vec());
    }

    #[test]
    fn validation() {
        assert!(RangeConfig::new(1, 20, 5, 12).validate().is_ok());
        assert!(matches!(
            RangeConfig::new(0, 20, 5, 12).validate(),
            Err(FindError::InvalidRange(_))
        ));
        assert!(RangeConfig::new(1, 20, 13, 12).validate().is_err());
        assert!(RangeConfig::new(1, 10, 5, 12).validate().is_err());
    }

    // The only test touching RANGE_ENV, so the cases run in sequence.
    #[test]
    fn env_config() {
        let default = RangeConfig::new(1, 2, 1, 1);

        env::remove_var(RANGE_ENV);
        assert_eq!(RangeConfig::from_env_or(default).unwrap(), default);

        env::set_var(
            RANGE_ENV,
            r#"{"start": 1, "end": 20, "threshold1": 5, "threshold2": 12}"#,
        );
        assert_eq!(
            RangeConfig::from_env_or(default).unwrap(),
            RangeConfig::new(1, 20, 5, 12)
        );

        env::set_var(RANGE_ENV, r#"{"start": 1, "end": "#);
        assert!(matches!(
            RangeConfig::from_env_or(default),
            Err(FindError::Config(_))
        ));

        #[cfg(unix)]
        {
            use std::{ffi::OsString, os::unix::ffi::OsStringExt};
            env::set_var(RANGE_ENV, OsString::from_vec(b"{\"start\":\xff}".to_vec()));
            assert!(matches!(
                RangeConfig::from_env_or(default),
                Err(FindError::InvalidRange(_))
            ));
        }

        env::remove_var(RANGE_ENV);
    }

    #[test]
    fn json_config() {
        let config = RangeConfig::from_json(
            r#"{"start": 1, "end": 20, "threshold1": 5, "threshold2": 12}"#,
        )
        .unwrap();
        assert_eq!(config, RangeConfig::new(1, 20, 5, 12));
        assert!(matches!(
            RangeConfig::from_json(r#"{"start": 1}"#),
            Err(FindError::Config(_))
        ));
    }
}
