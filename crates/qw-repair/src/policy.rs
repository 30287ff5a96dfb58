//! Bounded-retry policy.
//!
//! Every generator call the engine makes is drawn from an [`Attempts`]
//! counter created by [`RetryPolicy`], so the number of calls per lesson never
//! exceeds [`RetryPolicy::max_generator_calls`].

use qw_config::RepairConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Generator calls allowed per invalid question before it is dropped.
    pub max_replace_rounds: u32,
    /// Candidates requested per generator call.
    pub batch_size: usize,
    pub fill_slack: usize,
    pub fill_multiplier: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_replace_rounds: 5,
            batch_size: 8,
            fill_slack: 2,
            fill_multiplier: 10,
        }
    }
}

impl From<&RepairConfig> for RetryPolicy {
    fn from(config: &RepairConfig) -> Self {
        Self {
            max_replace_rounds: config.max_replace_rounds,
            batch_size: config.batch_size,
            fill_slack: config.fill_slack,
            fill_multiplier: config.fill_multiplier,
        }
    }
}

impl RetryPolicy {
    /// Fill iterations for a total deficit: `(deficit + slack) × multiplier`.
    #[must_use]
    pub const fn fill_budget(&self, deficit: usize) -> usize {
        deficit
            .saturating_add(self.fill_slack)
            .saturating_mul(self.fill_multiplier)
    }

    /// Upper bound on generator calls for one lesson.
    #[must_use]
    pub const fn max_generator_calls(&self, invalid: usize, fill_deficit: usize) -> usize {
        invalid
            .saturating_mul(self.max_replace_rounds as usize)
            .saturating_add(self.fill_budget(fill_deficit))
    }

    #[must_use]
    pub const fn replace_attempts(&self) -> Attempts {
        Attempts::new(self.max_replace_rounds as usize)
    }

    #[must_use]
    pub const fn fill_attempts(&self, deficit: usize) -> Attempts {
        Attempts::new(self.fill_budget(deficit))
    }
}

/// A counter that hands out at most `limit` attempt numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempts {
    used: usize,
    limit: usize,
}

impl Attempts {
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self { used: 0, limit }
    }

    /// The next zero-based attempt number, or `None` once the limit is reached.
    pub const fn advance(&mut self) -> Option<usize> {
        if self.used < self.limit {
            self.used += 1;
            Some(self.used - 1)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn used(&self) -> usize {
        self.used
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.used >= self.limit
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 20)]
    #[case(1, 30)]
    #[case(7, 90)]
    fn default_fill_budget(#[case] deficit: usize, #[case] budget: usize) {
        assert_eq!(RetryPolicy::default().fill_budget(deficit), budget);
    }

    #[rstest]
    #[case(0, 0, 20)]
    #[case(2, 0, 30)]
    #[case(2, 7, 100)]
    fn default_call_bound(#[case] invalid: usize, #[case] deficit: usize, #[case] bound: usize) {
        assert_eq!(
            RetryPolicy::default().max_generator_calls(invalid, deficit),
            bound
        );
    }

    #[test]
    fn attempts_stop_at_limit() {
        let mut attempts = Attempts::new(3);
        let mut seen = Vec::new();
        while let Some(n) = attempts.advance() {
            seen.push(n);
        }
        assert_eq!(seen, vec![0, 1, 2]);
        assert!(attempts.is_exhausted());
        assert_eq!(attempts.used(), 3);
        assert_eq!(attempts.advance(), None);
    }

    #[test]
    fn zero_limit_never_runs() {
        let mut attempts = RetryPolicy {
            max_replace_rounds: 0,
            ..RetryPolicy::default()
        }
        .replace_attempts();
        assert_eq!(attempts.advance(), None);
    }

    #[test]
    fn built_from_config() {
        let config = RepairConfig {
            batch_size: 4,
            ..RepairConfig::default()
        };
        let policy = RetryPolicy::from(&config);
        assert_eq!(policy.batch_size, 4);
        assert_eq!(policy.max_replace_rounds, 5);
    }
}
