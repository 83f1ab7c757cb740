// src/application/slugs/policy.rs
use std::{fmt, sync::Arc, time::Duration};

use crate::application::ports::DigitSourcePort;

/// How a colliding candidate is revised before the next write attempt.
#[derive(Clone)]
pub enum SuffixPolicy {
    /// Append one digit drawn from the source. No reads.
    RandomDigit(Arc<DigitSourcePort>),
    /// Look up the highest `<base>-<N>` and continue at `N + 1`. One read per
    /// round.
    Sequential,
}

impl SuffixPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::RandomDigit(_) => "random",
            Self::Sequential => "sequential",
        }
    }
}

impl fmt::Debug for SuffixPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounds on the retry loop. The loop stops at whichever limit is hit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    max_attempts: u32,
    max_elapsed: Option<Duration>,
}

impl RetryBudget {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

    /// A budget of at least one attempt.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            max_elapsed: None,
        }
    }

    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = Some(max_elapsed);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn max_elapsed(&self) -> Option<Duration> {
        self.max_elapsed
    }

    pub fn is_spent(&self, attempts: u32, elapsed: Duration) -> bool {
        attempts >= self.max_attempts || self.max_elapsed.is_some_and(|max| elapsed >= max)
    }
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}
