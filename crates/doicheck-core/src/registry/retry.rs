//! Retry policy for registry calls

use std::time::Duration;

use crate::config::RegistryConfig;
use crate::error::FailureReason;

/// Exponential backoff: `initial * 2^attempt`, capped at `max_backoff`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: config.initial_backoff(),
            max_backoff: config.max_backoff(),
        }
    }

    /// Delay before retry number `attempt` (zero-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }

    /// Whether a failure after `attempt` retries deserves another try
    pub fn should_retry(&self, attempt: u32, reason: &FailureReason) -> bool {
        attempt < self.max_retries && reason.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(500),
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = policy();
        assert_eq!(policy.backoff(0), Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(200));
        assert_eq!(policy.backoff(2), Duration::from_millis(400));
        assert_eq!(policy.backoff(3), Duration::from_millis(500));
        assert_eq!(policy.backoff(40), Duration::from_millis(500));
    }

    #[test]
    fn test_should_retry() {
        let policy = policy();
        assert!(policy.should_retry(0, &FailureReason::Timeout));
        assert!(policy.should_retry(2, &FailureReason::Status(502)));
        assert!(!policy.should_retry(3, &FailureReason::Timeout));
        assert!(!policy.should_retry(0, &FailureReason::NotFound));
        assert!(!policy.should_retry(0, &FailureReason::Status(400)));
        assert!(!policy.should_retry(0, &FailureReason::RateLimited));
        assert!(!RetryPolicy::none().should_retry(0, &FailureReason::Timeout));
    }
}
