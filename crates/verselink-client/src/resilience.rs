//! Retry policy for backend requests.

use backon::ExponentialBuilder;
use std::time::Duration;

/// Exponential backoff applied to transient backend failures.
///
/// Only [`Error::NetworkFailure`](verselink_core::Error::NetworkFailure) is
/// retried; malformed data fails immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: usize) -> Self {
        Self {
            max_retries,
            min_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }

    /// Fail on the first error.
    pub fn none() -> Self {
        Self::new(0)
    }

    #[must_use]
    pub fn with_delays(mut self, min_delay: Duration, max_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self.max_delay = max_delay.max(min_delay);
        self
    }

    pub(crate) fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries)
            .with_jitter()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}
