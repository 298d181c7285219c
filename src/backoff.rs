//! Exponential backoff with jitter.
//!
//! The delay before retry `n` (0-based) grows as `base * 2^n`, is capped at
//! `max`, and then up to 50% of the capped value is added as random jitter.

use rand::Rng;
use std::time::Duration;

/// Base delay used by [`Backoff::default`].
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Cap applied to the exponential part of the delay by [`Backoff::default`].
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Backoff policy used between retry attempts.
///
/// # Examples
///
/// ```
/// use latindictionary::Backoff;
/// use std::time::Duration;
///
/// let backoff = Backoff::default();
/// assert_eq!(backoff.capped_delay(0), Duration::from_secs(1));
/// assert_eq!(backoff.capped_delay(3), Duration::from_secs(8));
/// assert_eq!(backoff.capped_delay(10), Duration::from_secs(30));
///
/// let delay = backoff.delay(0);
/// assert!(delay >= Duration::from_secs(1) && delay < Duration::from_millis(1500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// Delay before the first retry, before jitter.
    pub base_delay: Duration,
    /// Upper bound on the exponential part of the delay.
    pub max_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl Backoff {
    /// Creates a backoff policy with the given base and cap.
    pub fn new(base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            base_delay,
            max_delay,
        }
    }

    /// Returns `min(base * 2^attempt, max)` without jitter.
    ///
    /// Saturates at `max_delay` instead of overflowing for large attempts.
    pub fn capped_delay(&self, attempt: usize) -> Duration {
        let grown = u32::try_from(attempt)
            .ok()
            .and_then(|exp| 2u32.checked_pow(exp))
            .and_then(|multiplier| self.base_delay.checked_mul(multiplier));

        match grown {
            Some(delay) => delay.min(self.max_delay),
            None => self.max_delay,
        }
    }

    /// Returns the delay to wait after failed attempt `attempt` (0-based).
    ///
    /// The result lies in `[capped, 1.5 * capped)` where `capped` is
    /// [`capped_delay`](Self::capped_delay).
    pub fn delay(&self, attempt: usize) -> Duration {
        let capped = self.capped_delay(attempt);
        let jitter = rand::thread_rng().gen_range(0.0..0.5);
        capped + capped.mul_f64(jitter)
    }
}

/// Returns the delay after attempt `attempt` using the default policy
/// (1s base, 30s cap, up to 50% jitter).
pub fn calculate_backoff(attempt: usize) -> Duration {
    Backoff::default().delay(attempt)
}
