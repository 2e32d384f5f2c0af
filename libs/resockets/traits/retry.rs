use std::time::Duration;

/// Schedules reconnection attempts.
///
/// The connection driver consults the policy once per unexpected
/// disconnect, passing the number of retries already made. A returned
/// delay arms the backoff timer; `None` stops reconnection for good.
pub trait RetryPolicy: Send + Sync {
    /// Delay before reconnection attempt `attempt` (0-indexed), or
    /// `None` when the budget is spent.
    fn next_delay(&self, attempt: usize) -> Option<Duration>;
}

/// Fixed interval between attempts, with an optional attempt budget.
///
/// This is the client's default policy: 3 seconds between attempts,
/// budget of 5.
#[derive(Debug, Clone)]
pub struct FixedInterval {
    interval: Duration,
    budget: Option<usize>,
}

impl FixedInterval {
    /// # Arguments
    /// * `interval` - Delay applied before every attempt
    /// * `budget` - Maximum number of attempts (None = unlimited)
    pub fn new(interval: Duration, budget: Option<usize>) -> Self {
        Self { interval, budget }
    }
}

impl Default for FixedInterval {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000), Some(5))
    }
}

impl RetryPolicy for FixedInterval {
    fn next_delay(&self, attempt: usize) -> Option<Duration> {
        match self.budget {
            Some(max) if attempt >= max => None,
            _ => Some(self.interval),
        }
    }
}

/// Exponentially growing delay (`base * 2^attempt`), capped at a
/// maximum, with an optional attempt budget.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    base: Duration,
    cap: Duration,
    budget: Option<usize>,
}

impl ExponentialBackoff {
    /// # Arguments
    /// * `base` - Delay before the first attempt
    /// * `cap` - Largest delay ever returned
    /// * `budget` - Maximum number of attempts (None = unlimited)
    pub fn new(base: Duration, cap: Duration, budget: Option<usize>) -> Self {
        Self { base, cap, budget }
    }
}

impl RetryPolicy for ExponentialBackoff {
    fn next_delay(&self, attempt: usize) -> Option<Duration> {
        if let Some(max) = self.budget {
            if attempt >= max {
                return None;
            }
        }
        let base = self.base.as_millis() as u64;
        let cap = self.cap.as_millis() as u64;
        // saturate instead of overflowing at high attempt counts
        let factor = 1u64.checked_shl(attempt as u32).unwrap_or(u64::MAX);
        let delay = base.saturating_mul(factor);
        Some(Duration::from_millis(delay.min(cap)))
    }
}

/// Never reconnect: every disconnect is final.
#[derive(Debug, Clone, Copy)]
pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn next_delay(&self, _attempt: usize) -> Option<Duration> {
        None
    }
}
