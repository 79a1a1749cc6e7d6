//! Reconnect timing for the push channel
//!
//! Exponential backoff between connection attempts. A successful handshake
//! resets the delay; every failure doubles it up to the configured ceiling.

use std::time::{Duration, Instant};

/// Configuration for reconnect timing
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Delay after the first failure
    pub initial_delay: Duration,
    /// Ceiling for the delay
    pub max_delay: Duration,
}

impl BackoffConfig {
    pub fn new(initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            initial_delay,
            max_delay: max_delay.max(initial_delay),
        }
    }
}

#[derive(Debug)]
pub struct ReconnectTimer {
    config: BackoffConfig,
    consecutive_failures: u32,
    retry_at: Option<Instant>,
}

impl ReconnectTimer {
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            config,
            consecutive_failures: 0,
            retry_at: None,
        }
    }

    /// Delay the next failure will impose.
    pub fn current_delay(&self) -> Duration {
        if self.consecutive_failures == 0 {
            return Duration::ZERO;
        }
        let exponent = (self.consecutive_failures - 1).min(16);
        self.config
            .initial_delay
            .saturating_mul(1u32 << exponent)
            .min(self.config.max_delay)
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Check if a new attempt can proceed
    pub fn can_proceed(&mut self) -> bool {
        self.time_until_next() == Duration::ZERO
    }

    /// Record a successful handshake
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
        self.retry_at = None;
    }

    /// Record a failed or dropped connection and return the delay before the next attempt
    pub fn record_failure(&mut self) -> Duration {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        let delay = self.current_delay();
        self.retry_at = Some(Instant::now() + delay);
        delay
    }

    /// Get time until the next attempt is allowed
    pub fn time_until_next(&mut self) -> Duration {
        let now = Instant::now();
        match self.retry_at {
            Some(retry_at) if now < retry_at => retry_at.duration_since(now),
            Some(_) => {
                // Clear expired delay
                self.retry_at = None;
                Duration::ZERO
            }
            None => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer() -> ReconnectTimer {
        ReconnectTimer::new(BackoffConfig::new(
            Duration::from_secs(1),
            Duration::from_secs(30),
        ))
    }

    #[test]
    fn first_attempt_is_immediate() {
        let mut timer = timer();
        assert!(timer.can_proceed());
        assert_eq!(timer.current_delay(), Duration::ZERO);
    }

    #[test]
    fn delay_doubles_up_to_ceiling() {
        let mut timer = timer();
        let delays: Vec<u64> = (0..7).map(|_| timer.record_failure().as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 16, 30, 30]);
    }

    #[test]
    fn failure_blocks_until_delay_elapses() {
        let mut timer = timer();
        timer.record_failure();
        assert!(!timer.can_proceed());
        let remaining = timer.time_until_next();
        assert!(remaining.as_millis() > 900);
        assert!(remaining.as_millis() <= 1000);
    }

    #[test]
    fn success_resets_backoff() {
        let mut timer = timer();
        timer.record_failure();
        timer.record_failure();
        timer.record_success();
        assert_eq!(timer.consecutive_failures(), 0);
        assert!(timer.can_proceed());
        assert_eq!(timer.record_failure(), Duration::from_secs(1));
    }

    #[test]
    fn many_failures_do_not_overflow() {
        let mut timer = timer();
        for _ in 0..100 {
            timer.record_failure();
        }
        assert_eq!(timer.current_delay(), Duration::from_secs(30));
    }
}
