//! Retry Policy
//!
//! Bounded, fixed-backoff retry around one round trip. Only errors that
//! `BloomError::is_retryable` accepts are retried.

use std::thread;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::Result;

/// Retry policy for a single logical operation
///
/// The attempt counter lives on the stack of `run`, so nothing carries over
/// from one operation to the next.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first (always at least 1)
    max_attempts: u32,

    /// Delay between a failed attempt and the next one
    backoff: Duration,

    /// How to wait out the backoff
    sleep: fn(Duration),
}

impl RetryPolicy {
    /// `max_retries` counts every attempt; zero behaves like one.
    pub fn new(max_retries: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_retries.max(1),
            backoff,
            sleep: thread::sleep,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.max_retries, config.backoff())
    }

    /// Replace the function used to wait between attempts
    pub fn with_sleep(mut self, sleep: fn(Duration)) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `attempt` until it succeeds, fails for good, or the bound is hit
    ///
    /// The closure receives the 1-based attempt number. The last error is
    /// returned unchanged.
    pub fn run<T, F>(&self, mut attempt: F) -> Result<T>
    where
        F: FnMut(u32) -> Result<T>,
    {
        let mut current = 1;
        loop {
            let err = match attempt(current) {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if !err.is_retryable() {
                return Err(err);
            }

            if current >= self.max_attempts {
                tracing::error!("Giving up after {} attempt(s): {}", current, err);
                return Err(err);
            }

            tracing::warn!(
                "Attempt {}/{} failed: {}; retrying in {:?}",
                current,
                self.max_attempts,
                err,
                self.backoff
            );
            (self.sleep)(self.backoff);
            current += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}
