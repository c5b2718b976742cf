// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Bounded retry with a fixed delay.
//!
//! A [`RetryPolicy`] allows `1 + retries` attempts and waits `delay` between
//! two consecutive attempts, never after the last one. Operations that own
//! their inputs use [`RetryPolicy::execute`]; loops that need to mutate
//! borrowed state between attempts drive a [`RetrySchedule`] directly.

use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    retries: u32,
    delay: Duration,
}

/// A value produced within the retry budget.
#[derive(Debug, PartialEq)]
pub struct Retried<T> {
    pub value: T,
    pub attempts: u32,
}

/// Every attempt failed; carries the last error.
#[derive(Debug, PartialEq)]
pub struct RetryExhausted<E> {
    pub error: E,
    pub attempts: u32,
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    /// A single attempt without retries.
    pub fn once() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Total attempts allowed, including the first one.
    pub fn attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&self) -> RetrySchedule {
        RetrySchedule {
            policy: *self,
            made: 0,
        }
    }

    /// Runs `operation` until it succeeds or the budget is spent.
    ///
    /// The closure receives the 1-based attempt number.
    ///
    /// ```
    /// use luminary_inspect::engine::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let policy = RetryPolicy::new(2, Duration::ZERO);
    /// let outcome = policy
    ///     .execute(|attempt| async move { if attempt < 3 { Err(attempt) } else { Ok("up") } })
    ///     .await
    ///     .unwrap();
    /// assert_eq!(outcome.value, "up");
    /// assert_eq!(outcome.attempts, 3);
    /// # }
    /// ```
    pub async fn execute<T, E, F, Fut>(&self, mut operation: F) -> Result<Retried<T>, RetryExhausted<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut schedule = self.schedule();
        loop {
            let attempt = schedule.begin().await;
            match operation(attempt).await {
                Ok(value) => return Ok(Retried { value, attempts: attempt }),
                Err(error) if !schedule.has_remaining() => {
                    return Err(RetryExhausted { error, attempts: attempt })
                }
                Err(_) => {}
            }
        }
    }
}

/// Attempt bookkeeping for one retried operation.
#[derive(Debug)]
pub struct RetrySchedule {
    policy: RetryPolicy,
    made: u32,
}

impl RetrySchedule {
    /// Starts the next attempt, or returns `None` once the budget is spent.
    ///
    /// Sleeps for the policy delay before every attempt but the first.
    pub async fn next_attempt(&mut self) -> Option<u32> {
        if !self.has_remaining() {
            return None;
        }
        Some(self.begin().await)
    }

    async fn begin(&mut self) -> u32 {
        if self.made > 0 && !self.policy.delay.is_zero() {
            tokio::time::sleep(self.policy.delay).await;
        }
        self.made += 1;
        self.made
    }

    pub fn has_remaining(&self) -> bool {
        self.made < self.policy.attempts()
    }

    /// Attempts started so far.
    pub fn attempts_made(&self) -> u32 {
        self.made
    }

    pub fn attempts_allowed(&self) -> u32 {
        self.policy.attempts()
    }
}
