// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Trigger protocol: scan, collect codes per area, retry until every area
//! has a code or the attempt budget is spent.
//!
//! ```text
//! Idle ──► Triggering ──► Evaluating ──┬──► Fulfilled
//!              ▲                       │
//!              └──── (delay) ◄─────────┼──► ExhaustedRetries
//! ```
//!
//! A failed trigger command is not fatal. It counts as an attempt that read
//! nothing, and the verdict is computed from whatever has been collected once
//! a terminal state is reached.

use std::fmt;

use crate::config::{OverwritePolicy, TriggerConfig};
use crate::engine::commands::{parse_trigger_response, DeviceCommand};
use crate::engine::{AreaNo, AreaResults, RetryPolicy};
use crate::observability::messages::inspection::{
    TriggerAttempt, TriggerCommandFailed, TriggerFinished, TriggerTransition,
};
use crate::observability::messages::StructuredLog;
use crate::traits::CommandChannel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Idle,
    Triggering,
    Evaluating,
    Fulfilled,
    ExhaustedRetries,
}

impl TriggerState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TriggerState::Fulfilled | TriggerState::ExhaustedRetries)
    }

    /// State after the codes of an attempt have been stored.
    pub fn after_evaluation(fulfilled: bool, attempts_remaining: bool) -> Self {
        if fulfilled {
            TriggerState::Fulfilled
        } else if attempts_remaining {
            TriggerState::Triggering
        } else {
            TriggerState::ExhaustedRetries
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TriggerState::Idle => "idle",
            TriggerState::Triggering => "triggering",
            TriggerState::Evaluating => "evaluating",
            TriggerState::Fulfilled => "fulfilled",
            TriggerState::ExhaustedRetries => "exhausted retries",
        }
    }
}

impl fmt::Display for TriggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal state and the number of trigger commands sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerOutcome {
    pub state: TriggerState,
    pub attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerProtocol {
    policy: RetryPolicy,
    bank: Option<u8>,
    overwrite: OverwritePolicy,
}

impl TriggerProtocol {
    pub fn new(policy: RetryPolicy, bank: Option<u8>, overwrite: OverwritePolicy) -> Self {
        Self {
            policy,
            bank,
            overwrite,
        }
    }

    pub fn from_config(config: &TriggerConfig, bank: Option<u8>) -> Self {
        Self::new(
            RetryPolicy::new(config.retry_count, config.retry_delay()),
            bank,
            config.overwrite,
        )
    }

    pub fn command(&self) -> DeviceCommand {
        DeviceCommand::Trigger { bank: self.bank }
    }

    /// Triggers until every area in `results` holds a non-empty code or
    /// `1 + retries` attempts have been made.
    pub async fn run<C>(&self, channel: &mut C, results: &mut AreaResults) -> TriggerOutcome
    where
        C: CommandChannel + ?Sized,
    {
        let command = self.command().to_string();
        let mut schedule = self.policy.schedule();
        let mut state = TriggerState::Idle;
        let mut attempt = 0;
        let mut response = String::new();

        while !state.is_terminal() {
            let next = match state {
                TriggerState::Idle => TriggerState::Triggering,
                TriggerState::Triggering => match schedule.next_attempt().await {
                    Some(n) => {
                        attempt = n;
                        response = self
                            .trigger(channel, &command, attempt, schedule.attempts_allowed())
                            .await;
                        TriggerState::Evaluating
                    }
                    None => TriggerState::ExhaustedRetries,
                },
                TriggerState::Evaluating => {
                    self.apply(&response, results);
                    TriggerState::after_evaluation(results.all_fulfilled(), schedule.has_remaining())
                }
                terminal => terminal,
            };

            TriggerTransition {
                from: state.as_str(),
                to: next.as_str(),
                attempt,
            }
            .log();
            state = next;
        }

        let outcome = TriggerOutcome {
            state,
            attempts: schedule.attempts_made(),
        };
        TriggerFinished {
            state: state.as_str(),
            attempts: outcome.attempts,
            fulfilled: results.fulfilled_count(),
            total: results.len(),
        }
        .log();

        outcome
    }

    /// Sends one trigger command. A failed command reads as an empty response.
    async fn trigger<C>(&self, channel: &mut C, command: &str, attempt: u32, attempts: u32) -> String
    where
        C: CommandChannel + ?Sized,
    {
        TriggerAttempt {
            command,
            attempt,
            attempts,
        }
        .log();

        match channel.exec(command).await {
            Ok(response) => response,
            Err(error) => {
                TriggerCommandFailed {
                    attempt,
                    error: &error,
                }
                .log();
                String::new()
            }
        }
    }

    /// Stores the codes of one response. Pairs whose area is missing,
    /// malformed or not assigned are dropped.
    fn apply(&self, response: &str, results: &mut AreaResults) {
        for read in parse_trigger_response(response) {
            let Some(area_no) = AreaNo::parse(read.area) else {
                continue;
            };
            if let Some(result) = results.get_mut(area_no) {
                result.record(read.code, self.overwrite);
            }
        }
    }
}
