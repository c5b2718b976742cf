// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! One inspection run, from assignment to verdict.
//!
//! [`InspectionContext::prepare`] does all the work that needs no reader, so
//! configuration and input mistakes are reported before a connection is made.
//! [`InspectionContext::run`] then owns the reader session for the rest of the
//! cycle and closes it on every exit path.

use crate::config::{Config, RunRequest};
use crate::engine::assignment::plan_areas;
use crate::engine::configure::configure_reader;
use crate::engine::trigger::{TriggerOutcome, TriggerProtocol};
use crate::engine::verdict::{evaluate, InspectionVerdict, Verdict};
use crate::engine::AreaResults;
use crate::errors::InspectionError;
use crate::traits::CommandChannel;

/// Result of a completed inspection, whatever the verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionReport {
    pub luminary: String,
    pub results: AreaResults,
    pub trigger: TriggerOutcome,
    pub verdict: InspectionVerdict,
}

impl InspectionReport {
    pub fn verdict(&self) -> Verdict {
        self.verdict.verdict()
    }
}

#[derive(Debug, Clone)]
pub struct InspectionContext {
    luminary: String,
    results: AreaResults,
    trigger: TriggerProtocol,
}

impl InspectionContext {
    /// Selects the profile and assigns areas for `request`.
    ///
    /// The trigger bank is the request's bank when given, otherwise the
    /// configured default.
    pub fn prepare(config: &Config, request: &RunRequest) -> Result<Self, InspectionError> {
        let results = plan_areas(config, request)?;
        let bank = request.bank.unwrap_or(config.bank);

        Ok(Self {
            luminary: request.luminary.clone(),
            results,
            trigger: TriggerProtocol::from_config(&config.trigger, Some(bank)),
        })
    }

    pub fn luminary(&self) -> &str {
        &self.luminary
    }

    pub fn results(&self) -> &AreaResults {
        &self.results
    }

    pub fn trigger(&self) -> &TriggerProtocol {
        &self.trigger
    }

    /// Configures the reader, triggers, and evaluates the reads.
    ///
    /// The channel is closed before returning, on success and on error alike.
    pub async fn run<C>(self, channel: &mut C) -> Result<InspectionReport, InspectionError>
    where
        C: CommandChannel + ?Sized,
    {
        let outcome = self.execute(channel).await;
        channel.close().await;
        outcome
    }

    async fn execute<C>(mut self, channel: &mut C) -> Result<InspectionReport, InspectionError>
    where
        C: CommandChannel + ?Sized,
    {
        configure_reader(channel, &self.results).await?;

        let trigger = self.trigger.run(channel, &mut self.results).await;

        let verdict = evaluate(&self.results);
        verdict.log();

        Ok(InspectionReport {
            luminary: self.luminary,
            results: self.results,
            trigger,
            verdict,
        })
    }
}
