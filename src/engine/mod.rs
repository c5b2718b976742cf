// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod assignment;
pub mod commands;
pub mod configure;
pub mod context;
pub mod model;
pub mod readback;
pub mod retry;
pub mod trigger;
pub mod verdict;
#[cfg(test)]
pub mod integration_tests;

pub use context::{InspectionContext, InspectionReport};
pub use model::{AreaNo, AreaResult, AreaResults, AreaValidity};
pub use readback::read_areas;
pub use retry::{Retried, RetryExhausted, RetryPolicy, RetrySchedule};
pub use trigger::{TriggerOutcome, TriggerProtocol, TriggerState};
pub use verdict::{evaluate, InspectionVerdict, Verdict};
