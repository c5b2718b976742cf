// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // reader command channels
pub mod cli;        // command line surface
pub mod config;     // config, run input, validation
pub mod engine;     // assignment, trigger protocol, verdict
pub mod errors;     // error handling
pub mod imaging;    // result image annotation
pub mod observability;
pub mod traits;     // unified abstractions
