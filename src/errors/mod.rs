// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod channel;
mod config;
mod inspection;

pub use channel::ChannelError;
pub use config::{ConfigError, InputError, ValidationError};
pub use inspection::{ImageError, InspectionError};
