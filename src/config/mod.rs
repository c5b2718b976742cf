// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod components;
mod input;
mod loader;
mod luminary;
mod validation;

pub mod consts;

pub use components::{ComponentExpectation, ComponentTable};
pub use input::{load_input, InputDocument, RunRequest};
pub use loader::{
    load_and_validate_config, load_config, resolve_config_path, Config, ImageConfig,
    OverwritePolicy, ReaderConfig, TriggerConfig,
};
pub use luminary::{AreaGroup, AreaLayout, AreaSpec, LuminaryProfile};
pub use validation::{validate_config, validate_layout};
