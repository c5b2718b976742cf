// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ComponentExpectation;

#[derive(Parser, Debug)]
#[command(
    name = "luminary-inspect",
    version,
    about = "Optical inspection of luminary components with an SR-series code reader"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Config file (default: config.production.yaml, then config.yaml)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure the reader, trigger it and print OK or NOK
    Trigger {
        #[arg(long, help = "Luminary name as declared in the config")]
        luminary: Option<String>,
        #[arg(
            long,
            value_parser = clap::value_parser!(u8).range(0..=99),
            help = "Reader bank; 0 keeps the reader's current bank"
        )]
        bank: Option<u8>,
        #[arg(
            long = "component",
            value_name = "ITEM/MATERIAL[/QTY]",
            help = "Expected component; repeatable"
        )]
        components: Vec<ComponentExpectation>,
        #[arg(long, help = "JSON or YAML input file with bank, luminary and components")]
        input: Option<PathBuf>,
    },
    /// Print the areas currently configured on the reader
    Areas,
}
