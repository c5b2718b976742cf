// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use luminary_inspect::backends::connect_with_retry;
use luminary_inspect::cli::{Cli, Commands};
use luminary_inspect::config::{
    load_and_validate_config, load_input, resolve_config_path, ComponentExpectation, Config,
    RunRequest,
};
use luminary_inspect::engine::{read_areas, InspectionContext};
use luminary_inspect::errors::{ConfigError, ImageError, InputError, InspectionError};
use luminary_inspect::imaging::{clear_stale_images, publish_result_image};
use luminary_inspect::observability::messages::inspection::InspectionAborted;
use luminary_inspect::observability::messages::StructuredLog;
use luminary_inspect::traits::CommandChannel;

/// A fatal error together with the reader's last error code, if a session existed.
struct Fatal {
    error: InspectionError,
    last_device_error: Option<String>,
}

macro_rules! fatal_from {
    ($($error:ty),*) => {
        $(
            impl From<$error> for Fatal {
                fn from(error: $error) -> Self {
                    Self {
                        error: error.into(),
                        last_device_error: None,
                    }
                }
            }
        )*
    };
}

fatal_from!(InspectionError, ConfigError, InputError, ImageError);

impl Fatal {
    fn with_session<C: CommandChannel + ?Sized>(error: InspectionError, channel: &C) -> Self {
        Self {
            error,
            last_device_error: channel.last_error().map(str::to_string),
        }
    }

    fn log(&self) {
        InspectionAborted {
            kind: self.error.kind(),
            error: &self.error,
            last_device_error: self.last_device_error.as_deref(),
        }
        .log();
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

fn load_config(explicit: Option<&Path>) -> Result<Config, Fatal> {
    let path = resolve_config_path(explicit, Path::new("."))?;
    tracing::info!(path = %path.display(), "Reading the config...");
    Ok(load_and_validate_config(&path)?)
}

async fn trigger(
    config: Config,
    luminary: Option<String>,
    bank: Option<u8>,
    components: Vec<ComponentExpectation>,
    input: Option<PathBuf>,
) -> Result<(), Fatal> {
    let document = input.as_deref().map(load_input).transpose()?;
    let request = RunRequest::assemble(document, luminary, bank, components)?;

    // everything below the reader is checked before connecting
    let context = InspectionContext::prepare(&config, &request)?;

    if let Some(images) = &config.images {
        clear_stale_images(&images.source_dir)?;
    }

    let mut channel = connect_with_retry(&config.reader).await?;
    let report = match context.run(&mut channel).await {
        Ok(report) => report,
        Err(error) => return Err(Fatal::with_session(error, &channel)),
    };

    if let Some(images) = &config.images {
        publish_result_image(images, &report.results).await?;
    }

    println!("{}", report.verdict());
    Ok(())
}

async fn areas(config: Config) -> Result<(), Fatal> {
    let mut channel = connect_with_retry(&config.reader).await?;
    let outcome = read_areas(&mut channel).await;
    channel.close().await;

    let areas = outcome.map_err(|error| Fatal::with_session(error, &channel))?;
    for (area_no, area) in areas {
        println!(
            "{}: {{\"x1\":{},\"y1\":{},\"x2\":{},\"y2\":{}}}",
            area_no, area.x1, area.y1, area.x2, area.y2
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing()?;
    let cli = Cli::parse();

    let outcome = match load_config(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Trigger {
                luminary,
                bank,
                components,
                input,
            } => trigger(config, luminary, bank, components, input).await,
            Commands::Areas => areas(config).await,
        },
        Err(fatal) => Err(fatal),
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(fatal) => {
            fatal.log();
            Ok(ExitCode::FAILURE)
        }
    }
}
