// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Result image handling.
//!
//! Before triggering, [`clear_stale_images`] empties the reader's image
//! directory. After the verdict, [`publish_result_image`] picks up the image
//! the reader wrote, outlines every area in the color of its result and
//! publishes it as `latest.jpg`.

pub mod annotate;
pub mod source;

use std::path::PathBuf;

use crate::config::ImageConfig;
use crate::engine::AreaResults;
use crate::errors::ImageError;
use crate::observability::messages::inspection::ImageSaved;
use crate::observability::messages::StructuredLog;

pub use annotate::{annotate, annotate_file, draw_outline, save_result};
pub use source::{clear_stale_images, latest_image, wait_for_image};

/// Waits for the run's image, annotates it with `results` and saves it.
pub async fn publish_result_image(
    config: &ImageConfig,
    results: &AreaResults,
) -> Result<PathBuf, ImageError> {
    let source = wait_for_image(&config.source_dir, source::POLL_ATTEMPTS, source::POLL_INTERVAL).await?;
    let saved = annotate_file(&source, results, &config.output_dir)?;
    ImageSaved { path: &saved }.log();
    Ok(saved)
}
