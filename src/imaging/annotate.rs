// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Result image: the reader's picture with every area outlined in the color
//! of its check result.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use crate::config::AreaSpec;
use crate::engine::AreaResults;
use crate::errors::ImageError;

pub const VALID_COLOR: Rgb<u8> = Rgb([173, 255, 47]);
pub const INVALID_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Outline thickness in pixels, centered on the area border.
pub const OUTLINE_WIDTH: u32 = 8;

pub const LATEST_FILE: &str = "latest.jpg";
pub const PREVIOUS_FILE: &str = "previous.jpg";
const PENDING_FILE: &str = "latest.tmp.jpg";

/// Fills `[x0, x1) x [y0, y1)` clipped to the image.
fn fill(image: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let (width, height) = (image.width() as i64, image.height() as i64);
    for y in y0.max(0)..y1.min(height) {
        for x in x0.max(0)..x1.min(width) {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Draws the border of `area` with an [`OUTLINE_WIDTH`] pen.
pub fn draw_outline(image: &mut RgbImage, area: &AreaSpec, color: Rgb<u8>) {
    let half = (OUTLINE_WIDTH / 2) as i64;
    let (left, right) = (area.x1.min(area.x2) as i64, area.x1.max(area.x2) as i64);
    let (top, bottom) = (area.y1.min(area.y2) as i64, area.y1.max(area.y2) as i64);

    let (outer_left, outer_right) = (left - half, right + half);

    fill(image, outer_left, top - half, outer_right, top + half, color);
    fill(image, outer_left, bottom - half, outer_right, bottom + half, color);
    fill(image, left - half, top, left + half, bottom, color);
    fill(image, right - half, top, right + half, bottom, color);
}

/// Outlines every area: green-yellow when valid, red otherwise.
pub fn annotate(image: &mut RgbImage, results: &AreaResults) {
    for (_, result) in results.iter() {
        let color = if result.is_valid() {
            VALID_COLOR
        } else {
            INVALID_COLOR
        };
        draw_outline(image, &result.area, color);
    }
}

/// Writes `image` as `latest.jpg` in `output_dir`, keeping the prior latest
/// as `previous.jpg`.
pub fn save_result(image: &RgbImage, output_dir: &Path) -> Result<PathBuf, ImageError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ImageError::Io { path, source }
    };

    fs::create_dir_all(output_dir).map_err(io_error(output_dir))?;

    let pending = output_dir.join(PENDING_FILE);
    let latest = output_dir.join(LATEST_FILE);
    let previous = output_dir.join(PREVIOUS_FILE);

    image.save(&pending).map_err(|source| ImageError::Codec {
        path: pending.clone(),
        source,
    })?;

    if latest.exists() {
        if previous.exists() {
            fs::remove_file(&previous).map_err(io_error(&previous))?;
        }
        fs::rename(&latest, &previous).map_err(io_error(&latest))?;
    }
    fs::rename(&pending, &latest).map_err(io_error(&pending))?;

    Ok(latest)
}

/// Annotates the image at `source`, saves the result into `output_dir` and
/// removes the source file.
pub fn annotate_file(
    source: &Path,
    results: &AreaResults,
    output_dir: &Path,
) -> Result<PathBuf, ImageError> {
    let mut image = image::open(source)
        .map_err(|e| ImageError::Codec {
            path: source.to_path_buf(),
            source: e,
        })?
        .to_rgb8();

    annotate(&mut image, results);
    let saved = save_result(&image, output_dir)?;

    fs::remove_file(source).map_err(|e| ImageError::Io {
        path: source.to_path_buf(),
        source: e,
    })?;

    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ComponentExpectation, OverwritePolicy};
    use crate::engine::{AreaNo, AreaResult};

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn results(codes: &[(AreaSpec, &str)]) -> AreaResults {
        let mut results = AreaResults::new();
        for (n, (area, code)) in codes.iter().enumerate() {
            let mut result =
                AreaResult::new(*area, ComponentExpectation::new("7001", "123", 1).unwrap());
            result.record(code, OverwritePolicy::Always);
            results.insert(AreaNo::new(n as u16 + 1).unwrap(), result);
        }
        results
    }

    #[test]
    fn test_outline_is_centered_on_border() {
        let mut image = RgbImage::new(64, 64);
        draw_outline(&mut image, &AreaSpec::new(20, 20, 44, 44), VALID_COLOR);

        assert_eq!(*image.get_pixel(20, 20), VALID_COLOR);
        assert_eq!(*image.get_pixel(30, 16), VALID_COLOR);
        assert_eq!(*image.get_pixel(30, 23), VALID_COLOR);
        assert_eq!(*image.get_pixel(30, 15), BLACK);
        assert_eq!(*image.get_pixel(30, 24), BLACK);
        assert_eq!(*image.get_pixel(32, 32), BLACK);
        assert_eq!(*image.get_pixel(47, 30), VALID_COLOR);
        assert_eq!(*image.get_pixel(48, 30), BLACK);
    }

    #[test]
    fn test_outline_is_clipped_to_image() {
        let mut image = RgbImage::new(16, 16);
        draw_outline(&mut image, &AreaSpec::new(0, 0, 100, 100), INVALID_COLOR);
        assert_eq!(*image.get_pixel(0, 0), INVALID_COLOR);
        assert_eq!(*image.get_pixel(8, 8), BLACK);
    }

    #[test]
    fn test_colors_follow_validity() {
        let mut image = RgbImage::new(64, 64);
        let results = results(&[
            (AreaSpec::new(8, 8, 24, 24), "ABC123"),
            (AreaSpec::new(36, 36, 56, 56), "ABC"),
        ]);

        annotate(&mut image, &results);

        assert_eq!(*image.get_pixel(8, 16), VALID_COLOR);
        assert_eq!(*image.get_pixel(36, 46), INVALID_COLOR);
    }

    #[test]
    fn test_save_result_rotates_previous() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("results");

        let first = save_result(&RgbImage::new(8, 8), &output).unwrap();
        assert_eq!(first, output.join(LATEST_FILE));
        assert!(!output.join(PREVIOUS_FILE).exists());

        save_result(&RgbImage::new(16, 16), &output).unwrap();
        save_result(&RgbImage::new(24, 24), &output).unwrap();

        let previous = image::open(output.join(PREVIOUS_FILE)).unwrap();
        let latest = image::open(output.join(LATEST_FILE)).unwrap();
        assert_eq!(previous.width(), 16);
        assert_eq!(latest.width(), 24);
        assert!(!output.join(PENDING_FILE).exists());
    }

    #[test]
    fn test_annotate_file_consumes_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("IMG_0001.jpg");
        RgbImage::new(32, 32).save(&source).unwrap();

        let results = results(&[(AreaSpec::new(4, 4, 20, 20), "ABC123")]);
        let saved = annotate_file(&source, &results, &dir.path().join("out")).unwrap();

        assert!(saved.exists());
        assert!(!source.exists());
    }

    #[test]
    fn test_unreadable_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.jpg");
        fs::write(&source, b"not a jpeg").unwrap();

        let err = annotate_file(&source, &AreaResults::new(), dir.path()).unwrap_err();
        assert!(matches!(err, ImageError::Codec { .. }));
    }
}
