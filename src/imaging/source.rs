// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The reader's image directory.
//!
//! The reader drops one JPEG per trigger into its image directory. Stale
//! images are removed before triggering, so after the cycle the newest file
//! name belongs to the image of this run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::engine::RetryPolicy;
use crate::errors::ImageError;

pub const POLL_ATTEMPTS: u32 = 10;
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg"))
}

/// JPEG files in `dir`, sorted by file name. A missing directory has none.
fn list_images(dir: &Path) -> Result<Vec<PathBuf>, ImageError> {
    let io_error = |source: io::Error| ImageError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(e)),
    };

    let mut images = Vec::new();
    for entry in entries {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && is_jpeg(&path) {
            images.push(path);
        }
    }
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// Removes every JPEG from `dir` and returns how many were removed.
pub fn clear_stale_images(dir: &Path) -> Result<usize, ImageError> {
    let images = list_images(dir)?;
    for path in &images {
        fs::remove_file(path).map_err(|source| ImageError::Io {
            path: path.clone(),
            source,
        })?;
    }
    if !images.is_empty() {
        tracing::debug!(dir = %dir.display(), removed = images.len(), "Removed stale images");
    }
    Ok(images.len())
}

/// The JPEG in `dir` whose file name sorts last.
pub fn latest_image(dir: &Path) -> Result<Option<PathBuf>, ImageError> {
    Ok(list_images(dir)?.pop())
}

/// Polls `dir` until an image appears; `attempts` looks at most, `interval` apart.
pub async fn wait_for_image(
    dir: &Path,
    attempts: u32,
    interval: Duration,
) -> Result<PathBuf, ImageError> {
    let mut schedule = RetryPolicy::new(attempts.saturating_sub(1), interval).schedule();

    while schedule.next_attempt().await.is_some() {
        if let Some(path) = latest_image(dir)? {
            return Ok(path);
        }
    }

    Err(ImageError::NoImage {
        dir: dir.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"jpeg").unwrap();
        path
    }

    #[test]
    fn test_latest_image_sorts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "IMG_0001.jpg");
        touch(dir.path(), "IMG_0003.txt");
        let expected = touch(dir.path(), "IMG_0002.JPG");

        assert_eq!(latest_image(dir.path()).unwrap(), Some(expected));
    }

    #[test]
    fn test_clear_stale_images_keeps_other_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "b.JPG");
        let other = touch(dir.path(), "notes.txt");

        assert_eq!(clear_stale_images(dir.path()).unwrap(), 2);
        assert!(other.exists());
        assert_eq!(latest_image(dir.path()).unwrap(), None);
    }

    #[test]
    fn test_missing_directory_has_no_images() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("IMAGE");
        assert_eq!(clear_stale_images(&missing).unwrap(), 0);
        assert_eq!(latest_image(&missing).unwrap(), None);
    }

    #[tokio::test]
    async fn test_wait_for_image_gives_up() {
        let dir = tempfile::tempdir().unwrap();
        let err = wait_for_image(dir.path(), 2, Duration::from_millis(5))
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::NoImage { .. }));
    }

    #[tokio::test]
    async fn test_wait_for_image_finds_existing_image() {
        let dir = tempfile::tempdir().unwrap();
        let expected = touch(dir.path(), "IMG_0001.jpg");
        let found = wait_for_image(dir.path(), POLL_ATTEMPTS, POLL_INTERVAL)
            .await
            .unwrap();
        assert_eq!(found, expected);
    }
}
