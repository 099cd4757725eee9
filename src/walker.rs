use crate::error::{OptimizeError, Result};
use crate::utils::is_image_file;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Lazily yields the image files under a directory.
///
/// Only files with a `.png`, `.jpg`, `.jpeg` or `.webp` extension are
/// returned. Entries of a directory come out in file-name order; symlinks are
/// not followed.
pub struct ImageWalker {
    inner: walkdir::IntoIter,
}

impl ImageWalker {
    /// # Errors
    /// * `OptimizeError::InvalidInputDirectory` - `root` is missing or is not
    ///   a directory
    pub fn new(root: &Path, recursive: bool) -> Result<Self> {
        if !root.is_dir() {
            return Err(OptimizeError::InvalidInputDirectory(root.to_path_buf()));
        }

        let mut walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }

        Ok(Self {
            inner: walker.into_iter(),
        })
    }
}

impl Iterator for ImageWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if entry.file_type().is_file() && is_image_file(entry.path()) {
                return Some(entry.into_path());
            }
        }
    }
}
