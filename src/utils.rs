//! Utility functions shared by the optimizer and the reporter

use crate::constants::{BYTES_PER_KB, SUPPORTED_IMAGE_EXTENSIONS};
use std::path::Path;

/// Check if a file path carries one of the extensions the walker looks for
///
/// # Arguments
/// * `path` - The file path to check
///
/// # Returns
/// * `true` for `.png`, `.jpg`, `.jpeg` and `.webp` in any letter case
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Size in kilobytes with one decimal, e.g. `"12.5KB"`
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1}KB", bytes as f64 / BYTES_PER_KB)
}

/// Size reduction as a percentage of the original
///
/// # Arguments
/// * `original_size` - Original file size in bytes
/// * `new_size` - Size after optimization in bytes
///
/// # Returns
/// * Positive for a smaller file, negative if it grew, 0 for an empty original
pub fn calculate_reduction_percent(original_size: u64, new_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
}
