//! Console rendering of a run. Nothing outside this module prints.

use crate::batch::{BatchConfig, RunSummary};
use crate::error::{OptimizeError, Result};
use crate::processing::{Optimization, Outcome};
use crate::utils::{calculate_reduction_percent, format_kb};
use std::path::Path;

pub fn render_banner(config: &BatchConfig) -> String {
    let input = config
        .input_dir
        .canonicalize()
        .unwrap_or_else(|_| config.input_dir.clone());

    format!(
        "🚀 Starting IN-PLACE image optimization...\n\
         ⚠️  WARNING: This will OVERWRITE original files. Make sure you have a backup!\n\
         📁 Input directory: {}\n\
         📏 Max dimensions: {}x{}\n\
         🎯 JPEG/WEBP Quality: {}\n\
         🔁 Recursive search: {}\n\
         ---",
        input.display(),
        config.options.max_width,
        config.options.max_height,
        config.options.quality,
        config.recursive,
    )
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn render_optimization(name: &str, optimization: &Optimization) -> String {
    let mut line = format!(
        "{} ({}, {})...",
        name,
        optimization.format,
        format_kb(optimization.original_size)
    );

    if let Some((width, height)) = optimization.resized_to {
        line.push_str(&format!(" Resized to ({}, {}).", width, height));
    }
    if optimization.alpha_flattened {
        line.push_str(" Converting RGBA to RGB for JPEG.");
    }

    match optimization.outcome {
        Outcome::Saved { new_size } => line.push_str(&format!(
            " Saved: {} ({:.1}% reduction)",
            format_kb(new_size),
            optimization.reduction_percent()
        )),
        Outcome::Skipped => line.push_str(" Skipped: No resizing or optimization needed."),
    }

    line
}

/// One line describing what happened to `path`.
pub fn render_file_result(path: &Path, result: &Result<Optimization>) -> String {
    let name = file_name(path);
    match result {
        Ok(optimization) => render_optimization(&name, optimization),
        Err(OptimizeError::UnreadableImage(reason)) => {
            format!("{}... Skipped: Cannot identify image file {} ({}).", name, name, reason)
        }
        Err(OptimizeError::SaveFailed(reason)) => {
            format!("{}... Error during save/replace for {}: {}", name, name, reason)
        }
        Err(OptimizeError::ProcessingError(reason)) => {
            format!("{}... Error optimizing {}: {}", name, name, reason)
        }
        Err(err) => format!("{}... Error optimizing {}: {}", name, name, err),
    }
}

pub fn render_summary(summary: &RunSummary) -> String {
    if summary.is_empty() {
        return "---\n⚠️  No images found in the input directory matching the specified criteria."
            .to_string();
    }

    let mut out = format!(
        "---\n\
         ✅ In-place optimization complete.\n\
         📊 Images Attempted: {}\n\
         ✅ Images Successfully Optimized: {}\n\
         ❌ Images Failed: {}",
        summary.attempted, summary.succeeded, summary.failed
    );
    if summary.skipped > 0 {
        out.push_str(&format!("\n⏭️  Images Skipped: {}", summary.skipped));
    }
    out.push_str(&format!(
        "\n💾 Total size: {} -> {} ({:.1}% reduction)\n⏱️  Total time: {:.2?}",
        format_kb(summary.bytes_before),
        format_kb(summary.bytes_after),
        calculate_reduction_percent(summary.bytes_before, summary.bytes_after),
        summary.elapsed,
    ));
    out
}

/// Prints a run to stdout as it happens.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    /// Suppresses per-file lines; banner and summary still print
    pub quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn banner(&self, config: &BatchConfig) {
        println!("{}", render_banner(config));
    }

    pub fn file(&self, path: &Path, result: &Result<Optimization>) {
        if self.quiet {
            return;
        }
        match result {
            Ok(_) => println!("{}", render_file_result(path, result)),
            Err(_) => eprintln!("❌ {}", render_file_result(path, result)),
        }
    }

    pub fn summary(&self, summary: &RunSummary) {
        println!("\n{}", render_summary(summary));
    }
}
