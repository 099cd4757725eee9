use crate::error::{OptimizeError, Result};
use crate::processing::{optimize_image, OptimizeOptions, Optimization};
use crate::walker::ImageWalker;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

/// Everything a run needs, fixed for its whole duration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub options: OptimizeOptions,
    pub recursive: bool,
}

/// Counters aggregated over a run
///
/// `attempted == succeeded + failed` always holds; skipped files count as
/// succeeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn is_empty(&self) -> bool {
        self.attempted == 0
    }

    fn record(&mut self, result: &Result<Optimization>) {
        self.attempted += 1;
        match result {
            Ok(optimization) => {
                self.succeeded += 1;
                if optimization.is_skipped() {
                    self.skipped += 1;
                }
                self.bytes_before += optimization.original_size;
                self.bytes_after += optimization.new_size();
            }
            Err(_) => self.failed += 1,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause")
}

/// Runs one file's work and turns a panic inside the codecs into a per-file
/// `ProcessingError`.
fn run_isolated<F>(work: F) -> Result<Optimization>
where
    F: FnOnce() -> Result<Optimization>,
{
    panic::catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|payload| {
        Err(OptimizeError::ProcessingError(format!(
            "codec panicked while processing the image: {}",
            panic_message(payload.as_ref())
        )))
    })
}

/// Optimizes every image under `config.input_dir`, one file at a time.
///
/// `on_file` is called with each path and its result as soon as the file is
/// done. Per-file failures are reported there and never stop the run.
///
/// # Errors
/// * `OptimizeError::InvalidInputDirectory` - Nothing was processed
pub fn optimize_directory<F>(config: &BatchConfig, mut on_file: F) -> Result<RunSummary>
where
    F: FnMut(&Path, &Result<Optimization>),
{
    let start = Instant::now();
    let walker = ImageWalker::new(&config.input_dir, config.recursive)?;
    let mut summary = RunSummary::default();

    for path in walker {
        let result = run_isolated(|| optimize_image(&path, &config.options));
        if let Err(err) = &result {
            debug!(path = %path.display(), kind = err.kind(), "file failed");
        }
        summary.record(&result);
        on_file(&path, &result);
    }

    summary.elapsed = start.elapsed();
    debug!(?summary, "run finished");
    Ok(summary)
}
