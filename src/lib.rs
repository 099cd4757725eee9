pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod formats;
pub mod logger;
pub mod processing;
pub mod replace;
pub mod report;
pub mod utils;
pub mod walker;

pub use batch::{optimize_directory, BatchConfig, RunSummary};
pub use error::{OptimizeError, Result};
pub use formats::{EncodePlan, SourceFormat};
pub use processing::{
    encode_image, fit_within, load_image, optimize_image, resize_to_fit, Optimization,
    OptimizeOptions, Outcome,
};
pub use replace::replace_atomically;
pub use utils::{calculate_reduction_percent, is_image_file};
pub use walker::ImageWalker;
