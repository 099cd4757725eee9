use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("Input directory '{}' not found or is not a directory", .0.display())]
    InvalidInputDirectory(PathBuf),

    #[error("Cannot identify image file: {0}")]
    UnreadableImage(String),

    #[error("Error during save/replace: {0}")]
    SaveFailed(String),

    #[error("Error optimizing: {0}")]
    ProcessingError(String),

    #[error("Invalid quality value: {0}. Must be between 0 and 100")]
    InvalidQuality(u8),

    #[error("Invalid maximum dimensions: {0}x{1}. Both must be positive")]
    InvalidDimensions(u32, u32),
}

impl OptimizeError {
    /// Short name of the failure kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            OptimizeError::InvalidInputDirectory(_) => "InvalidInputDirectory",
            OptimizeError::UnreadableImage(_) => "UnreadableImage",
            OptimizeError::SaveFailed(_) => "SaveFailed",
            OptimizeError::ProcessingError(_) => "ProcessingError",
            OptimizeError::InvalidQuality(_) | OptimizeError::InvalidDimensions(..) => {
                "InvalidOptions"
            }
        }
    }
}

impl From<std::io::Error> for OptimizeError {
    fn from(err: std::io::Error) -> Self {
        OptimizeError::ProcessingError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OptimizeError>;
