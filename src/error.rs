use crate::constants::MIB;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Input path is not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Failed to decode image {0}: the file is empty")]
    EmptyImage(String),

    #[error("Failed to decode image {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode WebP: {0}")]
    Encode(String),

    #[error(
        "Image could not be compressed under {:.2}MB (final size: {:.2}MB)",
        bytes_to_mib(.limit),
        bytes_to_mib(.size)
    )]
    OutputTooLarge { size: u64, limit: u64 },

    #[error("Invalid compression options: {0}")]
    InvalidOptions(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Batch file count limit exceeded: {0} files, maximum allowed {1}")]
    BatchFileLimitExceeded(usize, usize),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl CompressionError {
    /// True when the input could not be turned into a bitmap at all.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::EmptyImage(_) | Self::Decode { .. })
    }
}

fn bytes_to_mib(bytes: &u64) -> f64 {
    *bytes as f64 / MIB as f64
}

pub type Result<T> = std::result::Result<T, CompressionError>;
