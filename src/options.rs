use crate::constants::{MAX_DIMENSION, MAX_ORIGINAL_SIZE, MAX_OUTPUT_SIZE, QUALITY_LADDER};
use crate::error::{CompressionError, Result};

/// Thresholds shared by the intake validator and the compressor.
///
/// `Default` carries the production values; tests and the CLI override single
/// fields with the builder methods and then call [`CompressionOptions::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionOptions {
    pub max_original_size: u64,
    pub max_dimension: u32,
    /// Encoder qualities in `(0, 1]`, tried in order until the output fits
    pub qualities: Vec<f32>,
    pub max_output_size: u64,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_original_size: MAX_ORIGINAL_SIZE,
            max_dimension: MAX_DIMENSION,
            qualities: QUALITY_LADDER.to_vec(),
            max_output_size: MAX_OUTPUT_SIZE,
        }
    }
}

impl CompressionOptions {
    pub fn new(max_dimension: Option<u32>, max_output_size: Option<u64>) -> Result<Self> {
        let defaults = Self::default();
        let options = Self {
            max_dimension: max_dimension.unwrap_or(defaults.max_dimension),
            max_output_size: max_output_size.unwrap_or(defaults.max_output_size),
            ..defaults
        };
        options.validate()?;
        Ok(options)
    }

    pub fn with_max_original_size(mut self, bytes: u64) -> Self {
        self.max_original_size = bytes;
        self
    }

    pub fn with_max_dimension(mut self, pixels: u32) -> Self {
        self.max_dimension = pixels;
        self
    }

    pub fn with_qualities(mut self, qualities: impl Into<Vec<f32>>) -> Self {
        self.qualities = qualities.into();
        self
    }

    pub fn with_max_output_size(mut self, bytes: u64) -> Self {
        self.max_output_size = bytes;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.qualities.is_empty() {
            return Err(CompressionError::InvalidOptions(
                "quality ladder must not be empty".to_string(),
            ));
        }
        if let Some(q) = self
            .qualities
            .iter()
            .find(|&&q| !(q > 0.0 && q <= 1.0))
        {
            return Err(CompressionError::InvalidOptions(format!(
                "quality {} is outside (0, 1]",
                q
            )));
        }
        if self.qualities.windows(2).any(|pair| pair[1] >= pair[0]) {
            return Err(CompressionError::InvalidOptions(
                "quality ladder must be strictly decreasing".to_string(),
            ));
        }
        if self.max_dimension == 0 {
            return Err(CompressionError::InvalidOptions(
                "max dimension must be positive".to_string(),
            ));
        }
        if self.max_output_size == 0 || self.max_output_size > self.max_original_size {
            return Err(CompressionError::InvalidOptions(format!(
                "max output size must be between 1 and {} bytes",
                self.max_original_size
            )));
        }
        Ok(())
    }
}
