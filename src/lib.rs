pub mod logger;

pub mod batch;
pub mod cli;
pub mod constants;
pub mod encoder;
pub mod error;
pub mod formats;
pub mod gif;
pub mod info;
pub mod options;
pub mod processing;
pub mod source;
pub mod utils;
pub mod validation;

pub use batch::{batch_compress_images, collect_image_files, is_image_file, BatchReport};
pub use encoder::{QualityEncoder, WebpEncoder};
pub use error::{CompressionError, Result};
pub use formats::{webp_file_name, MediaType};
pub use info::{describe_image, print_image_report, CompressionPlan, ImageReport};
pub use options::CompressionOptions;
pub use processing::{
    compress, compress_with_encoder, compress_with_progress, target_dimensions,
    CompressionOutcome, CompressionResult, OutputFile, PassthroughReason,
};
pub use source::SourceImage;
pub use validation::{validate, validate_input_path, validate_with_options};
