use crate::constants::MIB;
use crate::error::{CompressionError, Result};
use crate::formats::MediaType;
use crate::options::CompressionOptions;
use crate::source::SourceImage;
use std::path::Path;

/// Checks an upload's metadata before any decoding is attempted.
///
/// Returns a human-readable reason when the file must be rejected and `None`
/// when it may proceed to compression. Only the declared size and media type
/// are looked at; the bytes are never opened.
///
/// # Example
/// ```
/// use webp_squeeze::{validate, SourceImage};
///
/// let svg = SourceImage::new("logo.svg", "image/svg+xml", b"<svg/>".to_vec());
/// assert_eq!(validate(&svg), None);
///
/// let doc = SourceImage::new("notes.pdf", "application/pdf", vec![0; 16]);
/// assert!(validate(&doc).unwrap().contains("application/pdf"));
/// ```
pub fn validate(file: &SourceImage) -> Option<String> {
    validate_with_options(file, &CompressionOptions::default())
}

pub fn validate_with_options(file: &SourceImage, options: &CompressionOptions) -> Option<String> {
    validate_metadata(file.size(), file.media_type(), options)
}

/// Same checks as [`validate`], for callers that only hold the metadata
pub fn validate_metadata(size: u64, media_type: &str, options: &CompressionOptions) -> Option<String> {
    if size > options.max_original_size {
        return Some(format!(
            "File size ({:.2}MB) exceeds the maximum allowed size of {}MB",
            size as f64 / MIB as f64,
            options.max_original_size / MIB
        ));
    }

    if MediaType::from_mime(media_type).is_none() {
        let shown = if media_type.trim().is_empty() {
            "unknown"
        } else {
            media_type
        };
        return Some(format!("Unsupported file type: {}", shown));
    }

    None
}

/// Validate an input path given on the command line
pub fn validate_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(CompressionError::NotAFile(path.to_path_buf()));
    }

    Ok(())
}
