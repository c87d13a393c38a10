use crate::constants::{
    PROGRESS_DECODED, PROGRESS_DIMENSIONS, PROGRESS_DONE, PROGRESS_ENCODED, PROGRESS_ENCODING,
    PROGRESS_RENDERED, WEBP_MIME_TYPE,
};
use crate::encoder::{QualityEncoder, WebpEncoder};
use crate::error::{CompressionError, Result};
use crate::formats::{webp_file_name, MediaType};
use crate::gif::is_animated_gif;
use crate::options::CompressionOptions;
use crate::source::SourceImage;
use crate::utils::calculate_compression_ratio;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};

/// A named, typed payload ready to be handed to an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

impl OutputFile {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Why the compressor returned the original bytes untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassthroughReason {
    Vector,
    AnimatedGif,
    SmallerOriginal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompressionOutcome {
    /// Re-encoded to WebP at `quality` with the given surface dimensions
    Encoded { quality: f32, width: u32, height: u32 },
    Passthrough(PassthroughReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    pub output: OutputFile,
    pub original_size: u64,
    pub compressed_size: u64,
    /// `original_size / compressed_size`, exactly 1.0 for passthroughs
    pub compression_ratio: f64,
    pub outcome: CompressionOutcome,
}

impl CompressionResult {
    fn passthrough(source: &SourceImage, reason: PassthroughReason) -> Self {
        Self {
            output: OutputFile {
                name: source.name().to_string(),
                media_type: source.media_type().to_string(),
                data: source.data().to_vec(),
            },
            original_size: source.size(),
            compressed_size: source.size(),
            compression_ratio: 1.0,
            outcome: CompressionOutcome::Passthrough(reason),
        }
    }

    pub fn encoded_data(&self) -> &[u8] {
        &self.output.data
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self.outcome, CompressionOutcome::Passthrough(_))
    }
}

/// Compresses an upload to WebP under the configured output ceiling.
///
/// See [`compress_with_progress`] for the full behaviour.
pub fn compress(file: &SourceImage, options: &CompressionOptions) -> Result<CompressionResult> {
    compress_with_progress(file, options, |_| {})
}

/// Compresses an upload, reporting progress as a percentage.
///
/// SVGs and animated GIFs are returned untouched. Everything else is decoded,
/// scaled down so its longest edge fits `max_dimension`, and encoded to WebP
/// at each quality of the ladder in turn until the result fits
/// `max_output_size`. If the first encode is larger than an original that
/// already fits, the original wins.
///
/// # Errors
/// * [`CompressionError::EmptyImage`] / [`CompressionError::Decode`] when the
///   bytes are not a decodable image
/// * [`CompressionError::OutputTooLarge`] when even the last quality step does
///   not fit
pub fn compress_with_progress<F>(
    file: &SourceImage,
    options: &CompressionOptions,
    on_progress: F,
) -> Result<CompressionResult>
where
    F: FnMut(u8),
{
    compress_with_encoder(file, options, &WebpEncoder, on_progress)
}

pub fn compress_with_encoder<E, F>(
    file: &SourceImage,
    options: &CompressionOptions,
    encoder: &E,
    mut on_progress: F,
) -> Result<CompressionResult>
where
    E: QualityEncoder + ?Sized,
    F: FnMut(u8),
{
    options.validate()?;

    if let Some(reason) = passthrough_reason(file) {
        on_progress(PROGRESS_DONE);
        return Ok(CompressionResult::passthrough(file, reason));
    }

    let decoded = decode_image(file)?;
    on_progress(PROGRESS_DECODED);

    let (width, height) =
        target_dimensions(decoded.width(), decoded.height(), options.max_dimension);
    on_progress(PROGRESS_DIMENSIONS);

    // The decoded bitmap is consumed here and freed before any encoding starts
    let surface = render_surface(decoded, width, height);
    on_progress(PROGRESS_RENDERED);

    on_progress(PROGRESS_ENCODING);
    let original_size = file.size();
    let mut encoded = Vec::new();
    let mut fitted_quality = None;

    for (attempt, &quality) in options.qualities.iter().enumerate() {
        encoded = encoder.encode(&surface, quality)?;
        let encoded_size = encoded.len() as u64;

        if attempt == 0 {
            on_progress(PROGRESS_ENCODED);
            if original_size < encoded_size && original_size <= options.max_output_size {
                on_progress(PROGRESS_DONE);
                return Ok(CompressionResult::passthrough(
                    file,
                    PassthroughReason::SmallerOriginal,
                ));
            }
        }

        if encoded_size <= options.max_output_size {
            fitted_quality = Some(quality);
            break;
        }
    }

    let Some(quality) = fitted_quality else {
        return Err(CompressionError::OutputTooLarge {
            size: encoded.len() as u64,
            limit: options.max_output_size,
        });
    };

    let compressed_size = encoded.len() as u64;
    on_progress(PROGRESS_DONE);

    Ok(CompressionResult {
        output: OutputFile {
            name: webp_file_name(file.name()),
            media_type: WEBP_MIME_TYPE.to_string(),
            data: encoded,
        },
        original_size,
        compressed_size,
        compression_ratio: calculate_compression_ratio(original_size, compressed_size),
        outcome: CompressionOutcome::Encoded {
            quality,
            width,
            height,
        },
    })
}

/// Decide whether a file skips raster compression entirely
pub fn passthrough_reason(file: &SourceImage) -> Option<PassthroughReason> {
    match file.known_media_type() {
        Some(media_type) if media_type.is_vector() => Some(PassthroughReason::Vector),
        Some(MediaType::Gif) if is_animated_gif(file.data()) => {
            Some(PassthroughReason::AnimatedGif)
        }
        _ => None,
    }
}

pub fn decode_image(file: &SourceImage) -> Result<DynamicImage> {
    if file.data().is_empty() {
        return Err(CompressionError::EmptyImage(file.name().to_string()));
    }

    image::load_from_memory(file.data()).map_err(|source| CompressionError::Decode {
        name: file.name().to_string(),
        source,
    })
}

/// Scale `(width, height)` so the longer edge is at most `max_dimension`,
/// keeping the aspect ratio and rounding to whole pixels.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension {
        return (width, height);
    }

    let ratio = f64::from(max_dimension) / f64::from(longest);
    let scale = |edge: u32| ((f64::from(edge) * ratio).round() as u32).max(1);
    (scale(width), scale(height))
}

/// Draw the decoded image onto an RGBA surface of the target size.
///
/// Takes the bitmap by value so it is released as soon as the surface exists.
pub fn render_surface(decoded: DynamicImage, width: u32, height: u32) -> RgbaImage {
    if decoded.dimensions() == (width, height) {
        return decoded.into_rgba8();
    }
    image::imageops::resize(&decoded, width, height, FilterType::Lanczos3)
}
