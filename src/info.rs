use crate::formats::MediaType;
use crate::gif::count_control_extensions;
use crate::info;
use crate::options::CompressionOptions;
use crate::processing::{passthrough_reason, target_dimensions, PassthroughReason};
use crate::source::SourceImage;
use crate::utils::{format_file_size, format_mib};
use crate::validation::validate_with_options;
use image::ImageReader;
use std::io::Cursor;

/// What the compressor is expected to do with a file
#[derive(Debug, Clone, PartialEq)]
pub enum CompressionPlan {
    Rejected(String),
    Passthrough(PassthroughReason),
    /// Raster path; the original may still win if the encode is larger
    Encode { width: u32, height: u32 },
    Undecodable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageReport {
    pub name: String,
    pub media_type: String,
    pub size: u64,
    pub dimensions: Option<(u32, u32)>,
    pub control_extensions: Option<usize>,
    pub plan: CompressionPlan,
}

/// Inspect a file without encoding it. Only the image header is read.
pub fn describe_image(source: &SourceImage, options: &CompressionOptions) -> ImageReport {
    let dimensions = read_dimensions(source.data());
    let control_extensions = (source.known_media_type() == Some(MediaType::Gif))
        .then(|| count_control_extensions(source.data()));

    let plan = if let Some(reason) = validate_with_options(source, options) {
        CompressionPlan::Rejected(reason)
    } else if let Some(reason) = passthrough_reason(source) {
        CompressionPlan::Passthrough(reason)
    } else if let Some((width, height)) = dimensions {
        let (width, height) = target_dimensions(width, height, options.max_dimension);
        CompressionPlan::Encode { width, height }
    } else {
        CompressionPlan::Undecodable
    };

    ImageReport {
        name: source.name().to_string(),
        media_type: source.media_type().to_string(),
        size: source.size(),
        dimensions,
        control_extensions,
        plan,
    }
}

fn read_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

pub fn print_image_report(report: &ImageReport, options: &CompressionOptions) {
    info!("📋 Basic Information:");
    info!("  📁 File: {}", report.name);
    match MediaType::from_mime(&report.media_type) {
        Some(media_type) => {
            info!("  🎭 Declared type: {} ({})", report.media_type, media_type);
        }
        None => {
            info!("  🎭 Declared type: {}", report.media_type);
        }
    }
    info!(
        "  📦 File size: {} bytes ({}, {})",
        report.size,
        format_file_size(report.size),
        format_mib(report.size)
    );

    if let Some((width, height)) = report.dimensions {
        info!("  📏 Dimensions: {}x{} pixels", width, height);
        if height > 0 {
            info!("  📐 Aspect ratio: {:.2}:1", f64::from(width) / f64::from(height));
        }
    }
    if let Some(count) = report.control_extensions {
        info!("  🎞️  Graphic control extensions: {}", count);
    }

    info!("\n💡 Compression plan:");
    match &report.plan {
        CompressionPlan::Rejected(reason) => {
            info!("  ❌ Rejected at intake: {}", reason);
        }
        CompressionPlan::Passthrough(PassthroughReason::Vector) => {
            info!("  📋 Vector image: uploaded as-is");
        }
        CompressionPlan::Passthrough(PassthroughReason::AnimatedGif) => {
            info!("  📋 Animated GIF: uploaded as-is to keep every frame");
        }
        CompressionPlan::Passthrough(PassthroughReason::SmallerOriginal) => {
            info!("  📋 Original is already smaller than its WebP encode");
        }
        CompressionPlan::Encode { width, height } => {
            info!("  🎯 WebP at {}x{}", width, height);
            info!(
                "  🎯 Quality ladder {:?}, output ceiling {}",
                options.qualities,
                format_mib(options.max_output_size)
            );
            if report.size <= options.max_output_size {
                info!("  📋 The original is kept if the first encode comes out larger");
            }
        }
        CompressionPlan::Undecodable => {
            info!("  ❌ The file could not be decoded");
        }
    }
}
