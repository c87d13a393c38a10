//! Media types accepted at intake and the naming rules for compressor output
//!
//! The eight allow-listed types are modelled as an enum so callers never
//! compare raw mime strings themselves.

use crate::constants::WEBP_EXTENSION;
use crate::error::CompressionError;
use std::fmt;
use std::str::FromStr;

/// Media types accepted by the intake validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Jpeg,
    Png,
    WebP,
    Avif,
    Gif,
    Bmp,
    Tiff,
    Svg,
}

impl MediaType {
    pub const ALL: [MediaType; 8] = [
        MediaType::Jpeg,
        MediaType::Png,
        MediaType::WebP,
        MediaType::Avif,
        MediaType::Gif,
        MediaType::Bmp,
        MediaType::Tiff,
        MediaType::Svg,
    ];

    /// Look up an allow-listed media type by its mime string (ASCII case-insensitive)
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|media_type| media_type.mime_type().eq_ignore_ascii_case(mime.trim()))
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" | "jpe" => Some(MediaType::Jpeg),
            "png" => Some(MediaType::Png),
            "webp" => Some(MediaType::WebP),
            "avif" => Some(MediaType::Avif),
            "gif" => Some(MediaType::Gif),
            "bmp" => Some(MediaType::Bmp),
            "tif" | "tiff" => Some(MediaType::Tiff),
            "svg" => Some(MediaType::Svg),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::WebP => "image/webp",
            MediaType::Avif => "image/avif",
            MediaType::Gif => "image/gif",
            MediaType::Bmp => "image/bmp",
            MediaType::Tiff => "image/tiff",
            MediaType::Svg => "image/svg+xml",
        }
    }

    /// Vector formats are never rasterized
    pub fn is_vector(&self) -> bool {
        matches!(self, MediaType::Svg)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaType::Jpeg => "JPEG",
            MediaType::Png => "PNG",
            MediaType::WebP => "WebP",
            MediaType::Avif => "AVIF",
            MediaType::Gif => "GIF",
            MediaType::Bmp => "BMP",
            MediaType::Tiff => "TIFF",
            MediaType::Svg => "SVG",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for MediaType {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaType::from_mime(s).ok_or_else(|| {
            CompressionError::Validation(format!("Unsupported file type: {}", s))
        })
    }
}

/// Rewrite a file name so its final extension is `.webp`.
///
/// Only the last extension is replaced; names without one get `.webp` appended.
pub fn webp_file_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => format!("{}.{}", stem, WEBP_EXTENSION),
        _ => format!("{}.{}", name, WEBP_EXTENSION),
    }
}
