use crate::error::{CompressionError, Result};
use image::RgbaImage;

/// Lossy encoder driven by a `(0, 1]` quality factor.
///
/// The compressor only needs "encode this surface at quality q and give me the
/// bytes", so the codec sits behind this trait.
pub trait QualityEncoder: Send + Sync {
    fn encode(&self, surface: &RgbaImage, quality: f32) -> Result<Vec<u8>>;
}

/// libwebp lossy encoder
#[derive(Debug, Default, Clone, Copy)]
pub struct WebpEncoder;

impl QualityEncoder for WebpEncoder {
    fn encode(&self, surface: &RgbaImage, quality: f32) -> Result<Vec<u8>> {
        let (width, height) = surface.dimensions();
        let encoder = webp::Encoder::from_rgba(surface.as_raw(), width, height);
        let encoded = encoder
            .encode_simple(false, to_libwebp_quality(quality))
            .map_err(|e| CompressionError::Encode(format!("{:?}", e)))?;
        Ok(encoded.to_vec())
    }
}

/// libwebp takes quality on a 0-100 scale
pub fn to_libwebp_quality(quality: f32) -> f32 {
    (quality * 100.0).clamp(0.0, 100.0)
}
