use crate::constants::FALLBACK_MIME_TYPE;
use crate::error::{CompressionError, Result};
use crate::formats::MediaType;
use std::fs;
use std::path::Path;

/// A user supplied file: name, declared media type and raw bytes.
///
/// The declared type is whatever the caller claims; nothing here inspects the
/// bytes to confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    name: String,
    media_type: String,
    data: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }

    /// Reads a file from disk, declaring its media type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CompressionError::FileNotFound(path.to_path_buf()));
        }

        let data = fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(name, media_type_for_path(path), data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// The allow-listed media type this file declares, if any
    pub fn known_media_type(&self) -> Option<MediaType> {
        MediaType::from_mime(&self.media_type)
    }
}

/// Guess the declared media type of a path from its extension
pub fn media_type_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(MediaType::from_extension)
        .map_or(FALLBACK_MIME_TYPE, |media_type| media_type.mime_type())
}
