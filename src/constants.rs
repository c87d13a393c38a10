pub const MIB: u64 = 1024 * 1024;

/// Largest original upload accepted by the intake validator (10 MiB)
pub const MAX_ORIGINAL_SIZE: u64 = 10 * MIB;

/// Largest encoded output the compressor may return (4 MiB)
pub const MAX_OUTPUT_SIZE: u64 = 4 * MIB;

/// Longest allowed edge of the encoded surface, in pixels
pub const MAX_DIMENSION: u32 = 3840;

pub const TARGET_QUALITY: f32 = 0.85;
pub const FALLBACK_QUALITIES: [f32; 2] = [0.70, 0.50];
pub const QUALITY_LADDER: [f32; 3] = [TARGET_QUALITY, FALLBACK_QUALITIES[0], FALLBACK_QUALITIES[1]];

// Only this prefix of a GIF is scanned when deciding whether it is animated
pub const GIF_SNIFF_WINDOW: usize = 64 * 1024;
pub const GIF_GCE_MARKER: [u8; 3] = [0x00, 0x21, 0xF9];

pub const WEBP_MIME_TYPE: &str = "image/webp";
pub const WEBP_EXTENSION: &str = "webp";
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

// Progress checkpoints reported by the compressor
pub const PROGRESS_DECODED: u8 = 10;
pub const PROGRESS_DIMENSIONS: u8 = 30;
pub const PROGRESS_RENDERED: u8 = 50;
pub const PROGRESS_ENCODING: u8 = 70;
pub const PROGRESS_ENCODED: u8 = 90;
pub const PROGRESS_DONE: u8 = 100;

pub const MAX_BATCH_FILES: usize = 10_000;
// Head-room left to the rest of the system when sizing the batch pool
pub const MIN_AVAILABLE_MEMORY_MIB: u64 = 512;
pub const RGBA_BYTES_PER_PIXEL: u64 = 4;

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

pub const ORIGINAL_SIZE_PREFIX: &str = "📊 Original size:";
pub const COMPRESSED_SIZE_PREFIX: &str = "📈 Compressed size:";
pub const COMPRESSION_RATIO_PREFIX: &str = "🎯 Compression ratio:";
