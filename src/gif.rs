use crate::constants::{GIF_GCE_MARKER, GIF_SNIFF_WINDOW};

/// Heuristic animation check: more than one Graphic Control Extension marker
/// in the first 64 KiB means the GIF has several frames.
///
/// This is a byte scan, not a GIF parser. A single-frame GIF carries at most
/// one extension block before its image data.
pub fn is_animated_gif(data: &[u8]) -> bool {
    count_control_extensions(data) > 1
}

pub fn count_control_extensions(data: &[u8]) -> usize {
    let window = &data[..data.len().min(GIF_SNIFF_WINDOW)];
    window
        .windows(GIF_GCE_MARKER.len())
        .filter(|candidate| *candidate == GIF_GCE_MARKER)
        .count()
}
