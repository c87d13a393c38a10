//! Helpers shared by the compressor, the batch runner and the CLI

use crate::constants::{
    COMPRESSED_SIZE_PREFIX, COMPRESSION_RATIO_PREFIX, MIB, ORIGINAL_SIZE_PREFIX,
    PROGRESS_BAR_TEMPLATE, PROGRESS_SPINNER_TEMPLATE,
};
use crate::{info, warn};
use indicatif::{ProgressBar, ProgressStyle};

/// Format file size in human-readable format
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Human-readable size string (e.g., "1.2 MB", "512 KB")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Size in MiB with two decimals, e.g. "4.25MB"
pub fn format_mib(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / MIB as f64)
}

/// `original / compressed`; 1.0 when nothing was produced to compare against
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if compressed_size == 0 {
        return 1.0;
    }
    original_size as f64 / compressed_size as f64
}

/// Size reduction as a percentage (positive means smaller, negative means larger)
pub fn size_reduction_percent(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

pub fn create_progress_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}

/// Bar with a fixed length, used for both percentages and file counts
pub fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

pub fn print_compression_result(original_size: u64, compressed_size: u64) {
    let reduction = size_reduction_percent(original_size, compressed_size);

    info!("{} {} bytes ({})", ORIGINAL_SIZE_PREFIX, original_size, format_file_size(original_size));
    info!(
        "{} {} bytes ({})",
        COMPRESSED_SIZE_PREFIX,
        compressed_size,
        format_file_size(compressed_size)
    );
    info!(
        "{} {:.2}x",
        COMPRESSION_RATIO_PREFIX,
        calculate_compression_ratio(original_size, compressed_size)
    );

    if reduction > 0.0 {
        info!("✅ Successfully reduced file size by {:.1}%", reduction);
    } else if reduction == 0.0 {
        info!("📋 File kept as-is");
    } else {
        warn!("File size increased by {:.1}%", reduction.abs());
    }
}
