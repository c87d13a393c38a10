use crate::constants::{MAX_BATCH_FILES, MIB, MIN_AVAILABLE_MEMORY_MIB, RGBA_BYTES_PER_PIXEL};
use crate::error::{CompressionError, Result};
use crate::formats::MediaType;
use crate::options::CompressionOptions;
use crate::processing::{compress, target_dimensions, CompressionResult};
use crate::source::SourceImage;
use crate::utils::{create_progress_bar, format_file_size, size_reduction_percent};
use crate::validation::validate_with_options;
use crate::{error, info, logger, verbose, warn};
use glob::glob;
use indicatif::ProgressDrawTarget;
use rayon::prelude::*;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use sysinfo::{MemoryRefreshKind, RefreshKind, System};
use walkdir::WalkDir;

/// Why a single file of a batch produced no output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected by the intake validator
    Rejected,
    /// Bytes could not be decoded
    Decode,
    /// Still above the output ceiling after the whole quality ladder
    TooLarge,
    /// Reading the input or writing the output failed
    Io,
    Other,
}

#[derive(Debug, Clone)]
pub struct FileSuccess {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
    pub passthrough: bool,
}

#[derive(Debug, Clone)]
pub struct FileFailure {
    pub input: PathBuf,
    pub kind: FailureKind,
    pub reason: String,
}

impl FileFailure {
    fn new(input: &Path, kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_path_buf(),
            kind,
            reason: reason.into(),
        }
    }

    fn from_error(input: &Path, err: &CompressionError) -> Self {
        let kind = match err {
            e if e.is_decode_failure() => FailureKind::Decode,
            CompressionError::OutputTooLarge { .. } => FailureKind::TooLarge,
            CompressionError::Io(_) | CompressionError::FileNotFound(_) => FailureKind::Io,
            _ => FailureKind::Other,
        };
        Self::new(input, kind, err.to_string())
    }
}

/// Outcome of a batch: every input lands in exactly one of the two lists.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub succeeded: Vec<FileSuccess>,
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    pub fn total_files(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn total_original_size(&self) -> u64 {
        self.succeeded.iter().map(|s| s.original_size).sum()
    }

    pub fn total_compressed_size(&self) -> u64 {
        self.succeeded.iter().map(|s| s.compressed_size).sum()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Estimates peak memory for compressing one file without decoding it.
///
/// Header-readable images are budgeted their decoded bitmap plus the RGBA
/// surface they will be rendered onto. Anything else (SVG, corrupt files) is
/// only ever held as raw bytes, so it is budgeted its file size. A file that
/// cannot even be stat'ed counts as zero and fails later, on its own.
fn estimate_image_memory_usage(file_path: &Path, options: &CompressionOptions) -> u64 {
    match image::image_dimensions(file_path) {
        Ok((width, height)) => {
            let (target_w, target_h) = target_dimensions(width, height, options.max_dimension);
            let pixels = u64::from(width) * u64::from(height)
                + u64::from(target_w) * u64::from(target_h);
            pixels * RGBA_BYTES_PER_PIXEL
        }
        Err(_) => fs::metadata(file_path).map_or(0, |metadata| metadata.len()),
    }
}

/// Picks how many files may be compressed at once.
///
/// Starts from the requested thread count (or the CPU count) and lowers it so
/// that the largest file's estimate, times the parallelism, fits in available
/// memory minus a reserve.
fn plan_parallelism(
    image_files: &[PathBuf],
    options: &CompressionOptions,
    threads: Option<usize>,
) -> Result<usize> {
    if image_files.len() > MAX_BATCH_FILES {
        return Err(CompressionError::BatchFileLimitExceeded(
            image_files.len(),
            MAX_BATCH_FILES,
        ));
    }

    let baseline = threads
        .unwrap_or_else(num_cpus::get)
        .min(image_files.len())
        .max(1);

    let mut peak_bytes: u64 = 0;
    for file_path in image_files {
        peak_bytes = peak_bytes.max(estimate_image_memory_usage(file_path, options));
    }
    let per_file_mib = peak_bytes.div_ceil(MIB).max(1);

    let mut sys =
        System::new_with_specifics(RefreshKind::new().with_memory(MemoryRefreshKind::new()));
    sys.refresh_memory();
    let available_mib = sys.available_memory() / MIB;
    if available_mib == 0 {
        // Some sandboxes report nothing; fall back to the CPU bound
        return Ok(baseline);
    }

    let mem_cap = (available_mib.saturating_sub(MIN_AVAILABLE_MEMORY_MIB) / per_file_mib)
        .clamp(1, baseline as u64) as usize;
    verbose!(
        "Peak estimate {} per file, {} MiB available, parallelism {}",
        format_file_size(peak_bytes),
        available_mib,
        mem_cap
    );
    Ok(mem_cap)
}

/// Validates, compresses and writes every file, isolating per-file failures.
///
/// Only setup problems (too many files, unwritable output directory, thread
/// pool construction) fail the whole call; everything that goes wrong with a
/// single file is recorded in the returned [`BatchReport`].
pub fn batch_compress_images(
    image_files: &[PathBuf],
    output_dir: &Path,
    options: &CompressionOptions,
    threads: Option<usize>,
) -> Result<BatchReport> {
    options.validate()?;
    let start_time = Instant::now();
    let total_files = image_files.len();

    if total_files == 0 {
        warn!("No image files found in the input path");
        return Ok(BatchReport::default());
    }

    info!("📊 Found {} image files to process", total_files);
    let parallelism = plan_parallelism(image_files, options, threads)?;
    info!("⚙️  Using {} parallel threads for processing", parallelism);

    fs::create_dir_all(output_dir)
        .map_err(|_| CompressionError::DirectoryCreationFailed(output_dir.to_path_buf()))?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism)
        .build()?;

    let progress = create_progress_bar(total_files as u64);
    if logger::is_quiet() {
        progress.set_draw_target(ProgressDrawTarget::hidden());
    }

    let outcomes: Vec<std::result::Result<FileSuccess, FileFailure>> = pool.install(|| {
        image_files
            .par_iter()
            .map(|input_path| {
                let outcome = process_single_image(input_path, options).and_then(|result| {
                    write_output(input_path, output_dir, &result)
                });
                if let Err(failure) = &outcome {
                    progress.suspend(|| {
                        error!("Failed to process {:?}: {}", input_path, failure.reason);
                    });
                }
                progress.inc(1);
                outcome
            })
            .collect()
    });

    progress.finish_with_message("✅ Batch compression complete");

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(success) => report.succeeded.push(success),
            Err(failure) => report.failed.push(failure),
        }
    }

    print_batch_summary(&report, start_time);
    Ok(report)
}

fn process_single_image(
    input_path: &Path,
    options: &CompressionOptions,
) -> std::result::Result<CompressionResult, FileFailure> {
    let source = SourceImage::from_path(input_path)
        .map_err(|e| FileFailure::from_error(input_path, &e))?;

    if let Some(reason) = validate_with_options(&source, options) {
        return Err(FileFailure::new(input_path, FailureKind::Rejected, reason));
    }

    let result = compress(&source, options).map_err(|e| FileFailure::from_error(input_path, &e))?;
    verbose!(
        "{:?}: {} -> {}",
        input_path,
        format_file_size(result.original_size),
        format_file_size(result.compressed_size)
    );
    Ok(result)
}

fn write_output(
    input_path: &Path,
    output_dir: &Path,
    result: &CompressionResult,
) -> std::result::Result<FileSuccess, FileFailure> {
    let io_failure = |e: io::Error| FileFailure::new(input_path, FailureKind::Io, e.to_string());

    let (output_path, mut file) =
        create_unique_output(output_dir, &result.output.name).map_err(io_failure)?;
    file.write_all(result.encoded_data()).map_err(io_failure)?;

    Ok(FileSuccess {
        input: input_path.to_path_buf(),
        output: output_path,
        original_size: result.original_size,
        compressed_size: result.compressed_size,
        passthrough: result.is_passthrough(),
    })
}

/// Create a new, empty output file for `name` inside `output_dir`.
///
/// Nothing already on disk is ever replaced. That covers outputs written
/// earlier in the same run (`a.jpg` and `a.png` both become `a.webp`) as well
/// as inputs living in the output directory. Taken names get `-1`, `-2`, ...
/// before the extension. Creation is atomic, so concurrent callers never
/// receive the same path.
pub fn create_unique_output(output_dir: &Path, name: &str) -> io::Result<(PathBuf, File)> {
    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    let mut counter = 0;
    loop {
        let file_name = match (counter, extension) {
            (0, _) => name.to_string(),
            (_, Some(ext)) => format!("{}-{}.{}", stem, counter, ext),
            (_, None) => format!("{}-{}", stem, counter),
        };
        let candidate = output_dir.join(file_name);

        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => counter += 1,
            Err(e) => return Err(e),
        }
    }
}

fn print_batch_summary(report: &BatchReport, start_time: Instant) {
    let total_before = report.total_original_size();
    let total_after = report.total_compressed_size();
    let elapsed_time = start_time.elapsed();
    let passthroughs = report.succeeded.iter().filter(|s| s.passthrough).count();

    info!("\n📊 Batch Compression Summary:");
    info!("  📁 Total files processed: {}", report.succeeded.len());
    info!("  📋 Kept as-is: {}", passthroughs);
    info!(
        "  📊 Total original size: {} bytes ({})",
        total_before,
        format_file_size(total_before)
    );
    info!(
        "  📊 Total compressed size: {} bytes ({})",
        total_after,
        format_file_size(total_after)
    );
    info!(
        "  🎯 Overall size reduction: {:.1}%",
        size_reduction_percent(total_before, total_after)
    );
    info!("  ⏱️  Total time: {:?}", elapsed_time);

    if !report.failed.is_empty() {
        warn!("Failed files: {}", report.failed.len());
        for failure in &report.failed {
            warn!("  {:?}: {}", failure.input, failure.reason);
        }
    }
}

/// Collect candidate files from a file path, a directory or a glob pattern
pub fn collect_image_files(input: &str, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();
    let input_path = Path::new(input);

    if input_path.is_file() {
        image_files.push(input_path.to_path_buf());
    } else if input_path.is_dir() {
        let walker = if recursive {
            WalkDir::new(input_path)
        } else {
            WalkDir::new(input_path).max_depth(1)
        };

        // Depth 0 is the input directory itself, which may legitimately be hidden
        for entry in walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_image_file(path) {
                image_files.push(path.to_path_buf());
            }
        }
    } else {
        for entry in glob(input)?.flatten() {
            if entry.is_file() && is_image_file(&entry) {
                image_files.push(entry);
            }
        }
    }

    image_files.sort();
    Ok(image_files)
}

/// True for extensions of the allow-listed media types
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .and_then(MediaType::from_extension)
        .is_some()
}
