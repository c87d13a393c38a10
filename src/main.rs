use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use webp_squeeze::batch::create_unique_output;
use webp_squeeze::cli::{Args, Commands};
use webp_squeeze::constants::MIB;
use webp_squeeze::utils::{create_progress_bar, create_progress_spinner, print_compression_result};
use webp_squeeze::{
    batch_compress_images, collect_image_files, compress_with_progress, describe_image, error,
    info, logger, print_image_report, validate_input_path, validate_with_options, verbose, warn,
    CompressionError, CompressionOptions, CompressionOutcome, PassthroughReason, Result,
    SourceImage,
};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);

    let options = CompressionOptions::new(
        args.max_dimension,
        args.max_output_mib.map(|mib| mib.saturating_mul(MIB)),
    )?;

    match args.command {
        Commands::Validate { files } => validate_files(&files, &options)?,
        Commands::Compress { input, output } => compress_file(&input, &output, &options)?,
        Commands::Batch {
            input,
            output,
            threads,
            recursive,
        } => {
            info!("🚀 Starting batch compression...");
            info!("📁 Input: {}", input);
            info!("📁 Output: {:?}", output);
            let scanning = create_progress_spinner("🔍 Collecting image files...");
            if logger::is_quiet() {
                scanning.set_draw_target(indicatif::ProgressDrawTarget::hidden());
            }
            let files = collect_image_files(&input, recursive);
            scanning.finish_and_clear();
            let files = files?;
            batch_compress_images(&files, &output, &options, threads)?;
        }
        Commands::Info { input } => {
            info!("📋 Getting info for: {:?}", input);
            validate_input_path(&input)?;
            let source = SourceImage::from_path(&input)?;
            print_image_report(&describe_image(&source, &options), &options);
        }
    }

    Ok(())
}

fn validate_files(files: &[PathBuf], options: &CompressionOptions) -> Result<()> {
    let mut rejected = 0;

    for path in files {
        let verdict = validate_input_path(path)
            .and_then(|()| SourceImage::from_path(path))
            .map(|source| validate_with_options(&source, options));

        match verdict {
            Ok(None) => {
                info!("✅ {:?}", path);
            }
            Ok(Some(reason)) => {
                error!("{:?}: {}", path, reason);
                rejected += 1;
            }
            Err(e) => {
                error!("{:?}: {}", path, e);
                rejected += 1;
            }
        }
    }

    if rejected > 0 {
        return Err(CompressionError::Validation(format!(
            "{} of {} files rejected",
            rejected,
            files.len()
        )));
    }
    Ok(())
}

fn compress_file(input: &Path, output_dir: &Path, options: &CompressionOptions) -> Result<()> {
    info!("🗜️  Compressing image: {:?}", input);
    validate_input_path(input)?;

    let source = SourceImage::from_path(input)?;
    if let Some(reason) = validate_with_options(&source, options) {
        return Err(CompressionError::Validation(reason));
    }

    let progress = create_progress_bar(100);
    if logger::is_quiet() {
        progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    let result = compress_with_progress(&source, options, |percent| {
        progress.set_position(u64::from(percent));
    });
    match &result {
        Ok(_) => progress.finish_with_message("✅ Compression complete"),
        Err(_) => progress.abandon(),
    }
    let result = result?;

    match result.outcome {
        CompressionOutcome::Encoded {
            quality,
            width,
            height,
        } => {
            verbose!("Encoded {}x{} at quality {:.2}", width, height, quality);
        }
        CompressionOutcome::Passthrough(PassthroughReason::Vector) => {
            info!("📋 Vector image kept as-is");
        }
        CompressionOutcome::Passthrough(PassthroughReason::AnimatedGif) => {
            info!("📋 Animated GIF kept as-is");
        }
        CompressionOutcome::Passthrough(PassthroughReason::SmallerOriginal) => {
            info!("📋 Original is smaller than its WebP encode, kept as-is");
        }
    }

    fs::create_dir_all(output_dir)
        .map_err(|_| CompressionError::DirectoryCreationFailed(output_dir.to_path_buf()))?;
    let requested_path = output_dir.join(&result.output.name);

    if is_same_file(input, &requested_path) {
        warn!("Output would overwrite the input with identical bytes, skipping write");
    } else {
        let (output_path, mut file) = create_unique_output(output_dir, &result.output.name)?;
        if output_path != requested_path {
            warn!(
                "{:?} already exists, writing {:?} instead",
                requested_path, output_path
            );
        }
        file.write_all(result.encoded_data())?;
        info!("📁 Output: {:?}", output_path);
    }

    print_compression_result(result.original_size, result.compressed_size);
    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
