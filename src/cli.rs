use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "webp-squeeze",
    about = "Validate uploads and compress them to size-capped WebP",
    long_about = "webp-squeeze checks image uploads against an intake allow-list and size ceiling, \
                  then re-encodes them to WebP, stepping the encoder quality down (0.85, 0.70, 0.50) \
                  until the output fits under the output ceiling. SVGs and animated GIFs are kept as-is.",
    version,
    after_help = "EXAMPLES:\n  \
    webp-squeeze validate photo.jpg banner.png\n  \
    webp-squeeze compress safari.jpg ./uploads\n  \
    webp-squeeze batch \"./gallery/*.jpg\" ./uploads -j 4\n  \
    webp-squeeze batch ./gallery ./uploads -r --max-output-mib 2\n  \
    webp-squeeze info lion.tiff"
)]
pub struct Args {
    #[arg(short = 'q', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print per-file details")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        help = "Longest edge of the encoded image in pixels (default: 3840)"
    )]
    pub max_dimension: Option<u32>,

    #[arg(
        long,
        global = true,
        help = "Output size ceiling in MiB (default: 4)",
        long_help = "Largest encoded output allowed, in MiB. Must not exceed the 10 MiB intake ceiling."
    )]
    pub max_output_mib: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Check files against the intake rules without compressing them",
        long_about = "Reports, for every file, whether it is within the 10 MiB ceiling and of an \
                      allow-listed type (JPEG, PNG, WebP, AVIF, GIF, BMP, TIFF, SVG). \
                      Exits with an error if any file is rejected."
    )]
    Validate {
        #[arg(required = true, help = "Files to check")]
        files: Vec<PathBuf>,
    },

    #[command(
        about = "Compress a single image to WebP",
        long_about = "Validate and compress one image. The result is written into the output \
                      directory as <name>.webp, or under its original name when it is kept as-is."
    )]
    Compress {
        #[arg(help = "Input image file path")]
        input: PathBuf,

        #[arg(help = "Output directory")]
        output: PathBuf,
    },

    #[command(
        about = "Compress many images in parallel",
        long_about = "Process a file, a directory or a glob pattern. Files that fail validation \
                      or compression are reported and skipped; the rest are still written."
    )]
    Batch {
        #[arg(
            help = "Input directory, file pattern, or glob",
            long_help = "Input can be a directory path, file pattern, or glob expression. \
                         Examples: './images', '*.jpg', '/path/to/images/*.{jpg,png}'"
        )]
        input: String,

        #[arg(help = "Output directory path")]
        output: PathBuf,

        #[arg(
            short = 'j',
            long,
            help = "Number of parallel threads (default: auto)",
            long_help = "Upper bound on parallel compressions. \
                         May be lowered further when available memory is short."
        )]
        threads: Option<usize>,

        #[arg(
            short = 'r',
            long,
            help = "Process subdirectories recursively"
        )]
        recursive: bool,
    },

    #[command(
        about = "Show what would happen to an image",
        long_about = "Display the declared type, size, dimensions and the compression plan \
                      (rejected, kept as-is, or encoded at which size) without encoding anything."
    )]
    Info {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,
    },
}
