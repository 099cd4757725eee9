use crate::constants::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "img-optimize",
    about = "Optimize images IN-PLACE for the web (resizing and compression). \
             Overwrites originals!",
    long_about = "img-optimize walks a directory, shrinks PNG, JPEG and WebP images that \
                  exceed the maximum dimensions and re-encodes them with web-friendly \
                  settings: progressive, Huffman-optimized JPEG, oxipng-optimized PNG and \
                  lossy WebP. Each file is replaced atomically; a failure leaves the \
                  original untouched.\n\n\
                  Symbolic links are not followed: linked files and linked directories \
                  are skipped.",
    version,
    after_help = "EXAMPLES:\n  \
    img-optimize ./public/images\n  \
    img-optimize ./assets -r --max-width 1280 --max-height 720 -q 75"
)]
pub struct Args {
    #[arg(help = "Directory containing images to optimize")]
    pub input_dir: PathBuf,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_WIDTH,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Maximum width for images"
    )]
    pub max_width: u32,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_HEIGHT,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Maximum height for images"
    )]
    pub max_height: u32,

    #[arg(
        short = 'q',
        long,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Quality setting for JPEG/WEBP (0-100)",
        long_help = "Encoder quality for JPEG and WebP, from 0 (smallest) to 100 (best). \
                     PNG is always optimized losslessly and ignores this setting."
    )]
    pub quality: u8,

    #[arg(short = 'r', long, help = "Search for images recursively")]
    pub recursive: bool,

    #[arg(
        long,
        conflicts_with = "verbose",
        help = "Only print the banner, warnings and the summary"
    )]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print debug diagnostics to stderr")]
    pub verbose: bool,
}
