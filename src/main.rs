use anyhow::Context;
use clap::Parser;
use img_optimize::cli::Args;
use img_optimize::report::Reporter;
use img_optimize::{logger, optimize_directory, BatchConfig, OptimizeOptions};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.quiet, args.verbose);
    logger::install_panic_hook();

    let options = OptimizeOptions::new(
        Some(args.max_width),
        Some(args.max_height),
        Some(args.quality),
    )?;
    let config = BatchConfig {
        input_dir: args.input_dir,
        options,
        recursive: args.recursive,
    };

    let reporter = Reporter::new(args.quiet);
    if !config.input_dir.is_dir() {
        // Fail before printing a banner for a directory that isn't there.
        let err = img_optimize::OptimizeError::InvalidInputDirectory(config.input_dir);
        return Err(err.into());
    }
    reporter.banner(&config);

    let summary = optimize_directory(&config, |path, result| reporter.file(path, result))
        .with_context(|| format!("Failed to optimize {}", config.input_dir.display()))?;
    reporter.summary(&summary);

    Ok(())
}
