use std::panic;
use tracing::debug;
use tracing::level_filters::LevelFilter;

/// Log level for a given verbosity; `verbose` wins over `quiet`.
pub fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else if quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::WARN
    }
}

/// Installs the global stderr subscriber. Only the CLI flags decide the
/// level; the environment is not consulted.
pub fn init(quiet: bool, verbose: bool) {
    let result = tracing_subscriber::fmt()
        .with_max_level(level_for(quiet, verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        eprintln!("⚠️  Failed to initialise logging: {}", e);
    }
}

/// Routes panic reports through the subscriber at debug level.
///
/// Codec panics are caught per file and reported as a failed file, so the
/// default hook's backtrace note on stderr would only duplicate that line.
/// `--verbose` still shows where the panic happened.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        debug!("panic: {}", info);
    }));
}
