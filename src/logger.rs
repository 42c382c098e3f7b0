//! Logger setup for the mixer binary.

/// Initializes `env_logger`; `verbose` turns on trace output, otherwise only
/// warnings and errors are shown. `RUST_LOG` still overrides the default.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();
}
