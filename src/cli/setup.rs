//! Setup and initialization functions for the CLI: logging and the rayon
//! thread pool.

use crate::config::ParallelConfig;

/// Configure rayon global thread pool once at startup
pub fn configure_thread_pool(parallel: &ParallelConfig) {
    let builder = rayon::ThreadPoolBuilder::new().num_threads(parallel.effective_concurrency());

    if let Err(e) = builder.build_global() {
        // Already configured - this is fine, just ignore
        log::debug!("Thread pool already configured: {}", e);
    }
}

/// Log level implied by the number of `-v` flags.
pub fn level_for_verbosity(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Initialize env_logger. `RUST_LOG`, when set, takes precedence over `-v`.
pub fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for_verbosity(verbosity))
        .format_timestamp(None)
        .parse_default_env();
    // A second initialization (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
}

/// Apply the color preference: `--plain` wins, then `output.use_color`,
/// otherwise colored's own TTY detection.
pub fn configure_colors(plain: bool, use_color: Option<bool>) {
    if plain {
        colored::control::set_override(false);
    } else if let Some(enabled) = use_color {
        colored::control::set_override(enabled);
    }
}
