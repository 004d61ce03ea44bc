//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize logging with a default level, still overridable through `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}
