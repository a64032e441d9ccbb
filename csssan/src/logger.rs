// csssan/src/logger.rs
//! Logger initialization for the csssan binary.
//!
//! `RUST_LOG` is honored unless an explicit level is passed, which is how
//! `--quiet` and `--debug` override the environment.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger. Calling it more than once is harmless;
/// later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(false);
    let _ = builder.try_init();
}
