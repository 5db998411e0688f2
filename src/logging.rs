//! Logger setup for the binary and for tests that want to see log output.

use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

/// Initializes the global logger.
///
/// `RUST_LOG` takes precedence. Without it, this crate logs at info level, or
/// debug when `verbose` is `true`. Calling `init` again is harmless.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(format!("{}={level}", env!("CARGO_CRATE_NAME")));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    if builder.try_init().is_err() {
        debug!("logger already initialized");
    }
}
