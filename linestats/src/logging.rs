use std::io::{self, IsTerminal};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize diagnostics on stderr.
///
/// `RUST_LOG` wins when set; otherwise the level follows the number of
/// `-v` flags, starting at `warn` so malformed numbers are always reported.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
