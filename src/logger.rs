//! Logging setup for the command-line binary. Library code only emits
//! `tracing` events; installing a subscriber is left to whoever runs it.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr subscriber. `RUST_LOG` wins over the defaults;
/// otherwise `verbose` lowers the crate's level from `info` to `debug` so the
/// per-command and per-loan events show up. Output goes to stderr so replies
/// printed on stdout stay clean for scripts.
pub fn init_cli_logger(verbose: bool) {
    let default_filter = if verbose {
        "library_manager=debug"
    } else {
        "library_manager=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
