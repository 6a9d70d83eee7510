//! Logging setup
//! tracing subscriber for the CLI, filtered by `RUST_LOG` or `--verbose`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Compact logs on stderr; stdout is reserved for the report.
pub fn init_logger(verbose: bool) {
    let default_directive = if verbose {
        "pslf_stats=debug"
    } else {
        "pslf_stats=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

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
