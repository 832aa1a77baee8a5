//! Tracing subscriber setup
//!
//! Log lines go to stderr so they never interleave with the listing and
//! summary written to stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Verbosity;

/// Filter used when `RUST_LOG` is unset
#[must_use]
pub const fn default_directives(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "uiverify=error,error",
        Verbosity::Normal => "uiverify=info,warn",
        Verbosity::Verbose => "uiverify=debug,warn",
        Verbosity::Debug => "uiverify=trace,info",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flags. Calling this twice
/// is harmless; the second call leaves the first subscriber in place.
pub fn init(verbosity: Verbosity, ansi: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .with_target(verbosity.is_verbose())
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
