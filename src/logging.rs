//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing`, leaving stdout for command
//! output. `RUST_LOG` takes precedence over the `--verbose` flag.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive when `RUST_LOG` is unset.
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "flashcards=debug" } else { "warn" }
}

/// Installs the global subscriber.
///
/// Calling it again is a no-op, so tests and embedders may call it freely.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .try_init();
}
