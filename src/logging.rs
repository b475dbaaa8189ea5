//! Tracing subscriber setup for the CLI

use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber (stderr, `RUST_LOG` aware).
///
/// Without `RUST_LOG` the level is `info`, or `debug` when `verbose`.
/// Later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    if INITIALISED.set(()).is_err() {
        return;
    }

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal());

    let _ = Registry::default().with(filter).with(fmt_layer).try_init();
}
