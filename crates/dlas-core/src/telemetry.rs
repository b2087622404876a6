//! Tracing initialisation shared by the DLAS binaries.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialise the global tracing subscriber.
///
/// `json` switches to newline-delimited JSON log lines; `level` is the
/// default verbosity when `RUST_LOG` is not set. Safe to call more than
/// once — only the first call takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    if json {
        builder.json().try_init().ok();
    } else {
        builder.try_init().ok();
    }
}
