//! Log output for the `vprune` binary.
//!
//! The library only emits events; whoever runs it decides where they go.
//! The CLI calls [`init_tracing`] before resolving its configuration.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide subscriber.
///
/// `RUST_LOG` wins over `level` when set. With `json` every event becomes
/// one JSON object per line, which is what Actions log scrapers expect.
/// Output goes to stderr; stdout carries the run summary. A second call is
/// a no-op.
pub fn init_tracing(json: bool, level: Level) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);
    let lines = fmt::layer().with_target(false).with_writer(std::io::stderr);

    if json {
        registry.with(lines.json()).try_init().ok();
    } else {
        registry.with(lines).try_init().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_tracing(false, Level::INFO);
        init_tracing(true, Level::DEBUG);
        tracing::info!(event = "telemetry.test", "still logging");
    }
}
