use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

static INIT: OnceLock<()> = OnceLock::new();

/// Initialize the `tracing` subscriber on stderr, leaving stdout for command output.
/// `RUST_LOG` wins over `verbose`.
pub fn init(verbose: u8) {
    INIT.get_or_init(|| {
        let default_level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        let subscriber = Registry::default()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr));
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            // Ignore error if a subscriber is already set (e.g., tests).
        }
    });
}
