//! Tracing/logging initialization.
//!
//! Logs go to stderr so they never interleave with what the interactive
//! front end prints on stdout.

use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Filter used when `RUST_LOG` is not set (e.g. "warn", "fairsplit_ledger=debug").
    pub default_filter: String,
    /// JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "warn".to_string(),
            json: false,
        }
    }
}

impl TracingConfig {
    /// `RUST_LOG` wins over the configured default.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.default_filter))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &TracingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if config.json {
        builder
            .json()
            .with_timer(tracing_subscriber::fmt::time::SystemTime)
            .try_init()
    } else {
        builder.try_init()
    };
}
