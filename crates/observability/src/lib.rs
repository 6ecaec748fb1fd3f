//! Tracing/logging setup shared by the binaries.

/// Tracing configuration (filters, format).
pub mod tracing;

pub use self::tracing::TracingConfig;

/// Initialize process-wide tracing.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init(config: &TracingConfig) {
    tracing::init(config);
}
