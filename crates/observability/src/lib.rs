//! Tracing/logging setup shared by binaries and test harnesses.

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Initialize process-wide tracing/logging.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize with an explicit default filter, still overridable via `RUST_LOG`.
pub fn init_with_default(directives: &str) {
    tracing::init_with_default(directives);
}
