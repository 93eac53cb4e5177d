//! Structured logging using **tracing**.
//!
//! The engine itself only emits events; installing a subscriber is left to
//! the binary. The JSON subscriber keeps stdout free for findings.

/// Initializes the global tracing subscriber.
///
/// Call *once* at program start. Output is JSON on stderr.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=customdep_core=debug`)
pub fn init_structured_logging() {
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
