//! Structured logging with submission context.
//!
//! Every decision point in the pipeline logs with the submission id so log
//! lines from concurrent requests can be correlated.

pub mod structured;

pub use structured::*;

/// Initialize the process-level logger.
///
/// Intended for the embedding service's startup path (and tests); safe to
/// call more than once.
pub fn init() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}
