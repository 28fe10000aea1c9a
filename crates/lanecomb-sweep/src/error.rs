//! Error types for lanecomb-sweep.

use thiserror::Error;

/// Error type for sweep configuration.
///
/// The reduction itself has no fatal errors - store failures are skipped
/// where they happen - so this is the only way a sweep can refuse to run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("sweep config selects no envelope class; enable track or take envelopes")]
    NothingSelected,
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, ConfigError>;
