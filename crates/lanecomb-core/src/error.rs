//! Error types for lanecomb-core.

use crate::LaneId;
use thiserror::Error;

/// A single store access that did not go through.
///
/// These are recoverable by design: the engine skips the point or the
/// deletion and carries on, so none of these ever aborts a pass, an
/// envelope, or a sweep.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("lane {0:?} does not exist")]
    InvalidLane(LaneId),

    #[error("point index {index} out of bounds (lane has {count} points)")]
    OutOfBounds { index: usize, count: usize },

    #[error("point {index} could not be read")]
    Unreadable { index: usize },

    #[error("backend: {0}")]
    Backend(String),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, StoreError>;
