//! Automation envelope point reduction for lanecomb.
//!
//! Given a project full of automation lanes, this crate deletes every point
//! whose removal changes nothing the curves produce, and nothing else: no
//! surviving point is moved, re-valued, or re-shaped, and no two lanes are
//! ever reduced jointly.
//!
//! Three layers, smallest first:
//! - [`reduce_lane`] - the five elimination passes over one lane
//! - [`reduce_envelope`] - base lane plus overlays of one envelope
//! - [`sweep_project`] - every envelope of a project, with the undo-label
//!   contract in [`SweepOutcome`]
//!
//! # Example
//!
//! ```
//! use lanecomb_core::{EnvelopeOwner, EnvelopePoint, LaneId, MemoryProject};
//! use lanecomb_sweep::{sweep_project, SweepConfig};
//!
//! let mut project = MemoryProject::new();
//! let env = project.add_envelope(EnvelopeOwner::Track);
//! let lane = LaneId::base(env);
//! for (time, value) in [(0.0, 0.5), (1.0, 0.5), (2.0, 0.5)] {
//!     project.push_point(lane, EnvelopePoint::new(time, value));
//! }
//!
//! let outcome = sweep_project(&mut project, &SweepConfig::default()).unwrap();
//! assert!(outcome.removed > 0);
//! if let Some(label) = outcome.undo_label() {
//!     // hand `label` to the host's undo log, exactly once
//!     assert!(label.starts_with("Clean "));
//! }
//! ```

pub mod error;
pub use error::{ConfigError, Result};

mod reduce;
pub use reduce::{reduce_envelope, reduce_lane};

mod sweep;
pub use sweep::{sweep_project, SweepConfig, SweepOutcome};
