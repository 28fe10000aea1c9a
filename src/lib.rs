//! # lanecomb - Automation Envelope Cleanup
//!
//! A batch cleanup sweep for automation curves: walks every envelope lane of
//! a project and deletes the points whose removal changes nothing the curve
//! produces - stacked duplicates, flat-run middles, repeated steps, redundant
//! edge points - while leaving every surviving point bit-identical.
//!
//! ## Architecture
//!
//! Umbrella crate coordinating:
//! - **lanecomb-core** - Data model, tolerant time equality, the
//!   [`PointStore`]/[`ProjectLayout`] host capabilities, the in-memory
//!   reference store
//! - **lanecomb-sweep** - The five-pass lane reducer, envelope driver, and
//!   project sweep
//!
//! ## Quick Start
//!
//! ```
//! use lanecomb::prelude::*;
//!
//! // Stage a project (hosts implement PointStore + ProjectLayout instead)
//! let mut project = MemoryProject::new();
//! let env = project.add_envelope(EnvelopeOwner::Track);
//! let lane = LaneId::base(env);
//! for (time, value) in [(0.0, 0.25), (1.0, 0.25), (2.0, 0.25), (3.0, 1.0)] {
//!     project.push_point(lane, EnvelopePoint::new(time, value));
//! }
//!
//! // One sweep over everything
//! let outcome = sweep_project(&mut project, &SweepConfig::default()).unwrap();
//!
//! // The caller owes the host exactly one undo entry when anything moved
//! match outcome.undo_label() {
//!     Some(label) => println!("{label}"),
//!     None => {} // leave the undo log untouched
//! }
//! ```

/// Re-export of lanecomb-core for direct access
pub use lanecomb_core as core;
/// Re-export of lanecomb-sweep for direct access
pub use lanecomb_sweep as sweep;

// Data model and host capabilities
pub use lanecomb_core::{
    time_almost_equal, CachedHandle, EnvelopeHandle, EnvelopeOwner, EnvelopePoint, EnvelopeRef,
    LaneId, LaneSlot, MemoryProject, PointShape, PointStore, ProjectLayout, Revalidate,
    StoreError, TIME_TOLERANCE_BITS,
};

// The engine
pub use lanecomb_sweep::{
    reduce_envelope, reduce_lane, sweep_project, ConfigError, SweepConfig, SweepOutcome,
};

/// Prelude for common imports
pub mod prelude {
    pub use lanecomb_core::{
        EnvelopeHandle, EnvelopeOwner, EnvelopePoint, EnvelopeRef, LaneId, LaneSlot,
        MemoryProject, PointShape, PointStore, ProjectLayout,
    };
    pub use lanecomb_sweep::{
        reduce_envelope, reduce_lane, sweep_project, SweepConfig, SweepOutcome,
    };
}
