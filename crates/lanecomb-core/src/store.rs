//! Host capabilities consumed by the cleanup engine.
//!
//! The engine holds no point data of its own. Everything it reads and every
//! deletion it performs goes through [`PointStore`]; which envelopes and
//! lanes exist at all comes from [`ProjectLayout`]. Hosts implement both
//! against their own project state; [`MemoryProject`](crate::MemoryProject)
//! is the built-in reference implementation.

use crate::{EnvelopeHandle, EnvelopePoint, EnvelopeRef, LaneId, Result};

/// Index-addressable access to the points of a lane.
///
/// All methods are synchronous calls into host-owned state; the engine
/// assumes exclusive access for the duration of one sweep. Deleting index
/// `i` shifts every later index down by one.
pub trait PointStore {
    /// Number of points currently on `lane`.
    fn count(&mut self, lane: LaneId) -> usize;

    /// Read the point at `index`.
    ///
    /// A failure here is not fatal to anything: the engine skips the point
    /// and keeps scanning.
    fn point(&mut self, lane: LaneId, index: usize) -> Result<EnvelopePoint>;

    /// Delete the point at `index`, shifting later indices down by one.
    fn delete(&mut self, lane: LaneId, index: usize) -> Result<()>;

    /// Re-sort the lane ascending by time, stable among equal-time points.
    fn sort(&mut self, lane: LaneId);
}

/// Enumeration of the envelopes and lanes a project contains.
pub trait ProjectLayout {
    /// Every envelope in the project, track-owned and take-owned.
    fn envelopes(&self) -> Vec<EnvelopeRef>;

    /// The lanes of one envelope: the base lane first, then every overlay in
    /// index order.
    fn lanes(&self, envelope: EnvelopeHandle) -> Vec<LaneId>;
}
