//! Core types and host capabilities for the lanecomb cleanup engine.
//!
//! This crate provides:
//! - **Data model**: [`EnvelopePoint`] and [`PointShape`] - one (time, value,
//!   shape) triple on an automation lane
//! - **Identifiers**: [`EnvelopeHandle`], [`LaneId`], [`LaneSlot`] - which
//!   curve of which envelope a point lives on
//! - **Tolerant equality**: [`time_almost_equal`] - "same enough" comparison
//!   for time values that survived a storage round trip
//! - **Capabilities**: [`PointStore`] and [`ProjectLayout`] - the host surface
//!   the engine consumes
//! - **Reference store**: [`MemoryProject`] - an owned, in-memory
//!   implementation of both capabilities
//! - **Handle cache**: [`CachedHandle`] - a lazily re-acquired host handle
//!   revalidated on each access
//!
//! The engine itself (the reduction passes and the project sweep) lives in
//! `lanecomb-sweep`; everything here is the vocabulary it speaks.

pub mod error;
pub use error::{Result, StoreError};

mod float_eq;
pub use float_eq::{time_almost_equal, TIME_TOLERANCE_BITS};

mod point;
pub use point::{EnvelopePoint, PointShape};

mod id;
pub use id::{EnvelopeHandle, EnvelopeOwner, EnvelopeRef, LaneId, LaneSlot};

mod store;
pub use store::{PointStore, ProjectLayout};

mod handle;
pub use handle::{CachedHandle, Revalidate};

mod memory;
pub use memory::MemoryProject;
