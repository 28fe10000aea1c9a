//! Identifiers for envelopes and lanes.

use serde::{Deserialize, Serialize};

/// Opaque handle to one envelope in a project.
///
/// The engine never looks inside; the host's store maps it back to whatever
/// object owns the points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvelopeHandle(pub u64);

/// Which curve of an envelope a lane addresses.
///
/// Every envelope has one base curve; automation-region overlays sit on top
/// of it and are reduced independently, never jointly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneSlot {
    /// The underlying curve
    Base,
    /// Automation-region overlay `n`, counted from zero
    Overlay(u32),
}

/// One time-ordered point list: an envelope's base curve or one of its
/// overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaneId {
    pub envelope: EnvelopeHandle,
    pub slot: LaneSlot,
}

impl LaneId {
    /// The base curve of `envelope`.
    pub fn base(envelope: EnvelopeHandle) -> Self {
        Self {
            envelope,
            slot: LaneSlot::Base,
        }
    }

    /// Overlay `index` of `envelope`.
    pub fn overlay(envelope: EnvelopeHandle, index: u32) -> Self {
        Self {
            envelope,
            slot: LaneSlot::Overlay(index),
        }
    }
}

/// What kind of object an envelope belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvelopeOwner {
    /// Owned by a track
    Track,
    /// Owned by a media item's take
    Take,
}

/// An enumerated envelope: its handle plus who owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvelopeRef {
    pub handle: EnvelopeHandle,
    pub owner: EnvelopeOwner,
}
