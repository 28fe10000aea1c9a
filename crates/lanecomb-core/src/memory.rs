//! Owned, in-memory implementation of the host capabilities.
//!
//! [`MemoryProject`] stages envelopes and points outside any host. It backs
//! the crate's own tests and suits embedders that want to run the cleanup
//! engine over data they assembled themselves. Individual points can be
//! poisoned to exercise the engine's skip-on-read-failure path.

use crate::{
    EnvelopeHandle, EnvelopeOwner, EnvelopePoint, EnvelopeRef, LaneId, LaneSlot, PointStore,
    ProjectLayout, Result, StoreError,
};

#[derive(Debug, Clone)]
struct MemorySlot {
    point: EnvelopePoint,
    readable: bool,
}

#[derive(Debug, Clone, Default)]
struct MemoryLane {
    slots: Vec<MemorySlot>,
}

impl MemoryLane {
    fn sort(&mut self) {
        // stable, so equal-time points keep their relative order
        self.slots
            .sort_by(|a, b| a.point.time.total_cmp(&b.point.time));
    }
}

#[derive(Debug)]
struct MemoryEnvelope {
    handle: EnvelopeHandle,
    owner: EnvelopeOwner,
    base: MemoryLane,
    overlays: Vec<MemoryLane>,
}

/// In-memory project: every envelope, lane, and point owned by this object.
#[derive(Debug, Default)]
pub struct MemoryProject {
    envelopes: Vec<MemoryEnvelope>,
    next_handle: u64,
}

impl MemoryProject {
    /// Create an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an envelope with an empty base lane.
    pub fn add_envelope(&mut self, owner: EnvelopeOwner) -> EnvelopeHandle {
        let handle = EnvelopeHandle(self.next_handle);
        self.next_handle += 1;
        self.envelopes.push(MemoryEnvelope {
            handle,
            owner,
            base: MemoryLane::default(),
            overlays: Vec::new(),
        });
        handle
    }

    /// Add an overlay lane to `envelope`, returning its lane id.
    pub fn add_overlay(&mut self, envelope: EnvelopeHandle) -> LaneId {
        let env = self
            .envelope_mut(envelope)
            .expect("overlay on unknown envelope");
        env.overlays.push(MemoryLane::default());
        LaneId::overlay(envelope, (env.overlays.len() - 1) as u32)
    }

    /// Append a point to `lane`. Points may arrive in any order; call
    /// [`PointStore::sort`] (or let a reduction do it) to restore time order.
    pub fn push_point(&mut self, lane: LaneId, point: EnvelopePoint) {
        self.lane_mut(lane)
            .expect("push to unknown lane")
            .slots
            .push(MemorySlot {
                point,
                readable: true,
            });
    }

    /// Replace the points of `lane`.
    pub fn set_points(&mut self, lane: LaneId, points: impl IntoIterator<Item = EnvelopePoint>) {
        let mem = self.lane_mut(lane).expect("unknown lane");
        mem.slots = points
            .into_iter()
            .map(|point| MemorySlot {
                point,
                readable: true,
            })
            .collect();
    }

    /// Mark the point currently at `index` unreadable: reads fail, deletion
    /// still works.
    pub fn poison(&mut self, lane: LaneId, index: usize) {
        self.lane_mut(lane).expect("unknown lane").slots[index].readable = false;
    }

    /// Snapshot of the points currently on `lane`, in storage order.
    pub fn points(&self, lane: LaneId) -> Vec<EnvelopePoint> {
        self.lane_ref(lane)
            .map(|mem| mem.slots.iter().map(|slot| slot.point).collect())
            .unwrap_or_default()
    }

    fn envelope_mut(&mut self, handle: EnvelopeHandle) -> Option<&mut MemoryEnvelope> {
        self.envelopes.iter_mut().find(|env| env.handle == handle)
    }

    fn lane_ref(&self, lane: LaneId) -> Option<&MemoryLane> {
        let env = self.envelopes.iter().find(|env| env.handle == lane.envelope)?;
        match lane.slot {
            LaneSlot::Base => Some(&env.base),
            LaneSlot::Overlay(n) => env.overlays.get(n as usize),
        }
    }

    fn lane_mut(&mut self, lane: LaneId) -> Option<&mut MemoryLane> {
        let env = self.envelope_mut(lane.envelope)?;
        match lane.slot {
            LaneSlot::Base => Some(&mut env.base),
            LaneSlot::Overlay(n) => env.overlays.get_mut(n as usize),
        }
    }
}

impl PointStore for MemoryProject {
    fn count(&mut self, lane: LaneId) -> usize {
        self.lane_ref(lane).map_or(0, |mem| mem.slots.len())
    }

    fn point(&mut self, lane: LaneId, index: usize) -> Result<EnvelopePoint> {
        let mem = self.lane_ref(lane).ok_or(StoreError::InvalidLane(lane))?;
        let slot = mem.slots.get(index).ok_or(StoreError::OutOfBounds {
            index,
            count: mem.slots.len(),
        })?;
        if !slot.readable {
            return Err(StoreError::Unreadable { index });
        }
        Ok(slot.point)
    }

    fn delete(&mut self, lane: LaneId, index: usize) -> Result<()> {
        let mem = self.lane_mut(lane).ok_or(StoreError::InvalidLane(lane))?;
        if index >= mem.slots.len() {
            return Err(StoreError::OutOfBounds {
                index,
                count: mem.slots.len(),
            });
        }
        mem.slots.remove(index);
        Ok(())
    }

    fn sort(&mut self, lane: LaneId) {
        if let Some(mem) = self.lane_mut(lane) {
            mem.sort();
        }
    }
}

impl ProjectLayout for MemoryProject {
    fn envelopes(&self) -> Vec<EnvelopeRef> {
        self.envelopes
            .iter()
            .map(|env| EnvelopeRef {
                handle: env.handle,
                owner: env.owner,
            })
            .collect()
    }

    fn lanes(&self, envelope: EnvelopeHandle) -> Vec<LaneId> {
        let Some(env) = self.envelopes.iter().find(|env| env.handle == envelope) else {
            return Vec::new();
        };
        let mut lanes = Vec::with_capacity(1 + env.overlays.len());
        lanes.push(LaneId::base(envelope));
        for n in 0..env.overlays.len() {
            lanes.push(LaneId::overlay(envelope, n as u32));
        }
        lanes
    }
}
