//! The five-pass lane reducer and the per-envelope driver.
//!
//! A reduction walks one lane five times, each pass deleting one flavor of
//! redundant point:
//!
//! 1. **Stacked triples** - three-plus points at (tolerantly) the same
//!    instant; the interior ones go, the instant's first and last survive.
//! 2. **Time duplicates** - two points at the same instant with the same
//!    value; the earlier one goes.
//! 3. **Flat-run middles** - a point whose value equals both neighbors'
//!    values lies on the segment they already imply.
//! 4. **Step repeats** - a step point that repeats the previous step's
//!    value duplicates that step; the repeat goes.
//! 5. **Edge trim** - a tail point restating the value before it, and a head
//!    point restating the value after it.
//!
//! Each pass repeats until it deletes nothing before the next pass begins,
//! and after every deleting run the lane is re-sorted by time. Time
//! comparisons are tolerant ([`time_almost_equal`]); value comparisons are
//! always exact - a segment is flat only when its amplitudes are identical.
//!
//! Within one run, indices to delete are collected during the forward scan
//! and applied back-to-front, so earlier deletions cannot invalidate the
//! ones recorded after them. Every deletion re-checks its index against a
//! freshly queried count first. A point that fails to read is skipped and
//! resets the scan window on both sides of itself; a deletion that fails is
//! dropped from the removed count. Neither failure aborts anything.

use lanecomb_core::{
    time_almost_equal, EnvelopeHandle, EnvelopePoint, LaneId, PointStore, ProjectLayout,
};
use tracing::{debug, trace};

/// A successfully read point together with the index it was read at.
///
/// The scan window buffers these instead of re-reading by index, and the
/// carried index is what gets marked for deletion - after a skipped
/// unreadable point, "the previous point" is no longer at `index - 1`.
#[derive(Clone, Copy)]
struct Seen {
    index: usize,
    point: EnvelopePoint,
}

type Pass<S> = fn(&mut S, LaneId) -> usize;

/// Reduce one lane. Returns the number of points actually deleted.
///
/// Surviving points keep their exact (time, value, shape); the lane is left
/// sorted ascending by time whenever anything was deleted.
pub fn reduce_lane<S: PointStore + ?Sized>(store: &mut S, lane: LaneId) -> usize {
    let passes: [Pass<S>; 5] = [
        stacked_triples_once,
        time_duplicates_once,
        flat_run_middles_once,
        step_repeats_once,
        edge_trim_once,
    ];

    let mut removed = 0;
    for pass in passes {
        removed += run_to_fixpoint(store, lane, pass);
    }
    if removed > 0 {
        debug!(?lane, removed, "lane reduced");
    }
    removed
}

/// Reduce every lane of one envelope: the base lane first, then each overlay
/// in index order. Returns the summed removed count.
///
/// When anything was deleted, every lane of the envelope is left time-sorted.
/// Per-lane reduction already guarantees this; it is restated here as the
/// envelope-level postcondition callers rely on.
pub fn reduce_envelope<H>(host: &mut H, envelope: EnvelopeHandle) -> usize
where
    H: PointStore + ProjectLayout + ?Sized,
{
    let mut removed = 0;
    for lane in host.lanes(envelope) {
        removed += reduce_lane(host, lane);
    }
    if removed > 0 {
        for lane in host.lanes(envelope) {
            host.sort(lane);
        }
        debug!(envelope = envelope.0, removed, "envelope reduced");
    }
    removed
}

/// Repeat `pass` until a run deletes nothing, re-sorting after every run
/// that did delete.
fn run_to_fixpoint<S: PointStore + ?Sized>(store: &mut S, lane: LaneId, pass: Pass<S>) -> usize {
    let mut removed = 0;
    loop {
        let run = pass(store, lane);
        if run == 0 {
            return removed;
        }
        removed += run;
        store.sort(lane);
    }
}

/// Drain pending deletion indices from the back, re-confirming each against
/// a fresh count. Returns the number of successful deletions.
fn apply_pending<S: PointStore + ?Sized>(
    store: &mut S,
    lane: LaneId,
    mut pending: Vec<usize>,
) -> usize {
    let mut removed = 0;
    while let Some(index) = pending.pop() {
        if index >= store.count(lane) {
            continue;
        }
        match store.delete(lane, index) {
            Ok(()) => removed += 1,
            Err(err) => trace!(%err, index, "delete failed, skipped"),
        }
    }
    removed
}

/// Interior points of a run of three-plus points stacked at the same
/// instant.
fn stacked_triples_once<S: PointStore + ?Sized>(store: &mut S, lane: LaneId) -> usize {
    let mut pending = Vec::new();
    let mut prev2: Option<Seen> = None;
    let mut prev1: Option<Seen> = None;

    for index in 0..store.count(lane) {
        let point = match store.point(lane, index) {
            Ok(point) => point,
            Err(err) => {
                trace!(%err, index, "unreadable point, window reset");
                prev2 = None;
                prev1 = None;
                continue;
            }
        };
        if let (Some(p2), Some(p1)) = (prev2, prev1) {
            if time_almost_equal(p1.point.time, point.time)
                && time_almost_equal(p2.point.time, p1.point.time)
            {
                pending.push(p1.index);
            }
        }
        prev2 = prev1;
        prev1 = Some(Seen { index, point });
    }
    apply_pending(store, lane, pending)
}

/// The earlier of two points at the same instant with the same value.
fn time_duplicates_once<S: PointStore + ?Sized>(store: &mut S, lane: LaneId) -> usize {
    let mut pending = Vec::new();
    let mut prev: Option<Seen> = None;

    for index in 0..store.count(lane) {
        let point = match store.point(lane, index) {
            Ok(point) => point,
            Err(err) => {
                trace!(%err, index, "unreadable point, window reset");
                prev = None;
                continue;
            }
        };
        if let Some(p) = prev {
            if time_almost_equal(p.point.time, point.time) && p.point.value == point.value {
                pending.push(p.index);
            }
        }
        prev = Some(Seen { index, point });
    }
    apply_pending(store, lane, pending)
}

/// The middle of three consecutive points with identical values.
fn flat_run_middles_once<S: PointStore + ?Sized>(store: &mut S, lane: LaneId) -> usize {
    let mut pending = Vec::new();
    let mut prev2: Option<Seen> = None;
    let mut prev1: Option<Seen> = None;

    for index in 0..store.count(lane) {
        let point = match store.point(lane, index) {
            Ok(point) => point,
            Err(err) => {
                trace!(%err, index, "unreadable point, window reset");
                prev2 = None;
                prev1 = None;
                continue;
            }
        };
        if let (Some(p2), Some(p1)) = (prev2, prev1) {
            if p1.point.value == point.value && p2.point.value == p1.point.value {
                pending.push(p1.index);
            }
        }
        prev2 = prev1;
        prev1 = Some(Seen { index, point });
    }
    apply_pending(store, lane, pending)
}

/// A step point repeating the previous step's value. Unlike the other
/// passes this marks the later point: the first step did the work, the
/// repeat is the duplicate.
fn step_repeats_once<S: PointStore + ?Sized>(store: &mut S, lane: LaneId) -> usize {
    let mut pending = Vec::new();
    let mut prev: Option<Seen> = None;

    for index in 0..store.count(lane) {
        let point = match store.point(lane, index) {
            Ok(point) => point,
            Err(err) => {
                trace!(%err, index, "unreadable point, window reset");
                prev = None;
                continue;
            }
        };
        if let Some(p) = prev {
            if p.point.shape.is_square()
                && point.shape.is_square()
                && p.point.value == point.value
            {
                pending.push(index);
            }
        }
        prev = Some(Seen { index, point });
    }
    apply_pending(store, lane, pending)
}

/// A tail point restating the value before it, then a head point restating
/// the value after it. Each check re-queries the count and deletes directly;
/// an unreadable edge point leaves that edge alone.
fn edge_trim_once<S: PointStore + ?Sized>(store: &mut S, lane: LaneId) -> usize {
    let mut removed = 0;

    let count = store.count(lane);
    if count >= 2 {
        if let (Ok(before), Ok(tail)) = (store.point(lane, count - 2), store.point(lane, count - 1))
        {
            if before.value == tail.value && store.delete(lane, count - 1).is_ok() {
                removed += 1;
            }
        }
    }

    let count = store.count(lane);
    if count >= 2 {
        if let (Ok(head), Ok(after)) = (store.point(lane, 0), store.point(lane, 1)) {
            if head.value == after.value && store.delete(lane, 0).is_ok() {
                removed += 1;
            }
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanecomb_core::{EnvelopeOwner, MemoryProject, PointShape};

    fn lane_with(points: &[(f64, f64, i32)]) -> (MemoryProject, LaneId) {
        let mut project = MemoryProject::new();
        let env = project.add_envelope(EnvelopeOwner::Track);
        let lane = LaneId::base(env);
        for &(time, value, shape) in points {
            project.push_point(
                lane,
                EnvelopePoint::with_shape(time, value, PointShape::from_raw(shape)),
            );
        }
        (project, lane)
    }

    fn triples(project: &MemoryProject, lane: LaneId) -> Vec<(f64, f64, i32)> {
        project
            .points(lane)
            .iter()
            .map(|p| (p.time, p.value, p.shape.as_raw()))
            .collect()
    }

    #[test]
    fn test_redundant_head_is_trimmed() {
        let (mut project, lane) = lane_with(&[(0.0, 0.0, 0), (1.0, 0.0, 0), (2.0, 1.0, 0)]);
        let removed = reduce_lane(&mut project, lane);
        assert_eq!(removed, 1);
        assert_eq!(triples(&project, lane), vec![(1.0, 0.0, 0), (2.0, 1.0, 0)]);
    }

    #[test]
    fn test_near_coincident_duplicate_pair() {
        let (mut project, lane) = lane_with(&[
            (0.0, 0.0, 0),
            (1.000_000_000_1, 0.0, 0),
            (1.000_000_000_2, 0.0, 0),
        ]);
        let removed = reduce_lane(&mut project, lane);
        // the earlier of the near-coincident pair goes, then the flat head
        assert_eq!(removed, 2);
        assert_eq!(triples(&project, lane), vec![(0.0, 0.0, 0)]);
    }

    #[test]
    fn test_flat_run_collapses_to_single_point() {
        let (mut project, lane) =
            lane_with(&[(0.0, 5.0, 0), (1.0, 5.0, 0), (2.0, 5.0, 0), (3.0, 5.0, 0)]);
        let removed = reduce_lane(&mut project, lane);
        // middles in one fixpoint run, then the tail, head check finds one
        // point left and stands down
        assert_eq!(removed, 3);
        assert_eq!(triples(&project, lane), vec![(0.0, 5.0, 0)]);
    }

    #[test]
    fn test_step_repeat_drops_the_repeat() {
        let (mut project, lane) = lane_with(&[(0.0, 0.0, 1), (1.0, 0.0, 1), (2.0, 7.0, 1)]);
        let removed = reduce_lane(&mut project, lane);
        assert_eq!(removed, 1);
        assert_eq!(triples(&project, lane), vec![(0.0, 0.0, 1), (2.0, 7.0, 1)]);
    }

    #[test]
    fn test_empty_and_single_point_lanes_are_noops() {
        let (mut project, lane) = lane_with(&[]);
        assert_eq!(reduce_lane(&mut project, lane), 0);

        let (mut project, lane) = lane_with(&[(1.0, 3.0, 0)]);
        assert_eq!(reduce_lane(&mut project, lane), 0);
        assert_eq!(triples(&project, lane), vec![(1.0, 3.0, 0)]);
    }

    #[test]
    fn test_stacked_instant_keeps_first_and_last() {
        let eps = f64::from_bits(1.0f64.to_bits() + 1) - 1.0;
        let (mut project, lane) = lane_with(&[
            (1.0, 0.0, 0),
            (1.0 + eps, 1.0, 0),
            (1.0 + 2.0 * eps, 2.0, 0),
            (5.0, 9.0, 0),
        ]);
        let removed = reduce_lane(&mut project, lane);
        assert_eq!(removed, 1);
        let values: Vec<f64> = project.points(lane).iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 2.0, 9.0]);
    }

    #[test]
    fn test_unreadable_point_breaks_window_and_survives() {
        let (mut project, lane) = lane_with(&[
            (0.0, 5.0, 0),
            (1.0, 5.0, 0),
            (2.0, 5.0, 0),
            (3.0, 5.0, 0),
            (4.0, 5.0, 0),
            (5.0, 5.0, 0),
        ]);
        project.poison(lane, 2);

        let removed = reduce_lane(&mut project, lane);
        // the flat-run pass cannot see across the unreadable point, so one
        // middle per side at most; edge trim then takes the readable edges
        assert_eq!(removed, 3);
        let times: Vec<f64> = project.points(lane).iter().map(|p| p.time).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
        // the unreadable point is still there, untouched
        assert!(project.point(lane, 1).is_err());
    }

    #[test]
    fn test_distinct_values_survive_untouched() {
        let original = [(0.0, 0.0, 0), (1.0, 0.5, 0), (2.0, 1.0, 0), (3.0, 0.25, 0)];
        let (mut project, lane) = lane_with(&original);
        assert_eq!(reduce_lane(&mut project, lane), 0);
        assert_eq!(triples(&project, lane), original.to_vec());
    }

    #[test]
    fn test_second_reduction_removes_nothing() {
        let (mut project, lane) = lane_with(&[
            (0.0, 1.0, 0),
            (0.5, 1.0, 0),
            (1.0, 1.0, 0),
            (2.0, 3.0, 1),
            (3.0, 3.0, 1),
            (4.0, 0.0, 0),
        ]);
        let first = reduce_lane(&mut project, lane);
        assert!(first > 0);
        assert_eq!(reduce_lane(&mut project, lane), 0);
    }

    #[test]
    fn test_linear_points_with_equal_values_need_three_in_a_row() {
        // two equal values at distinct times imply a flat segment the host
        // still needs both endpoints for
        let (mut project, lane) = lane_with(&[(0.0, 1.0, 0), (1.0, 2.0, 0), (2.0, 2.0, 0), (3.0, 1.0, 0)]);
        assert_eq!(reduce_lane(&mut project, lane), 0);
        assert_eq!(project.count(lane), 4);
    }

    #[test]
    fn test_envelope_driver_reduces_base_and_overlays() {
        let mut project = MemoryProject::new();
        let env = project.add_envelope(EnvelopeOwner::Track);
        let base = LaneId::base(env);
        for (t, v) in [(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)] {
            project.push_point(base, EnvelopePoint::new(t, v));
        }
        let overlay = project.add_overlay(env);
        for (t, v) in [(0.0, 0.0), (1.0, 0.0)] {
            project.push_point(
                overlay,
                EnvelopePoint::with_shape(t, v, PointShape::Square),
            );
        }

        let removed = reduce_envelope(&mut project, env);
        assert_eq!(removed, 3);
        assert_eq!(project.count(base), 1);
        assert_eq!(project.count(overlay), 1);
        // overlays never fold into the base lane
        assert_eq!(project.points(base)[0].value, 1.0);
        assert_eq!(project.points(overlay)[0].value, 0.0);
    }

    #[test]
    fn test_driver_leaves_lanes_sorted() {
        let mut project = MemoryProject::new();
        let env = project.add_envelope(EnvelopeOwner::Take);
        let lane = LaneId::base(env);
        // out-of-order input; a reduction must still leave ascending times
        for (t, v) in [(2.0, 4.0), (0.0, 4.0), (1.0, 4.0), (3.0, 4.0)] {
            project.push_point(lane, EnvelopePoint::new(t, v));
        }
        project.sort(lane);

        reduce_envelope(&mut project, env);
        let times: Vec<f64> = project.points(lane).iter().map(|p| p.time).collect();
        let mut sorted = times.clone();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(times, sorted);
    }
}
