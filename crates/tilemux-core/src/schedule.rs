//! Refresh scheduler — per-box cadence over a cooperative tick loop.
//!
//! A box participates by declaring a `refresh` event. At each wall-clock
//! second `t`, a box with interval `I` fires iff `t % I == 0`; boxes that
//! share a tick fire in declaration order. Ticks are driven by the event
//! loop polling the clock, so a busy handler can skip a second — the box
//! simply fires on its next eligible one.

use crate::store::{keys, Entity, Store};

/// One scheduled box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// The box to refresh.
    pub box_handle: Entity,
    /// Refresh interval in seconds. Drives the firing predicate.
    pub interval: u64,
    /// Gap to the previous entry when sorted by interval ascending
    /// (cascade subtraction). Bookkeeping only; never drives firing.
    pub gap: u64,
}

/// The refresh scheduler.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    entries: Vec<ScheduleEntry>,
    last_second: Option<u64>,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the schedule from a layout's boxes.
    ///
    /// Entries keep store insertion order (which is declaration order).
    /// Gaps are recomputed by sorting a copy by interval ascending and
    /// subtracting each value from its successor.
    pub fn rebuild(&mut self, store: &Store, layout: Entity) {
        self.entries.clear();
        self.last_second = None;

        for bx in store.boxes_in(layout) {
            if store.event_named(bx, "refresh").is_none() {
                continue;
            }
            let interval = store
                .get_int(bx, keys::INTERVAL)
                .filter(|v| *v > 0)
                .unwrap_or(1) as u64;
            self.entries.push(ScheduleEntry {
                box_handle: bx,
                interval,
                gap: 0,
            });
        }

        // Cascade subtraction over the interval-sorted order.
        let mut sorted: Vec<usize> = (0..self.entries.len()).collect();
        sorted.sort_by_key(|&i| self.entries[i].interval);
        let mut previous = 0u64;
        for &i in &sorted {
            let interval = self.entries[i].interval;
            self.entries[i].gap = interval - previous;
            previous = interval;
        }
    }

    /// The boxes due at wall-clock second `now`, in declaration order.
    ///
    /// A given second is evaluated at most once; asking again within the
    /// same second returns nothing.
    pub fn due(&mut self, now: u64) -> Vec<Entity> {
        if self.last_second == Some(now) {
            return Vec::new();
        }
        self.last_second = Some(now);
        self.entries
            .iter()
            .filter(|e| now % e.interval == 0)
            .map(|e| e.box_handle)
            .collect()
    }

    /// The current schedule entries, in declaration order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Returns true if no box is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
