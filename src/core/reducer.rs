//! Event-log reduction into finalized timeline slices.
//!
//! Invariants:
//! - at most one open interval per pid,
//! - the slice list is append-only until [`EventReducer::reset`],
//! - anomalous orderings (orphan finish, duplicate start) are normalized, never errors.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::model::{Event, EventKind, Pid, Tick, TimelineSlice};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventReducer {
    log: Vec<Event>,
    open: BTreeMap<Pid, Tick>,
    slices: Vec<TimelineSlice>,
}

impl EventReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduces a whole event sequence from an empty log.
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        events.into_iter().fold(Self::new(), Self::reduce)
    }

    /// By-value transition: `(state, event) -> state'`.
    #[must_use]
    pub fn reduce(mut self, event: Event) -> Self {
        self.apply(event);
        self
    }

    /// Applies one event in place and returns the slice it finalized, if any.
    pub fn apply(&mut self, event: Event) -> Option<TimelineSlice> {
        self.log.push(event);
        match event.kind {
            EventKind::Start => {
                self.start(event.pid, event.time);
                None
            }
            EventKind::Finish => self.finish(event.pid, event.time),
        }
    }

    fn start(&mut self, pid: Pid, time: Tick) {
        if let Some(previous) = self.open.insert(pid, time) {
            debug!(pid, previous, time, "duplicate start; keeping latest start time");
        }
    }

    fn finish(&mut self, pid: Pid, time: Tick) -> Option<TimelineSlice> {
        let Some(&start) = self.open.get(&pid) else {
            debug!(pid, time, "finish without open interval; dropped");
            return None;
        };

        if time < start {
            debug!(pid, start, time, "finish precedes open start; dropped");
            return None;
        }

        self.open.remove(&pid);
        let slice = TimelineSlice {
            pid,
            start,
            finish: time,
        };
        self.slices.push(slice);
        Some(slice)
    }

    /// Clears the event log, open intervals, and slices.
    pub fn reset(&mut self) {
        self.log.clear();
        self.open.clear();
        self.slices.clear();
    }

    pub fn log(&self) -> &[Event] {
        &self.log
    }

    pub fn slices(&self) -> &[TimelineSlice] {
        &self.slices
    }

    pub fn open_intervals(&self) -> &BTreeMap<Pid, Tick> {
        &self.open
    }

    pub fn open_start(&self, pid: Pid) -> Option<Tick> {
        self.open.get(&pid).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty() && self.open.is_empty() && self.slices.is_empty()
    }
}
