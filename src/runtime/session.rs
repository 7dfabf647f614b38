//! Session lifecycle across reducer, metrics, and projection.
//!
//! `Idle -> Running` on [`TelemetrySession::begin_run`] (all state cleared first),
//! `Running -> Completed` when a metrics snapshot arrives, and back to `Running`
//! on the next `begin_run`.

use tracing::{debug, info};

use crate::core::metrics::MetricsStore;
use crate::core::model::{Event, InboundMessage, MetricsSnapshot, TimelineSlice};
use crate::core::reducer::EventReducer;
use crate::render::projector::{TimelineProjection, TimelineProjector};
use crate::runtime::handler::MessageHandler;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Idle,
    Running,
    Completed,
}

/// Outcome of applying one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    /// An event was recorded without finalizing a slice.
    Recorded,
    /// An event finalized this slice.
    Slice(TimelineSlice),
    /// The metrics snapshot was replaced.
    Metrics,
}

#[derive(Debug, Clone)]
struct CachedProjection {
    slice_count: usize,
    projection: TimelineProjection,
}

#[derive(Debug, Clone, Default)]
pub struct TelemetrySession {
    phase: SessionPhase,
    reducer: EventReducer,
    metrics: MetricsStore,
    projector: TimelineProjector,
    cached: Option<CachedProjection>,
}

impl TelemetrySession {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_projector(mut self, projector: TimelineProjector) -> Self {
        self.projector = projector;
        self.cached = None;
        self
    }

    /// Session boundary: clears events, open intervals, slices, and metrics, then
    /// enters `Running`. Call before sending the run's request.
    pub fn begin_run(&mut self) {
        self.clear();
        self.phase = SessionPhase::Running;
        info!("telemetry session started");
    }

    /// Clears all state and returns to `Idle`.
    pub fn reset(&mut self) {
        self.clear();
        self.phase = SessionPhase::Idle;
    }

    fn clear(&mut self) {
        self.reducer.reset();
        self.metrics.reset();
        self.cached = None;
    }

    pub fn apply(&mut self, message: InboundMessage) -> SessionUpdate {
        match message {
            InboundMessage::Event(event) => self.apply_event(event),
            InboundMessage::Metrics(snapshot) => {
                self.apply_metrics(snapshot);
                SessionUpdate::Metrics
            }
        }
    }

    fn apply_event(&mut self, event: Event) -> SessionUpdate {
        match self.phase {
            SessionPhase::Idle => {
                debug!(pid = event.pid, "event outside a submitted run; tracking as running");
                self.phase = SessionPhase::Running;
            }
            SessionPhase::Completed => {
                debug!(pid = event.pid, "event after metrics snapshot");
            }
            SessionPhase::Running => {}
        }

        match self.reducer.apply(event) {
            Some(slice) => SessionUpdate::Slice(slice),
            None => SessionUpdate::Recorded,
        }
    }

    fn apply_metrics(&mut self, snapshot: MetricsSnapshot) {
        info!(
            algorithm = %snapshot.algorithm,
            process_count = snapshot.process_count,
            "metrics snapshot received"
        );
        self.metrics.set(snapshot);
        self.phase = SessionPhase::Completed;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn reducer(&self) -> &EventReducer {
        &self.reducer
    }

    pub fn events(&self) -> &[Event] {
        self.reducer.log()
    }

    pub fn slices(&self) -> &[TimelineSlice] {
        self.reducer.slices()
    }

    pub fn metrics(&self) -> Option<&MetricsSnapshot> {
        self.metrics.get()
    }

    /// Uncached projection of the current slices.
    pub fn project(&self) -> TimelineProjection {
        self.projector.project(self.reducer.slices())
    }

    /// Projection of the final schedule reported in the metrics snapshot,
    /// `None` until a snapshot with at least one valid detail row arrives.
    pub fn project_details(&self) -> Option<TimelineProjection> {
        let slices = self.metrics.get()?.detail_slices();
        (!slices.is_empty()).then(|| self.projector.project(&slices))
    }

    /// Projection memoized on the slice count; slices are append-only within a
    /// session, so an unchanged count means an unchanged slice list.
    pub fn projection(&mut self) -> &TimelineProjection {
        let slice_count = self.reducer.slices().len();
        let stale = self
            .cached
            .as_ref()
            .map_or(true, |cached| cached.slice_count != slice_count);
        if stale {
            self.cached = None;
        }

        let projector = &self.projector;
        let slices = self.reducer.slices();
        &self
            .cached
            .get_or_insert_with(|| CachedProjection {
                slice_count,
                projection: projector.project(slices),
            })
            .projection
    }
}

impl MessageHandler for TelemetrySession {
    fn on_message(&mut self, message: InboundMessage) {
        self.apply(message);
    }
}
