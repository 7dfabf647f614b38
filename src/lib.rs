//! Live-telemetry core for a process-scheduling visualizer.
//!
//! Invariant: all state mutation flows through [`TelemetrySession::apply`] (or its
//! [`MessageHandler`] impl) and [`TelemetrySession::begin_run`]; projection is a pure
//! function of the slice list.
//!
//! # Public API Overview
//! - Reduce `start`/`finish` events into [`TimelineSlice`]s with [`EventReducer`].
//! - Hold the latest summary in a replace-only [`MetricsStore`].
//! - Map slices to rows, bar geometry, axis ticks, and class colors with
//!   [`TimelineProjector`].
//! - Compose all of it per run with [`TelemetrySession`].
//!
//! Transport lives in the `telemetry_channel` crate; this crate performs no I/O.

#![allow(clippy::unnecessary_map_or)]

pub mod config;
pub mod logging;

pub mod core;
pub mod render;
pub mod runtime;

/// Scheduling data model.
pub use crate::core::model::{
    Algorithm, Event, EventKind, InboundMessage, Job, JobError, MetricsSnapshot, Pid,
    SliceDetail, Tick, TimelineSlice,
};

/// Pure state.
pub use crate::core::metrics::MetricsStore;
pub use crate::core::reducer::EventReducer;

/// Projection types.
pub use crate::render::{
    pid_order, AxisTick, Bar, Color, OutputRange, Palette, Row, RowLayout, TimeScale,
    TimelineProjection, TimelineProjector,
};

/// Session lifecycle and inbound contract.
pub use crate::runtime::{MessageHandler, SessionPhase, SessionUpdate, TelemetrySession};

pub use crate::config::EnvConfig;
