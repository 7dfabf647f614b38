#![allow(unused_imports)]

use sched_telemetry::config::{DEFAULT_API_BASE, DEFAULT_WS_URL};
use sched_telemetry::logging::{init_logging, resolve_filter, DEFAULT_LOG_FILTER};
use sched_telemetry::render::{DEFAULT_COLORS, DEFAULT_TICK_COUNT, MIN_BAR_WIDTH};
use sched_telemetry::{
    pid_order, Algorithm, AxisTick, Bar, Color, EnvConfig, Event, EventKind, EventReducer,
    InboundMessage, Job, JobError, MessageHandler, MetricsSnapshot, MetricsStore, OutputRange,
    Palette, Pid, Row, RowLayout, SessionPhase, SessionUpdate, SliceDetail, TelemetrySession,
    Tick, TimeScale, TimelineProjection, TimelineProjector, TimelineSlice,
};

#[test]
fn public_api_exports_compile() {}

#[test]
fn closures_are_message_handlers() {
    let mut seen = Vec::new();
    {
        let mut handler = |message: InboundMessage| seen.push(message);
        handler.on_message(Event::start(1, 0).into());
    }
    assert_eq!(seen, vec![InboundMessage::Event(Event::start(1, 0))]);
}
