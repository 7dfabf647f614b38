//! Scheduling data model shared by the reducer, projector, and channel codec.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a simulated job, unique within one simulation run.
pub type Pid = u32;

/// Simulation time in scheduler ticks.
pub type Tick = u64;

/// A job submitted for simulation. Immutable once handed to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub burst_time: Tick,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("PID {pid}: burst_time must be greater than zero")]
    ZeroBurst { pid: Pid },
}

impl Job {
    /// Builds a job, rejecting a zero burst time.
    pub fn new(pid: Pid, arrival_time: Tick, burst_time: Tick) -> Result<Self, JobError> {
        let job = Self {
            pid,
            arrival_time,
            burst_time,
        };
        job.validate()?;
        Ok(job)
    }

    /// Re-checks invariants on a job that was deserialized rather than built.
    pub fn validate(&self) -> Result<(), JobError> {
        if self.burst_time == 0 {
            return Err(JobError::ZeroBurst { pid: self.pid });
        }
        Ok(())
    }
}

/// Scheduling policy evaluated by the external simulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Fcfs,
    Rr,
}

impl Algorithm {
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Self::Fcfs,
            "rr" | "round-robin" | "round_robin" => Self::Rr,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Rr => "rr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Start,
    Finish,
}

/// One lifecycle event streamed by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub pid: Pid,
    pub time: Tick,
}

impl Event {
    pub fn start(pid: Pid, time: Tick) -> Self {
        Self {
            kind: EventKind::Start,
            pid,
            time,
        }
    }

    pub fn finish(pid: Pid, time: Tick) -> Self {
        Self {
            kind: EventKind::Finish,
            pid,
            time,
        }
    }
}

/// A finalized contiguous execution interval. `finish >= start` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimelineSlice {
    pub pid: Pid,
    pub start: Tick,
    pub finish: Tick,
}

/// Per-job row of a metrics summary.
///
/// `turnaround` and `waiting` are emitted by newer simulators only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceDetail {
    pub pid: Pid,
    pub arrival: Tick,
    pub burst: Tick,
    pub start: Tick,
    pub finish: Tick,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnaround: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting: Option<i64>,
}

impl SliceDetail {
    pub fn as_slice(&self) -> Option<TimelineSlice> {
        (self.finish >= self.start).then_some(TimelineSlice {
            pid: self.pid,
            start: self.start,
            finish: self.finish,
        })
    }
}

/// Latest simulation summary. A new snapshot supersedes the previous one wholesale.
///
/// Some simulator builds omit `algorithm`; it then deserializes as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(default)]
    pub algorithm: String,
    pub average_turnaround_time: f64,
    pub average_waiting_time: f64,
    pub process_count: u32,
    #[serde(default)]
    pub details: Vec<SliceDetail>,
}

impl MetricsSnapshot {
    /// The simulator's final schedule, one slice per detail row. Rows with
    /// `finish < start` are dropped.
    pub fn detail_slices(&self) -> Vec<TimelineSlice> {
        self.details.iter().filter_map(SliceDetail::as_slice).collect()
    }
}

/// A parsed inbound channel message.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Event(Event),
    Metrics(MetricsSnapshot),
}

impl From<Event> for InboundMessage {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

impl From<MetricsSnapshot> for InboundMessage {
    fn from(snapshot: MetricsSnapshot) -> Self {
        Self::Metrics(snapshot)
    }
}
