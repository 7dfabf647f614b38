use std::io;
use std::path::PathBuf;

use sched_telemetry::{
    Algorithm, Job, JobError, Pid, SessionPhase, TelemetrySession, TimelineProjection,
    TimelineSlice,
};
use telemetry_channel::{
    ChannelConfig, ChannelError, ChannelEvent, ConnectionManager, ConnectionRequest,
    ConnectionState, Connector, DEFAULT_QUANTUM,
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("no local jobs to simulate")]
    NoJobs,

    #[error("PID {0} is already in the local job list")]
    DuplicatePid(Pid),

    #[error(transparent)]
    InvalidJob(#[from] JobError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error("failed to read jobs file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse jobs file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One run-at-a-time dashboard over a simulation channel.
///
/// The session is the channel's message handler, so every parsed frame lands
/// in the reducer and metrics store in arrival order.
pub struct Dashboard<C: Connector> {
    manager: ConnectionManager<C, TelemetrySession>,
    algorithm: Algorithm,
    quantum: u32,
}

impl<C: Connector> Dashboard<C> {
    pub fn new(connector: C, config: &ChannelConfig) -> Self {
        Self::with_session(connector, TelemetrySession::new(), config)
    }

    pub fn with_session(connector: C, session: TelemetrySession, config: &ChannelConfig) -> Self {
        Self {
            manager: ConnectionManager::new(connector, session, config),
            algorithm: Algorithm::default(),
            quantum: DEFAULT_QUANTUM,
        }
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub fn with_quantum(mut self, quantum: u32) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    /// Starts a new run: clears the previous one, then sends the request.
    ///
    /// Nothing is cleared when the job list is rejected.
    pub fn submit(&mut self, jobs: &[Job]) -> Result<(), DashboardError> {
        if jobs.is_empty() {
            return Err(DashboardError::NoJobs);
        }
        for job in jobs {
            job.validate()?;
        }

        let request = ConnectionRequest::new(jobs.to_vec(), self.algorithm).with_quantum(self.quantum);
        self.manager.handler_mut().begin_run();
        info!(
            jobs = jobs.len(),
            algo = self.algorithm.as_str(),
            quantum = self.quantum,
            "submitting simulation run"
        );
        self.manager.send(request)?;
        Ok(())
    }

    /// Feeds one transport event through the channel. Returns the slice it
    /// finalized, if any.
    pub fn handle_channel_event(&mut self, event: ChannelEvent) -> Option<TimelineSlice> {
        let before = self.session().slices().len();
        let was_stalled = self.is_stalled();
        self.manager.handle_event(event);
        if !was_stalled && self.is_stalled() {
            warn!("channel dropped before the run completed");
        }
        self.session().slices().get(before).copied()
    }

    pub fn session(&self) -> &TelemetrySession {
        self.manager.handler()
    }

    pub fn projection(&mut self) -> &TimelineProjection {
        self.manager.handler_mut().projection()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.manager.state()
    }

    pub fn is_complete(&self) -> bool {
        self.session().phase() == SessionPhase::Completed
    }

    /// A run is in flight but its channel is gone; updates will not resume
    /// until the next submit.
    pub fn is_stalled(&self) -> bool {
        self.session().phase() == SessionPhase::Running
            && matches!(
                self.manager.state(),
                ConnectionState::Disconnected | ConnectionState::Closed
            )
    }

    pub fn close(&mut self) {
        self.manager.close();
    }
}
