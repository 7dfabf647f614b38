//! Scheduling dashboard: submits a run, follows it live, and renders the result.
//!
//! ## Environment
//!
//! - `SCHED_TELEMETRY_WS_URL`: simulation channel base, default
//!   `ws://127.0.0.1:8000` (`/ws` is appended when missing)
//! - `SCHED_TELEMETRY_API_BASE`: base for `POST /jobs`, default
//!   `http://127.0.0.1:8000`
//! - `SCHED_TELEMETRY_LOG`: tracing filter, falling back to `RUST_LOG`, then `info`
//! - `SCHED_TELEMETRY_CONNECT_RETRIES`: extra dial attempts, default `0`
//! - `SCHED_TELEMETRY_CONNECT_TIMEOUT_MS`: optional bound on one dial
//!
//! ## Jobs file
//!
//! A JSON array of jobs:
//!
//! ```json
//! [
//!   { "pid": 1, "arrival_time": 0, "burst_time": 5 },
//!   { "pid": 2, "arrival_time": 1, "burst_time": 3 }
//! ]
//! ```
//!
//! A dropped channel is not re-dialed while a run is in flight. The dashboard
//! reports the run as stalled and the caller decides whether to submit again.

pub mod app;
pub mod cli;
pub mod jobs;
pub mod render;

pub use app::{Dashboard, DashboardError};
pub use cli::{CliArgs, CliError, USAGE};
pub use jobs::{submission_status, LocalJobs};
