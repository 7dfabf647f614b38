//! Transport for the scheduling telemetry client.
//!
//! This crate owns the simulation channel and the job-submission endpoint:
//! URL normalization, the inbound/outbound wire codec, the
//! [`ConnectionManager`] state machine, its WebSocket [`WsConnector`], and the
//! [`JobSubmitter`] REST fallback. Reduction and projection of the streamed
//! events live in `sched_telemetry`; nothing here renders.
//!
//! A dropped channel is not re-dialed on its own. The next
//! [`ConnectionManager::send`] reconnects; until then updates stall.

pub mod config;
pub mod connection;
pub mod error;
pub mod events;
pub mod jobs;
pub mod payload;
pub mod retry;
pub mod url;
pub mod ws;

pub use config::ChannelConfig;
pub use connection::{
    ChannelEvent, ChannelEventKind, ChannelHandle, ChannelId, ConnectionManager, ConnectionState,
    Connector,
};
pub use error::ChannelError;
pub use events::{encode_inbound, parse_inbound, WireMessage};
pub use jobs::{JobFailure, JobSubmitter, SubmissionReport};
pub use payload::{ConnectionRequest, DEFAULT_QUANTUM};
pub use url::{jobs_url, normalize_ws_url};
pub use ws::{WsConnector, WsHandle};
