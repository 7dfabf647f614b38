//! Session lifecycle and the inbound message contract.

pub mod handler;
pub mod session;

pub use handler::MessageHandler;
pub use session::{SessionPhase, SessionUpdate, TelemetrySession};
