use sched_telemetry::{Event, EventKind, InboundMessage, MetricsSnapshot, Pid, Tick};
use serde::{Deserialize, Serialize};

use crate::error::ChannelError;

/// Inbound wire shape, discriminated by `event`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WireMessage {
    Start { pid: Pid, time: Tick },
    Finish { pid: Pid, time: Tick },
    Metrics(MetricsSnapshot),
}

impl From<WireMessage> for InboundMessage {
    fn from(message: WireMessage) -> Self {
        match message {
            WireMessage::Start { pid, time } => Self::Event(Event::start(pid, time)),
            WireMessage::Finish { pid, time } => Self::Event(Event::finish(pid, time)),
            WireMessage::Metrics(snapshot) => Self::Metrics(snapshot),
        }
    }
}

impl From<InboundMessage> for WireMessage {
    fn from(message: InboundMessage) -> Self {
        match message {
            InboundMessage::Event(Event {
                kind: EventKind::Start,
                pid,
                time,
            }) => Self::Start { pid, time },
            InboundMessage::Event(Event {
                kind: EventKind::Finish,
                pid,
                time,
            }) => Self::Finish { pid, time },
            InboundMessage::Metrics(snapshot) => Self::Metrics(snapshot),
        }
    }
}

/// Parses one inbound text frame.
///
/// Unknown `event` discriminators and missing fields are malformed.
pub fn parse_inbound(text: &str) -> Result<InboundMessage, ChannelError> {
    serde_json::from_str::<WireMessage>(text)
        .map(InboundMessage::from)
        .map_err(|error| ChannelError::MalformedPayload(error.to_string()))
}

/// Encodes a message in the inbound wire shape.
pub fn encode_inbound(message: &InboundMessage) -> Result<String, ChannelError> {
    Ok(serde_json::to_string(&WireMessage::from(message.clone()))?)
}
