use reqwest::StatusCode;
use sched_telemetry::JobError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("invalid channel URL: {0}")]
    InvalidUrl(String),

    #[error("connect to {url} failed: {message}")]
    Connect { url: String, message: String },

    #[error("connect to {url} timed out")]
    ConnectTimeout { url: String },

    #[error("channel transport error: {0}")]
    Transport(String),

    #[error("channel is not open")]
    NotOpen,

    #[error("malformed inbound payload: {0}")]
    MalformedPayload(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} {message}")]
    Status { status: StatusCode, message: String },

    #[error(transparent)]
    InvalidJob(#[from] JobError),
}

/// Message for a non-2xx `POST /jobs` response: the body when present, else the
/// canonical reason.
pub fn status_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
