use sched_telemetry::config::{DEFAULT_API_BASE, DEFAULT_WS_URL};

/// Path of the duplex simulation channel.
pub const WS_PATH: &str = "/ws";
/// Path of the unary job-submission endpoint.
pub const JOBS_PATH: &str = "/jobs";

/// Normalize a base URL to the simulation channel endpoint.
///
/// Normalization rules:
/// 1) empty input falls back to [`DEFAULT_WS_URL`]
/// 2) `http`/`https` schemes become `ws`/`wss`
/// 3) `/ws` is appended unless already present
pub fn normalize_ws_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_WS_URL
    } else {
        input.trim()
    };

    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base.to_string()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with(WS_PATH) {
        return trimmed.to_string();
    }
    format!("{trimmed}{WS_PATH}")
}

/// Builds the `POST /jobs` URL from an API base, dropping any trailing `/`.
pub fn jobs_url(api_base: &str) -> String {
    let base = if api_base.trim().is_empty() {
        DEFAULT_API_BASE
    } else {
        api_base.trim()
    };
    format!("{}{JOBS_PATH}", base.trim_end_matches('/'))
}

pub fn is_websocket_url(url: &str) -> bool {
    url.starts_with("ws://") || url.starts_with("wss://")
}
