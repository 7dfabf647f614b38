use std::time::Duration;

use sched_telemetry::config::{EnvConfig, DEFAULT_API_BASE, DEFAULT_WS_URL};

use crate::retry::MAX_CONNECT_RETRIES;

/// Transport configuration for the simulation channel and job endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Base or full URL of the duplex channel; normalized to `/ws`.
    pub endpoint: String,
    /// Base URL for `POST /jobs`.
    pub api_base: String,
    /// Optional bound on one connect attempt.
    pub connect_timeout: Option<Duration>,
    /// Optional bound on one job submission request.
    pub request_timeout: Option<Duration>,
    /// Extra connect attempts after a failed dial. `0` keeps the lazy
    /// reconnect-on-send policy only.
    pub connect_retries: u32,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_WS_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: None,
            request_timeout: None,
            connect_retries: 0,
        }
    }
}

impl ChannelConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn from_env_config(env: &EnvConfig) -> Self {
        let mut config = Self::new(env.ws_url.clone())
            .with_api_base(env.api_base.clone())
            .with_connect_retries(env.connect_retries);
        if let Some(timeout) = env.connect_timeout {
            config = config.with_connect_timeout(timeout);
        }
        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Clamped to [`MAX_CONNECT_RETRIES`].
    pub fn with_connect_retries(mut self, retries: u32) -> Self {
        self.connect_retries = retries.min(MAX_CONNECT_RETRIES);
        self
    }
}
