use sched_telemetry::{Algorithm, Job};
use serde::{Deserialize, Serialize};

use crate::error::ChannelError;

/// Round-robin time slice used when the caller gives none.
pub const DEFAULT_QUANTUM: u32 = 2;

/// Outbound simulation request. One per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    pub jobs: Vec<Job>,
    /// Default: `fcfs`.
    #[serde(default)]
    pub algo: Algorithm,
    /// Default: 2.
    #[serde(default = "default_quantum")]
    pub quantum: u32,
}

fn default_quantum() -> u32 {
    DEFAULT_QUANTUM
}

impl ConnectionRequest {
    pub fn new(jobs: Vec<Job>, algo: Algorithm) -> Self {
        Self {
            jobs,
            algo,
            quantum: DEFAULT_QUANTUM,
        }
    }

    pub fn with_quantum(mut self, quantum: u32) -> Self {
        self.quantum = quantum;
        self
    }

    /// Checks every job; the first invalid one fails the request.
    pub fn validate(&self) -> Result<(), ChannelError> {
        for job in &self.jobs {
            job.validate()?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ChannelError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConnectionRequest, DEFAULT_QUANTUM};
    use sched_telemetry::{Algorithm, Job};
    use serde_json::json;

    #[test]
    fn request_serializes_wire_shape() {
        let job = Job::new(1, 0, 5).expect("valid job");
        let request = ConnectionRequest::new(vec![job], Algorithm::Rr).with_quantum(3);
        let value: serde_json::Value =
            serde_json::from_str(&request.to_json().expect("encode")).expect("json");

        assert_eq!(
            value,
            json!({
                "jobs": [{"pid": 1, "arrival_time": 0, "burst_time": 5}],
                "algo": "rr",
                "quantum": 3
            })
        );
    }

    #[test]
    fn missing_algo_and_quantum_use_defaults() {
        let request: ConnectionRequest =
            serde_json::from_str(r#"{"jobs":[]}"#).expect("decode");
        assert_eq!(request.algo, Algorithm::Fcfs);
        assert_eq!(request.quantum, DEFAULT_QUANTUM);
    }
}
