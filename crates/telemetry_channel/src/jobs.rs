use reqwest::Client;
use sched_telemetry::Job;
use tracing::{info, warn};

use crate::config::ChannelConfig;
use crate::error::{status_message, ChannelError};
use crate::url::jobs_url;

/// Separator between per-job entries in [`SubmissionReport::summary`].
pub const SUMMARY_SEPARATOR: &str = " | ";

/// Unary `POST /jobs` submitter, independent of the simulation channel.
#[derive(Debug)]
pub struct JobSubmitter {
    http: Client,
    url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    pub job: Job,
    pub message: String,
}

/// Per-job outcome of one [`JobSubmitter::submit_all`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub succeeded: Vec<Job>,
    pub failures: Vec<JobFailure>,
}

impl SubmissionReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed_jobs(&self) -> Vec<Job> {
        self.failures.iter().map(|failure| failure.job).collect()
    }

    /// `PID <pid>: <reason>` entries joined with ` | `.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|failure| format!("PID {}: {}", failure.job.pid, failure.message))
            .collect::<Vec<_>>()
            .join(SUMMARY_SEPARATOR)
    }
}

impl JobSubmitter {
    pub fn new(config: &ChannelConfig) -> Result<Self, ChannelError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            url: jobs_url(&config.api_base),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn submit(&self, job: &Job) -> Result<(), ChannelError> {
        job.validate()?;
        let response = self.http.post(&self.url).json(job).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ChannelError::Status {
            status,
            message: status_message(status, &body),
        })
    }

    /// Submits every job in order. Failures are collected, never retried.
    pub async fn submit_all(&self, jobs: &[Job]) -> SubmissionReport {
        let mut report = SubmissionReport::default();
        for job in jobs {
            match self.submit(job).await {
                Ok(()) => report.succeeded.push(*job),
                Err(error) => {
                    let message = failure_message(&error);
                    warn!(pid = job.pid, %message, "job submission failed");
                    report.failures.push(JobFailure { job: *job, message });
                }
            }
        }
        info!(
            succeeded = report.succeeded.len(),
            failed = report.failures.len(),
            url = %self.url,
            "job submission finished"
        );
        report
    }
}

fn failure_message(error: &ChannelError) -> String {
    match error {
        ChannelError::Status { status, message } => format!("{} {message}", status.as_u16()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn job(pid: u32) -> Job {
        Job::new(pid, 0, 2).expect("valid job")
    }

    #[test]
    fn summary_joins_failures_with_pipes() {
        let report = SubmissionReport {
            succeeded: vec![job(1)],
            failures: vec![
                JobFailure {
                    job: job(2),
                    message: "500 boom".to_string(),
                },
                JobFailure {
                    job: job(3),
                    message: "connection refused".to_string(),
                },
            ],
        };
        assert!(!report.is_success());
        assert_eq!(report.failed_jobs(), vec![job(2), job(3)]);
        assert_eq!(report.summary(), "PID 2: 500 boom | PID 3: connection refused");
    }

    #[test]
    fn status_failures_render_code_then_body() {
        let error = ChannelError::Status {
            status: StatusCode::BAD_REQUEST,
            message: "bad job".to_string(),
        };
        assert_eq!(failure_message(&error), "400 bad job");
    }

    #[test]
    fn submitter_targets_jobs_path() {
        let config = ChannelConfig::default().with_api_base("http://sim.local:9000/");
        let submitter = JobSubmitter::new(&config).expect("client");
        assert_eq!(submitter.url(), "http://sim.local:9000/jobs");
    }
}
