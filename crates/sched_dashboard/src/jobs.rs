use std::fs;
use std::path::Path;

use sched_telemetry::Job;
use telemetry_channel::{JobSubmitter, SubmissionReport};
use tracing::debug;

use crate::app::DashboardError;

/// Jobs staged locally before a run. Submission never removes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalJobs {
    jobs: Vec<Job>,
}

impl LocalJobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON array of jobs, applying the same checks as [`LocalJobs::add`].
    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let text = fs::read_to_string(path).map_err(|source| DashboardError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, DashboardError> {
        let parsed: Vec<Job> = serde_json::from_str(text)?;
        let mut jobs = Self::new();
        for job in parsed {
            jobs.add(job)?;
        }
        Ok(jobs)
    }

    pub fn add(&mut self, job: Job) -> Result<(), DashboardError> {
        job.validate()?;
        if self.jobs.iter().any(|existing| existing.pid == job.pid) {
            return Err(DashboardError::DuplicatePid(job.pid));
        }
        debug!(pid = job.pid, "staged local job");
        self.jobs.push(job);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.jobs.clear();
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Posts every staged job to `/jobs`. The local list is kept either way so
    /// the same jobs can still be simulated over the channel.
    pub async fn submit_to_api(
        &self,
        submitter: &JobSubmitter,
    ) -> Result<SubmissionReport, DashboardError> {
        if self.jobs.is_empty() {
            return Err(DashboardError::NoJobs);
        }
        Ok(submitter.submit_all(&self.jobs).await)
    }
}

/// One-line status for a submission pass.
pub fn submission_status(report: &SubmissionReport) -> String {
    if report.is_success() {
        "All jobs submitted to API successfully".to_string()
    } else {
        format!(
            "Some submissions failed. Jobs still stored locally. Errors: {}",
            report.summary()
        )
    }
}
