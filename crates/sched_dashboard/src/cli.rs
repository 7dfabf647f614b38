use std::path::PathBuf;

use sched_telemetry::Algorithm;
use telemetry_channel::DEFAULT_QUANTUM;
use thiserror::Error;

pub const USAGE: &str = "usage: sched-dashboard <jobs.json> [fcfs|rr] [quantum] [--submit-api]";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    #[error("missing jobs file")]
    MissingJobsPath,

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("quantum must be a positive integer, got {0}")]
    InvalidQuantum(String),

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub jobs_path: PathBuf,
    pub algorithm: Algorithm,
    pub quantum: u32,
    pub submit_api: bool,
}

impl CliArgs {
    /// Parses arguments after the program name.
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut positional = Vec::new();
        let mut submit_api = false;
        for arg in args {
            match arg.as_str() {
                "--submit-api" => submit_api = true,
                flag if flag.starts_with("--") => {
                    return Err(CliError::UnexpectedArgument(arg));
                }
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let jobs_path = positional
            .next()
            .map(PathBuf::from)
            .ok_or(CliError::MissingJobsPath)?;
        let algorithm = match positional.next() {
            Some(value) => {
                Algorithm::parse(&value).ok_or(CliError::UnknownAlgorithm(value))?
            }
            None => Algorithm::default(),
        };
        let quantum = match positional.next() {
            Some(value) => match value.parse::<u32>() {
                Ok(quantum) if quantum > 0 => quantum,
                _ => return Err(CliError::InvalidQuantum(value)),
            },
            None => DEFAULT_QUANTUM,
        };
        if let Some(extra) = positional.next() {
            return Err(CliError::UnexpectedArgument(extra));
        }

        Ok(Self {
            jobs_path,
            algorithm,
            quantum,
            submit_api,
        })
    }
}
