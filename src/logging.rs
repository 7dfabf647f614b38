//! Tracing subscriber setup.
//!
//! Filter precedence: explicit filter (usually `SCHED_TELEMETRY_LOG`), then
//! `RUST_LOG`, then [`DEFAULT_LOG_FILTER`]. Output goes to stderr so stdout stays
//! free for rendered timelines.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Resolves the effective filter directive string.
pub fn resolve_filter(explicit: Option<&str>) -> String {
    explicit
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .or_else(|| {
            std::env::var("RUST_LOG")
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Installs the global fmt subscriber. Returns `false` when one is already set.
pub fn init_logging(explicit: Option<&str>) -> bool {
    let filter = EnvFilter::try_new(resolve_filter(explicit))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::{init_logging, resolve_filter};

    #[test]
    fn explicit_filter_wins() {
        assert_eq!(resolve_filter(Some(" debug ")), "debug");
    }

    #[test]
    fn second_init_is_a_no_op() {
        init_logging(Some("warn"));
        assert!(!init_logging(Some("warn")));
    }
}
