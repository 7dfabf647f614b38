use std::time::Duration;

use anyhow::{bail, Context};
use sched_dashboard::render::{
    render_event, render_metrics, render_timeline, text_projector, DEFAULT_COLUMNS,
};
use sched_dashboard::{submission_status, CliArgs, Dashboard, LocalJobs, USAGE};
use sched_telemetry::logging::init_logging;
use sched_telemetry::{EnvConfig, TelemetrySession};
use telemetry_channel::{ChannelConfig, JobSubmitter, WsConnector};

const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

fn main() -> anyhow::Result<()> {
    let env = EnvConfig::from_env();
    init_logging(env.log_filter.as_deref());

    let args = CliArgs::parse(std::env::args().skip(1)).with_context(|| USAGE.to_string())?;
    let jobs = LocalJobs::load(&args.jobs_path)?;
    let config = ChannelConfig::from_env_config(&env);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to initialize tokio runtime")?;

    if args.submit_api {
        let submitter = JobSubmitter::new(&config)?;
        let report = runtime.block_on(jobs.submit_to_api(&submitter))?;
        println!("{}", submission_status(&report));
    }

    let (connector, mut events) = WsConnector::new(&config, runtime.handle().clone());
    let session = TelemetrySession::new().with_projector(text_projector(DEFAULT_COLUMNS));
    let mut dashboard = Dashboard::with_session(connector, session, &config)
        .with_algorithm(args.algorithm)
        .with_quantum(args.quantum);

    dashboard.submit(jobs.jobs())?;
    println!(
        "Simulating {} jobs ({}, quantum {})...",
        jobs.len(),
        args.algorithm.as_str(),
        args.quantum
    );

    let mut printed_events = 0;
    while !dashboard.is_complete() && !dashboard.is_stalled() {
        let Some(event) = runtime.block_on(events.recv()) else {
            break;
        };
        let finalized = dashboard.handle_channel_event(event);

        let log = dashboard.session().events();
        for event in log.iter().skip(printed_events) {
            println!("{}", render_event(event));
        }
        printed_events = log.len();
        if let Some(slice) = finalized {
            println!(
                "  slice: PID {} ran {}..{}",
                slice.pid, slice.start, slice.finish
            );
        }
    }

    let complete = dashboard.is_complete();
    println!();
    println!("{}", render_timeline(dashboard.projection(), DEFAULT_COLUMNS));
    if let Some(snapshot) = dashboard.session().metrics() {
        println!();
        println!("{}", render_metrics(snapshot));
    }
    if let Some(schedule) = dashboard.session().project_details() {
        println!();
        println!("Final schedule:");
        println!("{}", render_timeline(&schedule, DEFAULT_COLUMNS));
    }

    dashboard.close();
    drop(dashboard);
    // Channel tasks hold the event sender until their socket is shut down.
    runtime.block_on(async {
        let _ = tokio::time::timeout(SHUTDOWN_GRACE, async {
            while events.recv().await.is_some() {}
        })
        .await;
    });

    if !complete {
        bail!("channel dropped before metrics arrived; submit again to retry");
    }
    Ok(())
}
