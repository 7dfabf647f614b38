//! Plain-text rendering of a projected timeline and its metrics.

use sched_telemetry::{
    Event, EventKind, MetricsSnapshot, OutputRange, RowLayout, TimelineProjection,
    TimelineProjector,
};

/// Columns reserved for the `PID n` row label.
pub const LABEL_COLUMNS: usize = 8;
pub const DEFAULT_COLUMNS: usize = 72;

const FILLED: char = '#';
const EMPTY: char = '.';

/// Projector whose output range is measured in terminal columns.
pub fn text_projector(columns: usize) -> TimelineProjector {
    let columns = columns.max(LABEL_COLUMNS + 1);
    TimelineProjector::new()
        .with_range(OutputRange::new(columns as f64, LABEL_COLUMNS as f64, 0.0))
        .with_layout(RowLayout {
            row_height: 1.0,
            top: 0.0,
            bar_inset: 0.0,
            footer: 1.0,
        })
}

/// One line per row plus an axis line. The projection must come from
/// [`text_projector`] with the same `columns`.
pub fn render_timeline(projection: &TimelineProjection, columns: usize) -> String {
    if projection.is_empty() {
        return "(no finished slices)".to_string();
    }

    let cells = columns.max(LABEL_COLUMNS + 1) - LABEL_COLUMNS;
    let mut lines = Vec::with_capacity(projection.rows.len() + 1);

    for row in &projection.rows {
        let mut track = vec![EMPTY; cells];
        for bar in projection.bars.iter().filter(|bar| bar.row == row.index) {
            let from = column_of(bar.x, cells);
            let to = column_of(bar.x + bar.width, cells).max(from + 1).min(cells);
            for cell in &mut track[from.min(cells)..to] {
                *cell = FILLED;
            }
        }
        let label = format!("PID {}", row.pid);
        lines.push(format!(
            "{label:<width$}{}",
            track.into_iter().collect::<String>(),
            width = LABEL_COLUMNS
        ));
    }

    lines.push(render_axis(projection, cells));
    lines.join("\n")
}

fn column_of(position: f64, cells: usize) -> usize {
    let offset = (position - LABEL_COLUMNS as f64).round().max(0.0) as usize;
    offset.min(cells)
}

fn render_axis(projection: &TimelineProjection, cells: usize) -> String {
    let mut axis = vec![' '; LABEL_COLUMNS + cells];
    for tick in &projection.ticks {
        let label: Vec<char> = tick.time.to_string().chars().collect();
        if label.len() > axis.len() {
            continue;
        }
        let start = (LABEL_COLUMNS + column_of(tick.position, cells))
            .min(axis.len().saturating_sub(label.len()));
        let end = start + label.len();
        if axis[start..end].iter().all(|cell| *cell == ' ') {
            axis[start..end].copy_from_slice(&label);
        }
    }
    axis.into_iter().collect::<String>().trim_end().to_string()
}

pub fn render_event(event: &Event) -> String {
    let kind = match event.kind {
        EventKind::Start => "start",
        EventKind::Finish => "finish",
    };
    format!("[{}] PID {} {kind}", event.time, event.pid)
}

pub fn render_metrics(snapshot: &MetricsSnapshot) -> String {
    let mut lines = Vec::new();
    if !snapshot.algorithm.is_empty() {
        lines.push(format!("Algorithm: {}", snapshot.algorithm.to_uppercase()));
    }
    lines.push(format!(
        "Average turnaround time: {:.2}",
        snapshot.average_turnaround_time
    ));
    lines.push(format!(
        "Average waiting time: {:.2}",
        snapshot.average_waiting_time
    ));
    lines.push(format!("Processes: {}", snapshot.process_count));

    for detail in &snapshot.details {
        let mut line = format!(
            "  PID {}: arrival {} burst {} start {} finish {}",
            detail.pid, detail.arrival, detail.burst, detail.start, detail.finish
        );
        if let Some(turnaround) = detail.turnaround {
            line.push_str(&format!(" turnaround {turnaround}"));
        }
        if let Some(waiting) = detail.waiting {
            line.push_str(&format!(" waiting {waiting}"));
        }
        lines.push(line);
    }
    lines.join("\n")
}
