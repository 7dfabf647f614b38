//! Renderer-agnostic timeline layout.
//!
//! Rows are assigned by ascending pid, so the layout depends only on the set of
//! pids present and stays stable while slices stream in. Projection is pure:
//! identical slice lists always yield identical projections.

use std::collections::BTreeSet;

use crate::core::model::{Pid, Tick, TimelineSlice};
use crate::render::palette::{Color, Palette};
use crate::render::scale::{AxisTick, OutputRange, TimeScale, DEFAULT_TICK_COUNT};

/// Bars never collapse below this width so zero-length slices stay visible.
pub const MIN_BAR_WIDTH: f64 = 2.0;

/// Vertical geometry of the row band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub row_height: f64,
    /// Offset of the first row from the top edge.
    pub top: f64,
    /// Space left between a bar and the next row.
    pub bar_inset: f64,
    /// Space below the last row reserved for the axis.
    pub footer: f64,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            row_height: 24.0,
            top: 30.0,
            bar_inset: 6.0,
            footer: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    pub pid: Pid,
    pub index: usize,
    pub y: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub pid: Pid,
    pub row: usize,
    pub start: Tick,
    pub finish: Tick,
    pub x: f64,
    pub width: f64,
    pub y: f64,
    pub height: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineProjection {
    pub rows: Vec<Row>,
    pub bars: Vec<Bar>,
    pub scale: TimeScale,
    pub ticks: Vec<AxisTick>,
    pub height: f64,
}

impl TimelineProjection {
    pub fn max_time(&self) -> Tick {
        self.scale.max_time()
    }

    pub fn row_of(&self, pid: Pid) -> Option<usize> {
        self.rows
            .binary_search_by_key(&pid, |row| row.pid)
            .ok()
    }

    pub fn color_of(&self, pid: Pid) -> Option<Color> {
        self.row_of(pid).map(|index| self.rows[index].color)
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Distinct pids present in `slices`, ascending.
pub fn pid_order(slices: &[TimelineSlice]) -> Vec<Pid> {
    slices
        .iter()
        .map(|slice| slice.pid)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineProjector {
    range: OutputRange,
    layout: RowLayout,
    palette: Palette,
    tick_count: usize,
}

impl Default for TimelineProjector {
    fn default() -> Self {
        Self {
            range: OutputRange::default(),
            layout: RowLayout::default(),
            palette: Palette::default(),
            tick_count: DEFAULT_TICK_COUNT,
        }
    }
}

impl TimelineProjector {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_range(mut self, range: OutputRange) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: RowLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn project(&self, slices: &[TimelineSlice]) -> TimelineProjection {
        let order = pid_order(slices);
        let max_time = slices.iter().map(|slice| slice.finish).max().unwrap_or(0);
        let scale = TimeScale::new(max_time, self.range);

        let rows: Vec<Row> = order
            .iter()
            .enumerate()
            .map(|(index, &pid)| Row {
                pid,
                index,
                y: self.layout.top + index as f64 * self.layout.row_height,
                color: self.palette.color_for(pid),
            })
            .collect();

        let bar_height = (self.layout.row_height - self.layout.bar_inset).max(0.0);
        let bars = slices
            .iter()
            .filter_map(|slice| {
                let row = &rows[order.binary_search(&slice.pid).ok()?];
                let x = scale.position(slice.start);
                let width = (scale.position(slice.finish) - x).max(MIN_BAR_WIDTH);
                Some(Bar {
                    pid: slice.pid,
                    row: row.index,
                    start: slice.start,
                    finish: slice.finish,
                    x,
                    width,
                    y: row.y,
                    height: bar_height,
                    color: row.color,
                })
            })
            .collect();

        let height = self.layout.top
            + rows.len() as f64 * self.layout.row_height
            + self.layout.footer;

        TimelineProjection {
            rows,
            bars,
            ticks: scale.ticks(self.tick_count),
            scale,
            height,
        }
    }
}
