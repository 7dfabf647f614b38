//! Timeline projection pipeline.

pub mod palette;
pub mod projector;
pub mod scale;

pub use palette::{Color, Palette, DEFAULT_COLORS};
pub use projector::{
    pid_order, Bar, Row, RowLayout, TimelineProjection, TimelineProjector, MIN_BAR_WIDTH,
};
pub use scale::{AxisTick, OutputRange, TimeScale, DEFAULT_TICK_COUNT};
