use crate::core::model::Tick;

/// Ticks emitted along the time axis by default (both ends included).
pub const DEFAULT_TICK_COUNT: usize = 6;

/// Horizontal output extent with fixed leading and trailing margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRange {
    pub width: f64,
    pub margin_start: f64,
    pub margin_end: f64,
}

impl Default for OutputRange {
    fn default() -> Self {
        Self {
            width: 700.0,
            margin_start: 80.0,
            margin_end: 20.0,
        }
    }
}

impl OutputRange {
    pub fn new(width: f64, margin_start: f64, margin_end: f64) -> Self {
        Self {
            width,
            margin_start,
            margin_end,
        }
    }

    /// Drawable extent between the margins; never negative.
    pub fn span(&self) -> f64 {
        (self.width - self.margin_start - self.margin_end).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTick {
    pub time: Tick,
    pub position: f64,
}

/// Linear `time -> position` map over `[0, max_time]`.
///
/// `max_time` is floored at 1 so an empty timeline still scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    max_time: Tick,
    range: OutputRange,
}

impl TimeScale {
    pub fn new(max_time: Tick, range: OutputRange) -> Self {
        Self {
            max_time: max_time.max(1),
            range,
        }
    }

    pub fn max_time(&self) -> Tick {
        self.max_time
    }

    pub fn range(&self) -> OutputRange {
        self.range
    }

    pub fn position(&self, time: Tick) -> f64 {
        self.position_at(time as f64)
    }

    pub fn position_at(&self, time: f64) -> f64 {
        (time / self.max_time as f64) * self.range.span() + self.range.margin_start
    }

    /// Evenly spaced ticks from 0 to `max_time`, labels rounded to whole ticks.
    pub fn ticks(&self, count: usize) -> Vec<AxisTick> {
        match count {
            0 => Vec::new(),
            1 => vec![self.tick_at(0)],
            _ => {
                let steps = (count - 1) as f64;
                (0..count)
                    .map(|index| {
                        let time = (index as f64 / steps) * self.max_time as f64;
                        self.tick_at(time.round() as Tick)
                    })
                    .collect()
            }
        }
    }

    fn tick_at(&self, time: Tick) -> AxisTick {
        AxisTick {
            time,
            position: self.position(time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputRange, TimeScale};

    #[test]
    fn empty_domain_floors_at_one() {
        let scale = TimeScale::new(0, OutputRange::default());
        assert_eq!(scale.max_time(), 1);
        assert_eq!(scale.position(0), 80.0);
        assert_eq!(scale.position(1), 680.0);
    }

    #[test]
    fn position_is_linear_between_margins() {
        let scale = TimeScale::new(8, OutputRange::new(100.0, 10.0, 10.0));
        assert_eq!(scale.position(0), 10.0);
        assert_eq!(scale.position(4), 50.0);
        assert_eq!(scale.position(8), 90.0);
    }

    #[test]
    fn ticks_cover_domain_and_share_the_bar_mapping() {
        let scale = TimeScale::new(10, OutputRange::new(120.0, 10.0, 10.0));
        let ticks = scale.ticks(6);
        let times: Vec<u64> = ticks.iter().map(|tick| tick.time).collect();
        assert_eq!(times, vec![0, 2, 4, 6, 8, 10]);
        for tick in ticks {
            assert_eq!(tick.position, scale.position(tick.time));
        }
    }

    #[test]
    fn degenerate_range_collapses_to_margin() {
        let scale = TimeScale::new(5, OutputRange::new(50.0, 40.0, 20.0));
        assert_eq!(scale.position(5), 40.0);
        assert!(scale.ticks(0).is_empty());
        assert_eq!(scale.ticks(1).len(), 1);
    }
}
