//! Stepping the visualizer from frame clock timestamps.

use circle_visualizer::RadialLineVisualizer;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub redraw: bool,
    /// False once nothing is animating and no batch is waiting to report.
    pub keep_ticking: bool,
}

/// Turns frame times (microseconds, as reported by `gdk::FrameClock`) into
/// [`RadialLineVisualizer::advance`] steps. The first frame after going idle
/// advances by zero.
#[derive(Debug, Default)]
pub struct FrameTicker {
    last_frame: Option<i64>,
}

impl FrameTicker {
    pub fn tick(&mut self, frame_time: i64, visualizer: &mut RadialLineVisualizer) -> Frame {
        let dt = self
            .last_frame
            .replace(frame_time)
            .map_or(Duration::ZERO, |last| {
                Duration::from_micros(frame_time.saturating_sub(last).max(0) as u64)
            });

        let redraw = visualizer.needs_advance() && visualizer.advance(dt);
        let keep_ticking = visualizer.needs_advance();
        if !keep_ticking {
            self.last_frame = None;
        }

        Frame {
            redraw,
            keep_ticking,
        }
    }
}
