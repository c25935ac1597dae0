//! What the sample screen does with the visualizer.

use crate::config::SampleConfig;
use circle_visualizer::{Animation, Completion, RadialLineVisualizer};
use palette::Srgba;

/// Value each spoke is raised to as the sweep passes it.
pub const SWEEP_VALUE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStep {
    /// A spoke was updated; call again after the sweep delay.
    Continue,
    Done,
}

/// Walks the spokes clockwise from the top, raising each one to full length
/// in the highlight color.
#[derive(Debug, Clone)]
pub struct Sweep {
    next: usize,
    color: Srgba<f64>,
    animation: Animation,
}

impl Sweep {
    pub fn new(config: &SampleConfig) -> Self {
        Self {
            next: 0,
            color: config.highlight.to_srgba(),
            animation: config.animation(),
        }
    }

    pub fn position(&self) -> usize {
        self.next
    }

    pub fn step(&mut self, visualizer: &mut RadialLineVisualizer) -> SweepStep {
        if self.next >= visualizer.line_count() {
            return SweepStep::Done;
        }

        visualizer.set_spoke_value(self.next, SWEEP_VALUE, self.animation);
        visualizer.set_spoke_color(self.next, self.color, self.animation);
        self.next += 1;
        SweepStep::Continue
    }
}

/// Brings every spoke back to the resting value and color in one batch.
pub fn reset(
    visualizer: &mut RadialLineVisualizer,
    config: &SampleConfig,
    completion: Option<Completion>,
) {
    let color = config.reset_color.to_srgba();
    let animation = config.animation();

    visualizer.batch_update(
        |v| {
            for position in 0..v.line_count() {
                v.set_spoke_color(position, color, animation);
                v.set_spoke_value(position, config.reset_value, animation);
            }
        },
        completion,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use circle_visualizer::Bounds;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    fn visualizer(line_count: usize) -> RadialLineVisualizer {
        let mut visualizer = RadialLineVisualizer::new();
        visualizer.set_line_count(line_count);
        visualizer.layout(Bounds::from_size(300.0, 300.0));
        visualizer
    }

    fn settle(visualizer: &mut RadialLineVisualizer) {
        while visualizer.needs_advance() {
            visualizer.advance(Duration::from_millis(16));
        }
    }

    #[test]
    fn test_reset_lowers_and_grays_every_spoke() {
        let config = SampleConfig::default();
        let mut visualizer = visualizer(16);
        let finished = Rc::new(Cell::new(0));
        let handle = finished.clone();

        reset(
            &mut visualizer,
            &config,
            Some(Box::new(move || handle.set(handle.get() + 1))),
        );
        assert_eq!(visualizer.values(), vec![0.5; 16]);
        assert_eq!(finished.get(), 0);

        settle(&mut visualizer);
        assert_eq!(finished.get(), 1);
        let gray = config.reset_color.to_srgba();
        for (position, (segment, color)) in visualizer.strokes().enumerate() {
            assert_eq!(color, gray);
            assert_eq!(segment, visualizer.segment_for(position, 0.5));
        }
    }

    #[test]
    fn test_sweep_visits_every_spoke_in_order() {
        let config = SampleConfig::default();
        let mut visualizer = visualizer(8);
        reset(&mut visualizer, &config, None);
        settle(&mut visualizer);

        let mut sweep = Sweep::new(&config);
        for position in 0..8 {
            assert_eq!(sweep.step(&mut visualizer), SweepStep::Continue);
            assert_eq!(sweep.position(), position + 1);
            assert_eq!(visualizer.values()[position], SWEEP_VALUE);
            if position + 1 < 8 {
                assert_eq!(visualizer.values()[position + 1], config.reset_value);
            }
            visualizer.advance(config.sweep_delay());
        }
        assert_eq!(sweep.step(&mut visualizer), SweepStep::Done);

        settle(&mut visualizer);
        let highlight = config.highlight.to_srgba();
        assert!(visualizer.strokes().all(|(_, color)| color == highlight));
        assert_eq!(visualizer.values(), vec![SWEEP_VALUE; 8]);
    }

    #[test]
    fn test_sweep_stops_when_line_count_shrinks() {
        let config = SampleConfig::default();
        let mut visualizer = visualizer(8);
        let mut sweep = Sweep::new(&config);

        for _ in 0..5 {
            sweep.step(&mut visualizer);
        }
        visualizer.set_line_count(4);
        assert_eq!(sweep.step(&mut visualizer), SweepStep::Done);
    }
}
