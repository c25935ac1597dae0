use crate::animation::{Animated, Animation, Interpolate, Transition};
use crate::geometry::{Bounds, Segment, spoke_segment};
use crate::gradient::Gradient;
use crate::style::{LineCap, Settings, SettingsError};
use crate::transaction::{Completion, Transactions};
use palette::Srgba;
use std::time::Duration;

/// Value every spoke starts with after a rebuild.
pub const INITIAL_VALUE: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Spoke {
    value: f64,
    segment: Animated<Segment>,
    color: Animated<Srgba<f64>>,
}

impl Spoke {
    fn new(segment: Segment, color: Srgba<f64>) -> Self {
        Self {
            value: INITIAL_VALUE,
            segment: Animated::new(segment),
            color: Animated::new(color),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn segment(&self) -> Segment {
        self.segment.current()
    }

    pub fn color(&self) -> Srgba<f64> {
        self.color.current()
    }

    pub fn is_animating(&self) -> bool {
        self.segment.is_animating() || self.color.is_animating()
    }
}

/// A ring of radial strokes, one per spoke, each with its own length and
/// color.
///
/// Position decides both the angle of a spoke and its place in the gradient.
/// Changing the line count throws all spokes away and builds new ones at
/// [`INITIAL_VALUE`] with gradient colors; earlier values and colors are lost.
#[derive(Debug)]
pub struct RadialLineVisualizer {
    settings: Settings,
    bounds: Bounds,
    spokes: Vec<Spoke>,
    transactions: Transactions,
}

impl Default for RadialLineVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RadialLineVisualizer {
    pub fn new() -> Self {
        let mut visualizer = Self {
            settings: Settings::default(),
            bounds: Bounds::default(),
            spokes: Vec::new(),
            transactions: Transactions::new(),
        };
        visualizer.rebuild_spokes();
        visualizer
    }

    pub fn with_settings(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let mut visualizer = Self {
            settings,
            bounds: Bounds::default(),
            spokes: Vec::new(),
            transactions: Transactions::new(),
        };
        visualizer.rebuild_spokes();
        Ok(visualizer)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn line_count(&self) -> usize {
        self.settings.line_count
    }

    pub fn max_length(&self) -> f64 {
        self.settings.max_length
    }

    pub fn line_width(&self) -> f64 {
        self.settings.line_width
    }

    pub fn line_cap(&self) -> LineCap {
        self.settings.line_cap
    }

    pub fn gradient(&self) -> &Gradient {
        &self.settings.gradient
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn spokes(&self) -> &[Spoke] {
        &self.spokes
    }

    /// Current logical value of each spoke, in position order.
    pub fn values(&self) -> Vec<f64> {
        self.spokes.iter().map(Spoke::value).collect()
    }

    /// What to draw right now: the presented segment and color of each spoke.
    pub fn strokes(&self) -> impl Iterator<Item = (Segment, Srgba<f64>)> + '_ {
        self.spokes.iter().map(|s| (s.segment(), s.color()))
    }

    pub fn is_animating(&self) -> bool {
        self.spokes.iter().any(Spoke::is_animating)
    }

    /// Whether the host should keep calling [`advance`](Self::advance):
    /// something is animating or a batch is still waiting to report.
    pub fn needs_advance(&self) -> bool {
        self.is_animating() || self.transactions.has_pending()
    }

    pub fn segment_for(&self, position: usize, value: f64) -> Segment {
        spoke_segment(
            position,
            value,
            self.settings.line_count,
            self.settings.max_length,
            self.bounds,
        )
    }

    pub fn color_for(&self, position: usize) -> Srgba<f64> {
        self.settings
            .gradient
            .color_at(position, self.settings.line_count)
    }

    pub fn set_line_count(&mut self, line_count: usize) {
        assert!(line_count > 0, "line count must be at least 1");
        self.settings.line_count = line_count;
        self.rebuild_spokes();
    }

    pub fn set_max_length(&mut self, max_length: f64) {
        assert!(
            max_length.is_finite() && max_length >= 0.0,
            "invalid maximum length {max_length}"
        );
        self.settings.max_length = max_length;
        self.snap_segments();
    }

    pub fn set_line_width(&mut self, line_width: f64) {
        assert!(
            line_width.is_finite() && line_width >= 0.0,
            "invalid line width {line_width}"
        );
        self.settings.line_width = line_width;
    }

    pub fn set_line_cap(&mut self, line_cap: LineCap) {
        self.settings.line_cap = line_cap;
    }

    /// Replaces one gradient stop and recolors every spoke from the gradient,
    /// dropping any per-spoke colors.
    pub fn set_gradient_color(&mut self, slot: usize, color: Srgba<f64>) {
        self.settings.gradient.set(slot, color);
        for position in 0..self.spokes.len() {
            let color = self.color_for(position);
            let cancelled = self.spokes[position].color.snap(color);
            self.retire(cancelled);
        }
    }

    /// Called by the host whenever the layout rectangle changes.
    pub fn layout(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.snap_segments();
    }

    /// Calls only the setters whose value differs from the current one, so
    /// an unchanged line count keeps the spokes as they are.
    pub fn apply_settings(&mut self, settings: &Settings) {
        if settings.line_count != self.settings.line_count {
            self.set_line_count(settings.line_count);
        }
        if settings.max_length != self.settings.max_length {
            self.set_max_length(settings.max_length);
        }
        if settings.line_width != self.settings.line_width {
            self.set_line_width(settings.line_width);
        }
        if settings.line_cap != self.settings.line_cap {
            self.set_line_cap(settings.line_cap);
        }
        for (slot, color) in settings.gradient.stops().iter().enumerate() {
            if *color != self.settings.gradient.stop(slot) {
                self.set_gradient_color(slot, *color);
            }
        }
    }

    pub fn set_spoke_color(&mut self, position: usize, color: Srgba<f64>, animation: Animation) {
        self.check_position(position);
        let replaced = match animation {
            Animation::Snap => self.spokes[position].color.snap(color),
            Animation::Linear(duration) => {
                let transactions = self.transactions.enlist();
                self.spokes[position]
                    .color
                    .animate_to(color, duration, transactions)
            }
        };
        self.retire(replaced);
    }

    /// Stores `value` right away, then moves the spoke's stroke to match it.
    pub fn set_spoke_value(&mut self, position: usize, value: f64, animation: Animation) {
        self.check_position(position);
        let segment = self.segment_for(position, value);
        self.spokes[position].value = value;

        let replaced = match animation {
            Animation::Snap => self.spokes[position].segment.snap(segment),
            Animation::Linear(duration) => {
                let transactions = self.transactions.enlist();
                self.spokes[position]
                    .segment
                    .animate_to(segment, duration, transactions)
            }
        };
        self.retire(replaced);
    }

    /// Runs `body` as one batch. `completion` fires once, from a later
    /// [`advance`](Self::advance), after every animation started inside the
    /// body has ended. A body that starts no animation still gets its
    /// completion on the next advance.
    pub fn batch_update<F>(&mut self, body: F, completion: Option<Completion>)
    where
        F: FnOnce(&mut Self),
    {
        let id = self.transactions.begin(completion);
        body(self);
        self.transactions.commit(id);
    }

    /// Moves every animation forward by `dt` and runs the completions of
    /// batches that are done. Returns whether anything was animating, which
    /// tells the host to redraw.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let was_animating = self.is_animating();

        let mut finished = Vec::new();
        for spoke in &mut self.spokes {
            if let Some(t) = spoke.segment.advance(dt) {
                finished.push(t.transactions().to_vec());
            }
            if let Some(t) = spoke.color.advance(dt) {
                finished.push(t.transactions().to_vec());
            }
        }
        for ids in &finished {
            self.transactions.release(ids);
        }

        let completions = self.transactions.take_resolved();
        if !completions.is_empty() {
            log::debug!("{} batch update(s) finished", completions.len());
        }
        completions.into_iter().for_each(|completion| completion());

        was_animating
    }

    fn check_position(&self, position: usize) {
        assert!(
            position < self.spokes.len(),
            "spoke position {position} out of range for {} spokes",
            self.spokes.len()
        );
    }

    fn retire<T: Interpolate>(&mut self, transition: Option<Transition<T>>) {
        if let Some(t) = transition {
            self.transactions.release(t.transactions());
        }
    }

    fn rebuild_spokes(&mut self) {
        let old = std::mem::take(&mut self.spokes);
        for spoke in old {
            self.retire(spoke.segment.into_transition());
            self.retire(spoke.color.into_transition());
        }

        self.spokes = (0..self.settings.line_count)
            .map(|position| {
                Spoke::new(
                    self.segment_for(position, INITIAL_VALUE),
                    self.color_for(position),
                )
            })
            .collect();
        log::debug!("Built {} spokes", self.spokes.len());
    }

    fn snap_segments(&mut self) {
        for position in 0..self.spokes.len() {
            let segment = self.segment_for(position, self.spokes[position].value);
            let cancelled = self.spokes[position].segment.snap(segment);
            self.retire(cancelled);
        }
    }
}
