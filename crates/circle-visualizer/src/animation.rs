//! Linear transitions driven by explicit time steps.
//!
//! Nothing here reads a clock. The host calls [`Animated::advance`] (through
//! the visualizer) once per frame with the time since the previous frame,
//! which keeps every transition deterministic under test.

use crate::geometry::{Point, Segment};
use crate::transaction::TransactionId;
use palette::Srgba;
use std::time::Duration;

/// How a spoke property moves to its new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    /// Jump to the new value immediately.
    #[default]
    Snap,
    /// Move at constant speed over the given duration.
    Linear(Duration),
}

impl Animation {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(200);

    pub fn linear() -> Self {
        Self::Linear(Self::DEFAULT_DURATION)
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Linear(_))
    }
}

pub trait Interpolate: Copy {
    /// Value at `t` of the way from `self` to `to`.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Point {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Point::new(self.x.interpolate(&to.x, t), self.y.interpolate(&to.y, t))
    }
}

impl Interpolate for Segment {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Segment::new(
            self.start.interpolate(&to.start, t),
            self.end.interpolate(&to.end, t),
        )
    }
}

impl Interpolate for Srgba<f64> {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Srgba::new(
            self.red.interpolate(&to.red, t),
            self.green.interpolate(&to.green, t),
            self.blue.interpolate(&to.blue, t),
            self.alpha.interpolate(&to.alpha, t),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Transition<T> {
    from: T,
    to: T,
    duration: Duration,
    elapsed: Duration,
    /// Batches this transition was started in.
    transactions: Vec<TransactionId>,
}

impl<T: Interpolate> Transition<T> {
    pub fn new(from: T, to: T, duration: Duration, transactions: Vec<TransactionId>) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            transactions,
        }
    }

    pub fn target(&self) -> T {
        self.to
    }

    pub fn transactions(&self) -> &[TransactionId] {
        &self.transactions
    }

    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn sample(&self) -> T {
        if self.is_finished() {
            self.to
        } else {
            self.from.interpolate(&self.to, self.progress())
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }
}

/// A presented property that is either settled or carrying one transition.
#[derive(Debug, Clone)]
pub struct Animated<T> {
    settled: T,
    transition: Option<Transition<T>>,
}

impl<T: Interpolate> Animated<T> {
    pub fn new(value: T) -> Self {
        Self {
            settled: value,
            transition: None,
        }
    }

    /// What is on screen right now.
    pub fn current(&self) -> T {
        self.transition
            .as_ref()
            .map_or(self.settled, Transition::sample)
    }

    /// Where the property ends up once any transition finishes.
    pub fn target(&self) -> T {
        self.transition
            .as_ref()
            .map_or(self.settled, Transition::target)
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Sets the value immediately. Returns the transition that was cut short.
    pub fn snap(&mut self, value: T) -> Option<Transition<T>> {
        self.settled = value;
        self.transition.take()
    }

    /// Starts moving from the current on-screen value towards `value`.
    /// Returns the transition this one supersedes.
    pub fn animate_to(
        &mut self,
        value: T,
        duration: Duration,
        transactions: Vec<TransactionId>,
    ) -> Option<Transition<T>> {
        let from = self.current();
        self.settled = value;
        self.transition
            .replace(Transition::new(from, value, duration, transactions))
    }

    pub fn into_transition(self) -> Option<Transition<T>> {
        self.transition
    }

    /// Steps the transition. Returns it once it has finished.
    pub fn advance(&mut self, dt: Duration) -> Option<Transition<T>> {
        let transition = self.transition.as_mut()?;
        transition.advance(dt);
        if transition.is_finished() {
            self.transition.take()
        } else {
            None
        }
    }
}
