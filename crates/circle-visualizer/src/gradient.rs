use palette::Srgba;

pub const STOP_COUNT: usize = 4;

/// Four color stops spread evenly around the circle. The last bucket blends
/// back into the first stop, so the gradient has no seam.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    stops: [Srgba<f64>; STOP_COUNT],
}

impl Default for Gradient {
    fn default() -> Self {
        Self::new([
            Srgba::new(1.0, 0.337254902, 0.5764705882, 1.0),
            Srgba::new(0.2745098174, 0.4862745106, 0.1411764771, 1.0),
            Srgba::new(0.4784313725, 1.0, 0.9921568627, 1.0),
            Srgba::new(0.5764705882, 0.4117647059, 0.768627451, 1.0),
        ])
    }
}

impl Gradient {
    pub fn new(stops: [Srgba<f64>; STOP_COUNT]) -> Self {
        Self { stops }
    }

    pub fn stops(&self) -> &[Srgba<f64>; STOP_COUNT] {
        &self.stops
    }

    pub fn stop(&self, slot: usize) -> Srgba<f64> {
        assert!(slot < STOP_COUNT, "gradient slot {slot} out of range");
        self.stops[slot]
    }

    pub fn set(&mut self, slot: usize, color: Srgba<f64>) {
        assert!(slot < STOP_COUNT, "gradient slot {slot} out of range");
        self.stops[slot] = color;
    }

    /// Color of the spoke at `position` out of `line_count`.
    ///
    /// Buckets are chosen with integer quarters of `line_count`, while the
    /// blend rate divides by the exact quarter. When `line_count` is not a
    /// multiple of four the rate in the last bucket runs past 1 and the
    /// color extrapolates beyond the stops. This is kept as is.
    pub fn color_at(&self, position: usize, line_count: usize) -> Srgba<f64> {
        let i = position as f64 + 1.0;
        let quarter = line_count / 4;
        let span = line_count as f64 / 4.0;

        let bucket = match position + 1 {
            x if x < quarter => 0,
            x if x < quarter * 2 => 1,
            x if x < quarter * 3 => 2,
            _ => 3,
        };

        let from = self.stops[bucket];
        let to = self.stops[(bucket + 1) % STOP_COUNT];
        let rate = (i - (quarter * bucket) as f64) / span;

        blend(from, to, rate)
    }
}

/// Channel-wise `from + (to - from) * rate` with opaque alpha. Unlike
/// `palette::Mix`, the rate is used as given.
fn blend(from: Srgba<f64>, to: Srgba<f64>, rate: f64) -> Srgba<f64> {
    let lerp = |a: f64, b: f64| a + (b - a) * rate;
    Srgba::new(
        lerp(from.red, to.red),
        lerp(from.green, to.green),
        lerp(from.blue, to.blue),
        1.0,
    )
}
