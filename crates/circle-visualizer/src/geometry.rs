#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// The rectangle the host layout assigns to the visualizer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A straight stroke from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Angle of a spoke in radians. Spoke 0 points straight up and the rest
/// follow clockwise in screen coordinates.
pub fn spoke_angle(position: usize, line_count: usize) -> f64 {
    let degrees = 360.0 / line_count as f64 * position as f64 - 90.0;
    degrees.to_radians()
}

/// Computes where a spoke is drawn.
///
/// The base ellipse is inset by `max_length` on each axis so a spoke at
/// `value == 1.0` touches the edge of `bounds` without crossing it. `value`
/// is not clamped: values above 1 overflow the bounds and negative values
/// point inwards.
pub fn spoke_segment(
    position: usize,
    value: f64,
    line_count: usize,
    max_length: f64,
    bounds: Bounds,
) -> Segment {
    let angle = spoke_angle(position, line_count);
    let (sin, cos) = angle.sin_cos();
    let center = bounds.center();

    let radius_x = bounds.width / 2.0 - max_length;
    let radius_y = bounds.height / 2.0 - max_length;
    let length = max_length * value;

    let start = Point::new(cos * radius_x + center.x, sin * radius_y + center.y);
    let end = Point::new(
        cos * (radius_x + length) + center.x,
        sin * (radius_y + length) + center.y,
    );

    Segment::new(start, end)
}
