pub mod animation;
pub mod geometry;
pub mod gradient;
pub mod style;
pub mod transaction;
pub mod visualizer;

pub use animation::Animation;
pub use geometry::{Bounds, Point, Segment};
pub use gradient::Gradient;
pub use style::{LineCap, Settings, SettingsError};
pub use transaction::Completion;
pub use visualizer::RadialLineVisualizer;
