pub mod model;
pub mod view;

pub use model::{INITIAL_VALUE, RadialLineVisualizer, Spoke};
pub use view::draw;
