pub mod app;
pub mod frame;
pub mod theme;
