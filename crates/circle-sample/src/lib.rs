pub mod config;
pub mod events;
pub mod gui;
pub mod sample;
pub mod sys;
