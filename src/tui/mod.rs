pub mod app;
pub mod editor;
pub mod input;
pub mod line_buffer;
pub mod render;
pub mod theme;

pub use app::{App, Screen, run};
