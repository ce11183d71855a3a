pub mod app;
pub mod components;
pub mod theme;

pub use app::{ColophonApp, MainWindow};
