// src/ui/charts/mod.rs
pub mod model;
pub mod paint;

pub use model::BarChart;
pub use paint::{draw_bar_chart, draw_histogram};
