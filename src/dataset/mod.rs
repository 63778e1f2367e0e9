// src/dataset/mod.rs

pub mod definitions;
pub mod error;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod systems;

pub use definitions::{Column, ColumnKind, DataTable, LoadedDataset};
pub use plugin::DatasetPlugin;
pub use resources::ActiveDataset;
