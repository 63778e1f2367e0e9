// src/dataset/events.rs
use std::path::PathBuf;

use bevy::prelude::Event;

use super::definitions::DataOrigin;

/// Sent by the Upload button; opens the native file picker.
#[derive(Event, Debug, Clone)]
pub struct RequestDatasetUpload;

/// A table was installed as the active dataset.
#[derive(Event, Debug, Clone)]
pub struct DatasetLoaded {
    pub path: PathBuf,
    pub origin: DataOrigin,
    pub rows: usize,
    pub columns: usize,
    pub generation: u64,
}

/// Short status line shown in the dashboard's top bar.
#[derive(Event, Debug, Clone)]
pub struct DashboardFeedback {
    pub message: String,
    pub is_error: bool,
}
