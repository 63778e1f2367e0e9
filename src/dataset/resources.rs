// src/dataset/resources.rs
use std::path::PathBuf;

use bevy::prelude::*;

use super::definitions::LoadedDataset;

/// The table every view reads. `None` until a load succeeds.
#[derive(Resource, Default, Debug)]
pub struct ActiveDataset(pub Option<LoadedDataset>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataLoadState {
    #[default]
    Searching,
    Loaded,
    /// Nothing found at startup; the dashboard waits for a manual upload.
    AwaitingUpload,
}

#[derive(Resource, Default, Debug, Clone)]
pub struct DataLoadStatus {
    pub state: DataLoadState,
    /// Warning shown while waiting for an upload.
    pub warning: Option<String>,
}

/// Bumped each time a table is installed. Work started against an older
/// generation is stale.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetGeneration(pub u64);

/// Locations tried at startup, in priority order.
#[derive(Resource, Default, Debug, Clone)]
pub struct DataSearchPaths(pub Vec<PathBuf>);
