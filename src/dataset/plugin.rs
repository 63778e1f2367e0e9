// src/dataset/plugin.rs
use bevy::prelude::*;

use super::events::{DashboardFeedback, DatasetLoaded, RequestDatasetUpload};
use super::resources::{ActiveDataset, DataLoadStatus, DataSearchPaths, DatasetGeneration};
use super::systems;
use crate::settings::AppSettings;

/// Loads the table at startup and handles manual uploads.
pub struct DatasetPlugin;

impl Plugin for DatasetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveDataset>()
            .init_resource::<DatasetGeneration>()
            .init_resource::<DataLoadStatus>()
            .init_resource::<DataSearchPaths>()
            .init_resource::<AppSettings>();

        app.add_event::<RequestDatasetUpload>()
            .add_event::<DatasetLoaded>()
            .add_event::<DashboardFeedback>();

        app.add_systems(
            Startup,
            (
                systems::io::prepare_search_paths,
                systems::io::load_dataset_at_startup,
            )
                .chain(),
        );
        app.add_systems(Update, systems::io::handle_upload_request);

        info!("DatasetPlugin initialized.");
    }
}
