// src/ui/mod.rs
use bevy::prelude::*;
use bevy_egui::EguiContextPass;

pub mod charts;
pub mod elements;
pub mod state;
pub mod systems;
pub mod view_cache;

use elements::dashboard::dashboard_ui;
use state::DashboardState;
use view_cache::ViewCache;
use systems::{handle_ui_feedback, reset_selections_on_dataset_change};

use crate::settings::credentials::{ApiKeyDisplayStatus, SessionApiKey};

#[derive(Resource, Default, Debug, Clone)]
pub struct UiFeedbackState {
    pub last_message: String,
    pub is_error: bool,
}

/// Plugin for the dashboard window.
pub struct DashboardUiPlugin;

impl Plugin for DashboardUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiFeedbackState>()
            .init_resource::<DashboardState>()
            .init_resource::<ViewCache>()
            .init_resource::<ApiKeyDisplayStatus>()
            .init_resource::<SessionApiKey>()
            .add_systems(Update, (handle_ui_feedback, reset_selections_on_dataset_change))
            .add_systems(EguiContextPass, dashboard_ui);

        info!("DashboardUiPlugin initialized.");
    }
}
