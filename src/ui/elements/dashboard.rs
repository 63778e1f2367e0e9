// src/ui/elements/dashboard.rs
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::bivariate_tab::show_bivariate_tab;
use super::insight_panel::InsightControls;
use super::multivariate_tab::show_multivariate_tab;
use super::notices;
use super::overview_tab::show_overview_tab;
use super::popups::show_settings_popup;
use super::univariate_tab::show_univariate_tab;
use crate::ai::control_handler::PendingInsight;
use crate::ai::events::{AiInsightRequested, SessionKeyChanged};
use crate::ai::AiInsightCache;
use crate::dataset::events::RequestDatasetUpload;
use crate::dataset::resources::{DataLoadState, DataLoadStatus, DatasetGeneration};
use crate::dataset::systems::io::load::DATA_NOT_FOUND_WARNING;
use crate::dataset::ActiveDataset;
use crate::settings::credentials::{ApiKeyDisplayStatus, SessionApiKey};
use crate::ui::state::{DashboardState, DashboardTab};
use crate::ui::view_cache::ViewCache;
use crate::ui::UiFeedbackState;

#[allow(clippy::too_many_arguments)]
pub fn dashboard_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<DashboardState>,
    dataset: Res<ActiveDataset>,
    generation: Res<DatasetGeneration>,
    mut views: ResMut<ViewCache>,
    load_status: Res<DataLoadStatus>,
    cache: Res<AiInsightCache>,
    pending: Res<PendingInsight>,
    ui_feedback: Res<UiFeedbackState>,
    mut key_status: ResMut<ApiKeyDisplayStatus>,
    mut session_key: ResMut<SessionApiKey>,
    mut upload_writer: EventWriter<RequestDatasetUpload>,
    mut insight_writer: EventWriter<AiInsightRequested>,
    mut key_changed_writer: EventWriter<SessionKeyChanged>,
) {
    let ctx = contexts.ctx_mut();
    views.sync(generation.0);

    egui::TopBottomPanel::top("dashboard_top_panel").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.heading("🏥 AI-Powered Deaths & Causes Analysis");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⚙ Settings").clicked() {
                    state.show_settings_popup = true;
                }
                if ui.button("📂 Open CSV…").clicked() {
                    upload_writer.write(RequestDatasetUpload);
                }
            });
        });
        if let Some(err) = &key_status.error {
            notices::error(ui, err);
        }
        ui.horizontal(|ui| {
            if let Some(loaded) = &dataset.0 {
                ui.weak(format!(
                    "{} rows × {} columns",
                    loaded.table.row_count,
                    loaded.table.columns.len()
                ));
            }
            if !ui_feedback.last_message.is_empty() {
                let (color, prefix) = if ui_feedback.is_error {
                    (egui::Color32::LIGHT_RED, "❌")
                } else {
                    (egui::Color32::from_rgb(0x21, 0xC3, 0x54), "✅")
                };
                ui.colored_label(color, format!("{} {}", prefix, ui_feedback.last_message));
            }
        });
        ui.add_space(4.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(loaded) = &dataset.0 else {
            show_data_missing(ui, &load_status, &mut upload_writer);
            return;
        };
        let table = &loaded.table;

        ui.horizontal(|ui| {
            for tab in DashboardTab::ALL {
                ui.selectable_value(&mut state.active_tab, tab, tab.label());
            }
        });
        ui.separator();

        let mut insights = InsightControls {
            cache: &cache,
            pending: &pending,
            requests: &mut insight_writer,
        };
        let tab = state.active_tab;
        egui::ScrollArea::vertical()
            .id_salt("dashboard_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| match tab {
                DashboardTab::Overview => show_overview_tab(ui, table, &mut views, &mut insights),
                DashboardTab::Univariate => {
                    show_univariate_tab(ui, &mut state, table, &mut views, &mut insights)
                }
                DashboardTab::Bivariate => {
                    show_bivariate_tab(ui, &mut state, table, &mut views, &mut insights)
                }
                DashboardTab::Multivariate => {
                    show_multivariate_tab(ui, &mut state, table, &mut views, &mut insights)
                }
            });
    });

    show_settings_popup(
        ctx,
        &mut state,
        &mut key_status,
        &mut session_key,
        &mut key_changed_writer,
    );
}

/// Nothing past this point renders until a table is loaded.
fn show_data_missing(
    ui: &mut egui::Ui,
    status: &DataLoadStatus,
    upload_writer: &mut EventWriter<RequestDatasetUpload>,
) {
    if status.state == DataLoadState::Searching {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading data…");
        });
        return;
    }
    notices::warning(ui, status.warning.as_deref().unwrap_or(DATA_NOT_FOUND_WARNING));
    ui.add_space(8.0);
    ui.label("Upload your CSV manually");
    if ui.button("📂 Upload CSV").clicked() {
        upload_writer.write(RequestDatasetUpload);
    }
}
