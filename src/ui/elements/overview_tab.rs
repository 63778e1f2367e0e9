// src/ui/elements/overview_tab.rs
use bevy_egui::egui;

use super::insight_panel::{InsightControls, InsightStyle};
use super::table_view::show_frame;
use crate::ai::prompts::overview_prompt;
use crate::ai::InsightKey;
use crate::dataset::DataTable;
use crate::ui::view_cache::ViewCache;

pub fn show_overview_tab(
    ui: &mut egui::Ui,
    table: &DataTable,
    views: &mut ViewCache,
    insights: &mut InsightControls,
) {
    ui.heading("Dataset Overview");
    let overview = views.overview(table);
    ui.columns(2, |cols| {
        cols[0].strong("First 5 Rows");
        show_frame(&mut cols[0], "overview_head", &overview.head, 200.0);
        cols[1].strong("Last 5 Rows");
        show_frame(&mut cols[1], "overview_tail", &overview.tail, 200.0);
    });

    ui.add_space(8.0);
    ui.strong("Statistical Summary");
    show_frame(ui, "overview_describe", &overview.summary, 260.0);

    ui.separator();
    let key = InsightKey::Overview;
    insights.analyze_button(
        ui,
        "Generate AI Summary of Dataset",
        key.clone(),
        "AI is analyzing the dataset...",
        || overview_prompt(&overview.summary),
    );
    insights.show_insight(ui, &key, InsightStyle::Info);
}
