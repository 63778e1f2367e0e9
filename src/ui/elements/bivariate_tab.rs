// src/ui/elements/bivariate_tab.rs
use bevy_egui::egui;

use super::column_picker::column_picker;
use super::insight_panel::{InsightControls, InsightStyle};
use super::notices;
use crate::ai::prompts::bivariate_prompt;
use crate::ai::InsightKey;
use crate::dataset::DataTable;
use crate::ui::charts::draw_bar_chart;
use crate::ui::state::DashboardState;
use crate::ui::view_cache::ViewCache;

pub fn show_bivariate_tab(
    ui: &mut egui::Ui,
    state: &mut DashboardState,
    table: &DataTable,
    views: &mut ViewCache,
    insights: &mut InsightControls,
) {
    ui.heading("Compare Two Columns");
    let options = table.column_names();
    let x = column_picker(ui, "bi_x", "Select X-axis (Group):", &mut state.bi_x, &options);
    let y = column_picker(ui, "bi_y", "Select Y-axis (Value/Split):", &mut state.bi_y, &options);
    let (Some(x), Some(y)) = (x, y) else {
        return;
    };
    if x == y {
        notices::warning(ui, "Please select two different columns.");
        return;
    }

    let view = match views.bivariate(table, &x, &y) {
        Ok(view) => view,
        Err(e) => {
            notices::error(ui, &e.to_string());
            return;
        }
    };
    draw_bar_chart(ui, "bi_chart", &view.chart, 400.0);

    let key = InsightKey::Bivariate { x, y };
    insights.analyze_button(
        ui,
        "Analyze Relationship",
        key.clone(),
        "AI is studying the chart...",
        || bivariate_prompt(&view.view),
    );
    insights.show_insight(ui, &key, InsightStyle::Success);
}
