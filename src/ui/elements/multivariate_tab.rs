// src/ui/elements/multivariate_tab.rs
use bevy_egui::egui;

use super::column_picker::column_picker;
use super::insight_panel::{InsightControls, InsightStyle};
use super::notices;
use crate::ai::prompts::multivariate_prompt;
use crate::ai::InsightKey;
use crate::dataset::DataTable;
use crate::ui::charts::draw_bar_chart;
use crate::ui::state::DashboardState;
use crate::ui::view_cache::ViewCache;

pub fn show_multivariate_tab(
    ui: &mut egui::Ui,
    state: &mut DashboardState,
    table: &DataTable,
    views: &mut ViewCache,
    insights: &mut InsightControls,
) {
    ui.heading("Advanced Multi-Column View");
    let options = table.column_names();
    let x = column_picker(ui, "multi_x", "X-axis Category:", &mut state.multi_x, &options);
    let hue = column_picker(ui, "multi_hue", "Color Category (Hue):", &mut state.multi_hue, &options);
    let (Some(x), Some(hue)) = (x, hue) else {
        return;
    };
    if x == hue {
        notices::warning(ui, "X-axis and Color Category must be different.");
        return;
    }

    // Missing or non-numeric value column: message only, no chart
    let view = match views.multivariate(table, &x, &hue) {
        Ok(view) => view,
        Err(e) => {
            notices::error(ui, &e.to_string());
            return;
        }
    };
    draw_bar_chart(ui, "multi_chart", &view.chart, 420.0);

    let key = InsightKey::Multivariate { x, hue };
    insights.analyze_button(
        ui,
        "Analyze Multi-View",
        key.clone(),
        "AI is crunching the numbers...",
        || multivariate_prompt(&view.view),
    );
    insights.show_insight(ui, &key, InsightStyle::Info);
}
