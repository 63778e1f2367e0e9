// src/ui/elements/univariate_tab.rs
use bevy_egui::egui;

use super::column_picker::column_picker;
use super::insight_panel::{InsightControls, InsightStyle};
use crate::ai::prompts::{categorical_prompt, histogram_prompt};
use crate::ai::InsightKey;
use crate::dataset::systems::analysis::counts_frame;
use crate::dataset::{ColumnKind, DataTable};
use crate::ui::charts::{draw_bar_chart, draw_histogram};
use crate::ui::state::{DashboardState, UnivariateMode};
use crate::ui::view_cache::ViewCache;

const CHART_HEIGHT: f32 = 380.0;

pub fn show_univariate_tab(
    ui: &mut egui::Ui,
    state: &mut DashboardState,
    table: &DataTable,
    views: &mut ViewCache,
    insights: &mut InsightControls,
) {
    ui.heading("Single Column Analysis");
    ui.horizontal(|ui| {
        ui.label("Select Analysis Type:");
        for mode in [UnivariateMode::Categorical, UnivariateMode::Numerical] {
            ui.radio_value(&mut state.uni_mode, mode, mode.label());
        }
    });
    ui.add_space(4.0);

    match state.uni_mode {
        UnivariateMode::Categorical => {
            let options = table.names_of_kind(ColumnKind::Categorical);
            let Some(name) = column_picker(
                ui,
                "uni_cat_col",
                "Select Categorical Column:",
                &mut state.uni_cat_col,
                &options,
            ) else {
                ui.weak("The dataset has no categorical columns.");
                return;
            };
            let Some(column) = table.column(&name) else {
                return;
            };
            let view = views.categorical(column);
            draw_bar_chart(ui, "uni_bar_chart", &view.chart, CHART_HEIGHT);

            let key = InsightKey::Univariate { column: name.clone() };
            insights.analyze_button(
                ui,
                &format!("Analyze {}", name),
                key.clone(),
                &format!("Analyzing {}...", name),
                || categorical_prompt(&name, &counts_frame(&name, &view.counts)),
            );
            insights.show_insight(ui, &key, InsightStyle::Heading);
        }
        UnivariateMode::Numerical => {
            let options = table.names_of_kind(ColumnKind::Numeric);
            let Some(name) = column_picker(
                ui,
                "uni_num_col",
                "Select Numerical Column:",
                &mut state.uni_num_col,
                &options,
            ) else {
                ui.weak("The dataset has no numerical columns.");
                return;
            };
            let Some(column) = table.column(&name) else {
                return;
            };
            let view = views.numerical(column);
            match &view.histogram {
                Some(histogram) => {
                    draw_histogram(
                        ui,
                        &format!("Distribution of {}", name),
                        &name,
                        histogram,
                        view.box_summary.as_ref(),
                        CHART_HEIGHT + 40.0,
                    );
                }
                None => {
                    ui.weak("No values to plot.");
                }
            }

            let key = InsightKey::Univariate { column: name.clone() };
            insights.analyze_button(
                ui,
                &format!("Analyze {}", name),
                key.clone(),
                &format!("Analyzing {}...", name),
                || histogram_prompt(&name, &view.stats),
            );
            insights.show_insight(ui, &key, InsightStyle::Heading);
        }
    }
}
