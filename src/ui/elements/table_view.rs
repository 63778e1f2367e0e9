// src/ui/elements/table_view.rs
use bevy_egui::egui;
use egui_extras::{Column, TableBuilder};

use crate::dataset::systems::analysis::TextFrame;

const ROW_HEIGHT: f32 = 18.0;

/// Read-only grid for a small frame: index column, then one column per field.
pub fn show_frame(ui: &mut egui::Ui, id_salt: &str, frame: &TextFrame, max_height: f32) {
    if frame.columns.is_empty() {
        ui.weak("(empty)");
        return;
    }
    ui.push_id(id_salt, |ui| {
        egui::ScrollArea::horizontal().id_salt("hscroll").show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto())
                .columns(Column::auto().at_least(60.0), frame.columns.len())
                .max_scroll_height(max_height)
                .header(ROW_HEIGHT + 2.0, |mut header| {
                    header.col(|_| {});
                    for name in &frame.columns {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, frame.rows.len(), |mut row| {
                        let i = row.index();
                        row.col(|ui| {
                            ui.weak(frame.index.get(i).map(String::as_str).unwrap_or_default());
                        });
                        if let Some(cells) = frame.rows.get(i) {
                            for cell in cells {
                                row.col(|ui| {
                                    ui.label(cell);
                                });
                            }
                        }
                    });
                });
        });
    });
}
