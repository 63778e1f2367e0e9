// src/ui/elements/column_picker.rs
use bevy_egui::egui;

use crate::ui::state::effective_choice;

/// Labelled combo box over `options`. Writes the effective pick back to
/// `stored` and returns it; `None` when there are no options.
pub fn column_picker(
    ui: &mut egui::Ui,
    id_salt: &str,
    label: &str,
    stored: &mut Option<String>,
    options: &[String],
) -> Option<String> {
    let mut current = effective_choice(stored, options)?;
    ui.horizontal(|ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id_salt)
            .selected_text(current.clone())
            .show_ui(ui, |ui| {
                for option in options {
                    ui.selectable_value(&mut current, option.clone(), option);
                }
            });
    });
    *stored = Some(current.clone());
    Some(current)
}
