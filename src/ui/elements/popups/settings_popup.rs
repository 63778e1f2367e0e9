// src/ui/elements/popups/settings_popup.rs
use bevy::prelude::*;
use bevy_egui::egui;

use crate::ai::events::SessionKeyChanged;
use crate::settings::credentials::{
    store_keyring_key, ApiKeyDisplayStatus, CredentialError, CredentialSource, SessionApiKey,
};
use crate::ui::state::DashboardState;

/// Trimmed key from the input box; the box is cleared when a key is taken.
fn take_key_input(input: &mut String) -> Option<String> {
    let key = input.trim().to_string();
    if key.is_empty() {
        return None;
    }
    input.clear();
    Some(key)
}

fn apply_key(
    key: String,
    source: CredentialSource,
    key_status: &mut ApiKeyDisplayStatus,
    session_key: &mut SessionApiKey,
    key_changed: &mut EventWriter<SessionKeyChanged>,
) {
    *key_status = ApiKeyDisplayStatus::from_resolution(&Ok::<_, CredentialError>((key.clone(), source)));
    session_key.0 = Some(key);
    key_changed.write(SessionKeyChanged);
}

pub fn show_settings_popup(
    ctx: &egui::Context,
    state: &mut DashboardState,
    key_status: &mut ApiKeyDisplayStatus,
    session_key: &mut SessionApiKey,
    key_changed: &mut EventWriter<SessionKeyChanged>,
) {
    if !state.show_settings_popup {
        return;
    }

    let mut is_window_open = true;
    let mut close_requested = false;

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut is_window_open)
        .show(ctx, |ui| {
            ui.heading("API Key Management");
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Current Status:");
                ui.label(key_status.status.as_str());
            });
            if let Some(err) = &key_status.error {
                ui.colored_label(egui::Color32::LIGHT_RED, err);
            }
            ui.separator();

            ui.label("Enter API Key:");
            ui.add(
                egui::TextEdit::singleline(&mut state.settings_new_api_key_input)
                    .password(true)
                    .desired_width(f32::INFINITY),
            );

            ui.horizontal(|ui| {
                if ui.button("Set Key for Session").clicked() {
                    match take_key_input(&mut state.settings_new_api_key_input) {
                        Some(key) => {
                            info!("API Key set for the current session.");
                            apply_key(key, CredentialSource::Session, key_status, session_key, key_changed);
                        }
                        None => info!("API Key input was empty, not setting for session."),
                    }
                }
                if ui.button("Save to Keyring").clicked() {
                    if let Some(key) = take_key_input(&mut state.settings_new_api_key_input) {
                        match store_keyring_key(&key) {
                            Ok(()) => {
                                info!("API Key saved to the keyring.");
                                apply_key(key, CredentialSource::Keyring, key_status, session_key, key_changed);
                            }
                            Err(e) => {
                                error!("Failed to save API Key to the keyring: {}", e);
                                key_status.error = Some(format!("API Key Error: {}", e));
                            }
                        }
                    }
                }
            });

            ui.separator();

            if ui.button("Clear Session Key").clicked() {
                if session_key.0.take().is_some() {
                    info!("API Key cleared for the current session.");
                } else {
                    info!("No API Key was set in the current session to clear.");
                }
                key_status.status = "No Key Set (Session)".to_string();
                key_status.error = None;
                key_changed.write(SessionKeyChanged);
            }

            ui.separator();
            if ui.button("Close").clicked() {
                close_requested = true;
            }
        });

    if !is_window_open || close_requested {
        state.show_settings_popup = false;
    }
}
