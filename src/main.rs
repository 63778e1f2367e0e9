// src/main.rs

#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

use bevy::{
    log::LogPlugin,
    prelude::*,
    window::WindowPlugin,
    winit::{UpdateMode, WinitSettings},
};
use clap::Parser;
use std::time::Duration;

use bevy_egui::EguiPlugin;
use bevy_tokio_tasks::TokioTasksPlugin;

mod ai;
mod cli;
mod dataset;
mod settings;
mod ui;

use ai::control_handler::build_backend;
use ai::AiInsightsPlugin;
use cli::Cli;
use dataset::DatasetPlugin;
use settings::credentials::{
    load_env_file, read_keyring_key, resolve_api_key, ApiKeyDisplayStatus, EnvFileOutcome,
    SessionApiKey, API_KEY_ENV_VAR,
};
use settings::LaunchOptions;
use ui::DashboardUiPlugin;

fn main() {
    let cli = Cli::parse();
    // Before anything reads the environment
    let env_file = load_env_file(cli.env_file.as_deref());

    App::new()
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::reactive_low_power(Duration::from_secs_f32(1.0 / 5.0)),
        })
        .insert_resource(LaunchOptions {
            data_path: cli.data.clone(),
            env_file,
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Deaths & Causes AI Dashboard".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: cli.log_filter(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(TokioTasksPlugin::default())
        .add_plugins(DatasetPlugin)
        .add_plugins(AiInsightsPlugin)
        .add_plugins(DashboardUiPlugin)
        .add_systems(Startup, check_api_key_startup)
        .run();
}

/// Resolves the API key once and builds the AI backend from it. A missing key
/// only shows the banner; the dashboard still starts.
fn check_api_key_startup(
    launch: Res<LaunchOptions>,
    mut commands: Commands,
    mut key_status: ResMut<ApiKeyDisplayStatus>,
    mut session_key: ResMut<SessionApiKey>,
) {
    match &launch.env_file {
        EnvFileOutcome::Loaded(path) => info!("Loaded environment from {}", path.display()),
        EnvFileOutcome::NotFound => debug!("No .env file found; using the process environment."),
        EnvFileOutcome::Failed(e) => warn!("Could not load .env file: {}", e),
    }

    let resolution = resolve_api_key(|name| std::env::var(name).ok(), read_keyring_key);
    *key_status = ApiKeyDisplayStatus::from_resolution(&resolution);
    match resolution {
        Ok((key, source)) => {
            info!("API key found ({:?}).", source);
            session_key.0 = Some(key);
        }
        Err(e) => {
            error!("{} could not be resolved: {}", API_KEY_ENV_VAR, e);
            session_key.0 = None;
        }
    }
    commands.insert_resource(build_backend(session_key.0.clone()));
}
