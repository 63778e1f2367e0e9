// src/settings/mod.rs
pub mod credentials;
pub mod io;

use std::path::PathBuf;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use credentials::EnvFileOutcome;

/// Settings persisted between runs.
#[derive(Resource, Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Last CSV picked through the upload dialog; tried at startup after the
    /// default locations.
    pub last_data_path: Option<PathBuf>,
}

/// Options fixed at launch from the command line.
#[derive(Resource, Debug, Clone)]
pub struct LaunchOptions {
    /// Explicit data file, tried before the default locations.
    pub data_path: Option<PathBuf>,
    pub env_file: EnvFileOutcome,
}
