// src/settings/io.rs
use bevy::log::{debug, error, info};
use directories_next::ProjectDirs;
use std::fs;
use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "CausesDashboard";
const APPLICATION: &str = "causes_dashboard";
const CONFIG_FILE: &str = "app_settings.json";

fn get_config_path() -> io::Result<PathBuf> {
    let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        io::Error::new(
            ErrorKind::NotFound,
            "Could not determine project directories for app settings.",
        )
    })?;
    let config_dir = proj_dirs.config_dir();
    fs::create_dir_all(config_dir)?;
    Ok(config_dir.join(CONFIG_FILE))
}

/// Reads settings from `path`; a missing file yields defaults.
pub fn load_settings_from<T: for<'de> serde::Deserialize<'de> + Default>(path: &Path) -> io::Result<T> {
    match fs::File::open(path) {
        Ok(file) => serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            error!("AppSettings: Failed to parse settings file {:?}: {}", path, e);
            io::Error::new(ErrorKind::InvalidData, format!("Failed to parse settings file: {}", e))
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("AppSettings: No settings file at {:?}. Using defaults.", path);
            Ok(T::default())
        }
        Err(e) => {
            error!("AppSettings: Failed to open settings file {:?}: {}", path, e);
            Err(e)
        }
    }
}

pub fn save_settings_to<T: serde::Serialize>(path: &Path, settings: &T) -> io::Result<()> {
    debug!("AppSettings: Writing settings to {:?}", path);
    let writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(writer, settings).map_err(|e| {
        error!("AppSettings: Failed to serialize settings to {:?}: {}", path, e);
        io::Error::new(ErrorKind::Other, e)
    })
}

pub fn load_settings_from_file<T: for<'de> serde::Deserialize<'de> + Default>() -> io::Result<T> {
    load_settings_from(&get_config_path()?)
}

pub fn save_settings_to_file<T: serde::Serialize>(settings: &T) -> io::Result<()> {
    save_settings_to(&get_config_path()?, settings)
}
