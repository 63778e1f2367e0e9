// src/dataset/systems/io/load.rs
use std::path::{Path, PathBuf};

use bevy::prelude::*;

use super::parsers::read_csv_table;
use crate::dataset::definitions::{DataOrigin, DataTable, LoadedDataset};
use crate::dataset::events::{DashboardFeedback, DatasetLoaded, RequestDatasetUpload};
use crate::dataset::resources::{
    ActiveDataset, DataLoadState, DataLoadStatus, DataSearchPaths, DatasetGeneration,
};
use crate::settings::io::{load_settings_from_file, save_settings_to_file};
use crate::settings::{AppSettings, LaunchOptions};

/// Looked for in the working directory.
pub const DEFAULT_DATA_FILE: &str = "deaths_and_causes_synthetic.csv";

pub const DATA_NOT_FOUND_WARNING: &str = "Data file not found on Server or Local path.";

/// Startup search order: CLI path, default file, last uploaded file.
pub fn startup_candidates(cli_path: Option<&Path>, settings: &AppSettings) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    let ordered = cli_path
        .map(Path::to_path_buf)
        .into_iter()
        .chain(std::iter::once(PathBuf::from(DEFAULT_DATA_FILE)))
        .chain(settings.last_data_path.clone());
    for path in ordered {
        if !candidates.contains(&path) {
            candidates.push(path);
        }
    }
    candidates
}

/// First candidate that exists and parses. Failures are logged and skipped.
pub fn load_first_available(candidates: &[PathBuf]) -> Option<(DataTable, PathBuf)> {
    for path in candidates {
        if !path.exists() {
            debug!("Data candidate '{}' does not exist.", path.display());
            continue;
        }
        match read_csv_table(path) {
            Ok(table) => return Some((table, path.clone())),
            Err(e) => warn!("Skipping data candidate '{}': {}", path.display(), e),
        }
    }
    None
}

fn install_dataset(
    dataset: LoadedDataset,
    active: &mut ActiveDataset,
    generation: &mut DatasetGeneration,
    status: &mut DataLoadStatus,
    loaded_writer: &mut EventWriter<DatasetLoaded>,
    feedback_writer: &mut EventWriter<DashboardFeedback>,
) {
    info!(
        "Loaded dataset '{}' ({} rows, {} columns).",
        dataset.path.display(),
        dataset.table.row_count,
        dataset.table.columns.len()
    );
    generation.0 += 1;
    loaded_writer.write(DatasetLoaded {
        path: dataset.path.clone(),
        origin: dataset.origin,
        rows: dataset.table.row_count,
        columns: dataset.table.columns.len(),
        generation: generation.0,
    });
    feedback_writer.write(DashboardFeedback {
        message: format!("Loaded data from: {}", dataset.path.display()),
        is_error: false,
    });
    status.state = DataLoadState::Loaded;
    status.warning = None;
    active.0 = Some(dataset);
}

/// Startup system: read persisted settings and build the search list.
pub fn prepare_search_paths(
    launch: Option<Res<LaunchOptions>>,
    mut settings: ResMut<AppSettings>,
    mut search_paths: ResMut<DataSearchPaths>,
) {
    match load_settings_from_file::<AppSettings>() {
        Ok(loaded) => *settings = loaded,
        Err(e) => warn!("Using default settings: {}", e),
    }
    let cli_path = launch.as_ref().and_then(|l| l.data_path.as_deref());
    search_paths.0 = startup_candidates(cli_path, &settings);
    debug!("Data search paths: {:?}", search_paths.0);
}

/// Startup system: load the first available table or fall back to upload.
pub fn load_dataset_at_startup(
    search_paths: Res<DataSearchPaths>,
    mut active: ResMut<ActiveDataset>,
    mut generation: ResMut<DatasetGeneration>,
    mut status: ResMut<DataLoadStatus>,
    mut loaded_writer: EventWriter<DatasetLoaded>,
    mut feedback_writer: EventWriter<DashboardFeedback>,
) {
    match load_first_available(&search_paths.0) {
        Some((table, path)) => install_dataset(
            LoadedDataset {
                table,
                path,
                origin: DataOrigin::Startup,
            },
            &mut active,
            &mut generation,
            &mut status,
            &mut loaded_writer,
            &mut feedback_writer,
        ),
        None => {
            warn!("{} Waiting for a manual upload.", DATA_NOT_FOUND_WARNING);
            status.state = DataLoadState::AwaitingUpload;
            status.warning = Some(DATA_NOT_FOUND_WARNING.to_string());
        }
    }
}

pub fn handle_upload_request(
    mut requests: EventReader<RequestDatasetUpload>,
    mut active: ResMut<ActiveDataset>,
    mut generation: ResMut<DatasetGeneration>,
    mut status: ResMut<DataLoadStatus>,
    mut settings: ResMut<AppSettings>,
    mut loaded_writer: EventWriter<DatasetLoaded>,
    mut feedback_writer: EventWriter<DashboardFeedback>,
) {
    // Several clicks in one frame still open one dialog.
    if requests.read().last().is_none() {
        return;
    }

    let picked_file: Option<PathBuf> = rfd::FileDialog::new()
        .add_filter("CSV files", &["csv"])
        .set_title("Upload your CSV manually")
        .pick_file();
    let Some(path) = picked_file else {
        feedback_writer.write(DashboardFeedback {
            message: "File selection cancelled".to_string(),
            is_error: false,
        });
        return;
    };

    match read_csv_table(&path) {
        Ok(table) => {
            install_dataset(
                LoadedDataset {
                    table,
                    path: path.clone(),
                    origin: DataOrigin::Upload,
                },
                &mut active,
                &mut generation,
                &mut status,
                &mut loaded_writer,
                &mut feedback_writer,
            );
            settings.last_data_path = Some(path);
            if let Err(e) = save_settings_to_file(&*settings) {
                warn!("Could not remember uploaded file: {}", e);
            }
        }
        Err(e) => {
            error!("Upload of '{}' failed: {}", path.display(), e);
            feedback_writer.write(DashboardFeedback {
                message: format!("Could not load '{}': {}", path.display(), e),
                is_error: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn candidates_are_ordered_and_deduplicated() {
        let settings = AppSettings {
            last_data_path: Some(PathBuf::from(DEFAULT_DATA_FILE)),
        };
        let candidates = startup_candidates(Some(Path::new("/tmp/x.csv")), &settings);
        assert_eq!(
            candidates,
            vec![PathBuf::from("/tmp/x.csv"), PathBuf::from(DEFAULT_DATA_FILE)]
        );
        assert_eq!(
            startup_candidates(None, &AppSettings::default()),
            vec![PathBuf::from(DEFAULT_DATA_FILE)]
        );
    }

    #[test]
    fn skips_missing_and_broken_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let broken = dir.path().join("broken.csv");
        let good = dir.path().join("good.csv");
        fs::write(&broken, "A,B\n1,2,3\n").unwrap();
        fs::write(&good, "Cause,Number_of_Deaths\nMalaria,4\n").unwrap();

        let (table, path) = load_first_available(&[missing, broken, good.clone()]).unwrap();
        assert_eq!(path, good);
        assert_eq!(table.row_count, 1);
    }

    #[derive(Resource, Default)]
    struct LoadedGenerations(Vec<u64>);

    fn record_loaded(mut loaded: EventReader<DatasetLoaded>, mut seen: ResMut<LoadedGenerations>) {
        seen.0.extend(loaded.read().map(|e| e.generation));
    }

    #[test]
    fn installing_a_table_bumps_the_generation() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        fs::write(&good, "Cause,Number_of_Deaths\nMalaria,4\n").unwrap();

        let mut app = App::new();
        app.add_event::<DatasetLoaded>()
            .add_event::<DashboardFeedback>()
            .init_resource::<ActiveDataset>()
            .init_resource::<DatasetGeneration>()
            .init_resource::<DataLoadStatus>()
            .init_resource::<LoadedGenerations>()
            .insert_resource(DataSearchPaths(vec![good.clone()]))
            .add_systems(Update, (load_dataset_at_startup, record_loaded).chain());

        app.update();
        assert_eq!(app.world().resource::<DatasetGeneration>().0, 1);
        assert_eq!(app.world().resource::<LoadedGenerations>().0, vec![1]);
        assert_eq!(app.world().resource::<DataLoadStatus>().state, DataLoadState::Loaded);

        app.update();
        assert_eq!(app.world().resource::<DatasetGeneration>().0, 2);
        let active = app.world().resource::<ActiveDataset>();
        assert_eq!(active.0.as_ref().map(|d| d.path.clone()), Some(good));
    }

    #[test]
    fn nothing_available_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_first_available(&[dir.path().join("a.csv")]).is_none());
        assert!(load_first_available(&[]).is_none());
    }
}
