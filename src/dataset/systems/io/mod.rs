// src/dataset/systems/io/mod.rs
pub mod load;
pub mod parsers;

pub use load::{handle_upload_request, load_dataset_at_startup, prepare_search_paths};
