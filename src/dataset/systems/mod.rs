// src/dataset/systems/mod.rs
pub mod analysis;
pub mod io;
