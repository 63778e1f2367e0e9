// src/cli/mod.rs
// Command-line options for the dashboard binary

use clap::Parser;
use std::path::PathBuf;

/// Filter directives always applied to the log output.
pub const DEFAULT_LOG_FILTER: &str = "wgpu=error,naga=warn,bevy_tokio_tasks=warn";

#[derive(Parser, Debug)]
#[command(name = "causes_dashboard")]
#[command(about = "Deaths & Causes AI Dashboard", long_about = None)]
pub struct Cli {
    /// CSV file to open instead of the default locations
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Environment file to load instead of `.env`
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Extra tracing filter directives, e.g. `causes_dashboard=debug`
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn log_filter(&self) -> String {
        match self.log_filter.as_deref().map(str::trim) {
            Some(extra) if !extra.is_empty() => format!("{},{}", DEFAULT_LOG_FILTER, extra),
            _ => DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
