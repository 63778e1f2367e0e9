// src/ai/prompts.rs
//! Prompt text for each dashboard view.

use crate::dataset::definitions::DEATHS_COLUMN;
use crate::dataset::systems::analysis::{GroupedView, TextFrame};

/// Rows quoted from an aggregate in a prompt.
pub const PROMPT_TOP_ROWS: usize = 5;

pub fn overview_prompt(summary: &TextFrame) -> String {
    format!(
        "Here is the statistical summary of a 'Deaths and Causes' dataset: {}. Summarize the key data characteristics in 3 bullet points.",
        summary.to_text()
    )
}

pub fn categorical_prompt(column: &str, counts: &TextFrame) -> String {
    format!(
        "Analyze this distribution for column '{}': {}. What are the most frequent categories?",
        column,
        counts.head(PROMPT_TOP_ROWS).to_text()
    )
}

pub fn histogram_prompt(column: &str, stats: &TextFrame) -> String {
    format!(
        "Analyze this histogram for '{}'. Here are the stats: {}. Is it skewed? What is the range?",
        column,
        stats.to_text()
    )
}

pub fn bivariate_prompt(view: &GroupedView) -> String {
    format!(
        "Analyze this chart titled '{}'. The top 5 data points are: {}. What trends do you see?",
        view.title,
        view.to_frame().head(PROMPT_TOP_ROWS).to_text()
    )
}

pub fn multivariate_prompt(view: &GroupedView) -> String {
    let hue = view.series_column.as_deref().unwrap_or_default();
    format!(
        "Analyze this multivariate chart. We are looking at {} broken down by {} and {}. Top data: {}. Summary?",
        DEATHS_COLUMN,
        view.x_column,
        hue,
        view.to_frame().head(PROMPT_TOP_ROWS).to_text()
    )
}
