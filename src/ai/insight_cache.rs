// src/ai/insight_cache.rs
use std::collections::HashMap;
use std::fmt;

use bevy::prelude::Resource;
use chrono::{DateTime, Local};

/// Identifies which view produced a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InsightKey {
    Overview,
    Univariate { column: String },
    Bivariate { x: String, y: String },
    Multivariate { x: String, hue: String },
}

impl fmt::Display for InsightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightKey::Overview => write!(f, "overview_analysis"),
            InsightKey::Univariate { column } => write!(f, "uni_analysis_{}", column),
            InsightKey::Bivariate { x, y } => write!(f, "bi_analysis_{}_{}", x, y),
            InsightKey::Multivariate { x, hue } => write!(f, "multi_analysis_{}_{}", x, hue),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiInsight {
    pub text: String,
    pub generated_at: DateTime<Local>,
}

/// Last AI response per view, kept for the lifetime of the process.
#[derive(Resource, Default, Debug)]
pub struct AiInsightCache {
    entries: HashMap<InsightKey, AiInsight>,
}

impl AiInsightCache {
    pub fn get(&self, key: &InsightKey) -> Option<&AiInsight> {
        self.entries.get(key)
    }

    /// Stores `text` under `key`, replacing any earlier response.
    pub fn store(&mut self, key: InsightKey, text: String) {
        self.entries.insert(
            key,
            AiInsight {
                text,
                generated_at: Local::now(),
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
