// src/ai/events.rs
use bevy::prelude::Event;

use super::insight_cache::InsightKey;

/// Sent by a view's Analyze button.
#[derive(Event, Debug, Clone)]
pub struct AiInsightRequested {
    pub key: InsightKey,
    pub prompt: String,
}

/// Resolver output for one request, forwarded from the background task.
#[derive(Event, Debug, Clone)]
pub struct AiInsightReady {
    pub key: InsightKey,
    pub text: String,
    /// Dataset generation the prompt was built from.
    pub generation: u64,
}

/// The session API key was set or cleared in the settings popup.
#[derive(Event, Debug, Clone)]
pub struct SessionKeyChanged;
