// src/ai/plugin.rs
use bevy::prelude::*;

use super::control_handler::{
    admit_insight_requests, apply_insight_results, clear_insights_on_dataset_change,
    rebuild_backend_on_key_change, spawn_admitted_insight, PendingInsight,
};
use super::events::{AiInsightReady, AiInsightRequested, SessionKeyChanged};
use super::insight_cache::AiInsightCache;
use crate::ui::systems::forward_events;

/// Insight requests, the background resolver and the per-session answer cache.
///
/// The `AiBackend` resource is inserted by the startup credential check.
pub struct AiInsightsPlugin;

impl Plugin for AiInsightsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AiInsightCache>()
            .init_resource::<PendingInsight>()
            .add_event::<AiInsightRequested>()
            .add_event::<AiInsightReady>()
            .add_event::<SessionKeyChanged>();

        app.add_systems(
            Update,
            (
                rebuild_backend_on_key_change,
                clear_insights_on_dataset_change,
                admit_insight_requests,
                spawn_admitted_insight,
                forward_events::<AiInsightReady>,
                apply_insight_results,
            )
                .chain(),
        );

        info!("AiInsightsPlugin initialized.");
    }
}
