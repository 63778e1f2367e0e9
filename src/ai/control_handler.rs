// src/ai/control_handler.rs
// Systems that turn insight requests into background resolver runs and
// apply their results. No egui here.
use std::time::Instant;

use bevy::prelude::*;
use bevy_tokio_tasks::TokioTasksRuntime;

use super::backend::AiBackend;
use super::events::{AiInsightReady, AiInsightRequested, SessionKeyChanged};
use super::gemini::{GeminiBackend, UnavailableBackend};
use super::insight_cache::{AiInsightCache, InsightKey};
use super::resolver::{QueryResolver, DEFAULT_MODEL_CANDIDATES};
use crate::dataset::events::{DashboardFeedback, DatasetLoaded};
use crate::dataset::resources::DatasetGeneration;
use crate::settings::credentials::SessionApiKey;
use crate::ui::systems::SendEvent;

pub const BUSY_MESSAGE: &str = "An AI request is already running. Please wait for it to finish.";

/// The one insight request currently running, if any.
#[derive(Resource, Default, Debug)]
pub struct PendingInsight {
    pub key: Option<InsightKey>,
    pub started: Option<Instant>,
    pub generation: u64,
    /// Prompt admitted this frame and not yet handed to the runtime.
    pub queued_prompt: Option<String>,
}

impl PendingInsight {
    pub fn is_busy(&self) -> bool {
        self.key.is_some()
    }

    pub fn is_pending(&self, key: &InsightKey) -> bool {
        self.key.as_ref() == Some(key)
    }

    /// Claims the single slot for `key`. Returns the running key when taken.
    pub fn begin(&mut self, key: &InsightKey, prompt: String, generation: u64) -> Result<(), InsightKey> {
        if let Some(running) = &self.key {
            return Err(running.clone());
        }
        self.key = Some(key.clone());
        self.started = Some(Instant::now());
        self.generation = generation;
        self.queued_prompt = Some(prompt);
        Ok(())
    }

    /// Frees the slot if it belongs to this result.
    pub fn finish(&mut self, key: &InsightKey, generation: u64) -> bool {
        if self.is_pending(key) && self.generation == generation {
            self.key = None;
            self.started = None;
            self.queued_prompt = None;
            return true;
        }
        false
    }
}

/// Builds the Gemini backend for `api_key`.
///
/// Falls back to a backend that reports the client error on every call, so a
/// broken HTTP stack shows up as an AI error instead of stopping the app.
pub fn build_backend(api_key: Option<String>) -> AiBackend {
    match GeminiBackend::new(api_key) {
        Ok(backend) => AiBackend::new(backend),
        Err(e) => {
            error!("Could not create Gemini client: {}", e);
            AiBackend::new(UnavailableBackend { reason: e.message })
        }
    }
}

/// Hands a finished result to the main world as a carrier entity picked up by
/// `forward_events`.
pub fn deliver_insight_result(world: &mut World, result: AiInsightReady) {
    world.spawn(SendEvent { event: result });
}

/// Spawn a background task running the resolver for one prompt.
fn spawn_insight_task(
    runtime: &TokioTasksRuntime,
    backend: &AiBackend,
    key: InsightKey,
    prompt: String,
    generation: u64,
) {
    let backend = backend.0.clone();
    runtime.spawn_background_task(move |mut ctx| async move {
        let blocking = tokio::task::spawn_blocking(move || {
            QueryResolver::new(backend.as_ref(), DEFAULT_MODEL_CANDIDATES).ask(&prompt)
        })
        .await;
        let text = match blocking {
            Ok(text) => text,
            Err(e) => {
                error!("AI insight task for '{}' did not complete: {}", key, e);
                format!("AI Error (task): {}", e)
            }
        };
        ctx.run_on_main_thread(move |main_ctx| {
            deliver_insight_result(main_ctx.world, AiInsightReady { key, text, generation });
        })
        .await;
    });
}

/// Admits at most one request; the rest are refused with feedback.
pub fn admit_insight_requests(
    mut requests: EventReader<AiInsightRequested>,
    mut pending: ResMut<PendingInsight>,
    mut feedback_writer: EventWriter<DashboardFeedback>,
    generation: Res<DatasetGeneration>,
) {
    for request in requests.read() {
        match pending.begin(&request.key, request.prompt.clone(), generation.0) {
            Ok(()) => info!("Starting AI insight request '{}'.", request.key),
            Err(running) => {
                warn!(
                    "Ignoring AI request '{}' while '{}' is still running.",
                    request.key, running
                );
                feedback_writer.write(DashboardFeedback {
                    message: BUSY_MESSAGE.to_string(),
                    is_error: false,
                });
            }
        }
    }
}

pub fn spawn_admitted_insight(
    mut pending: ResMut<PendingInsight>,
    backend: Res<AiBackend>,
    runtime: Res<TokioTasksRuntime>,
) {
    let Some(prompt) = pending.queued_prompt.take() else {
        return;
    };
    let Some(key) = pending.key.clone() else {
        return;
    };
    spawn_insight_task(&runtime, &backend, key, prompt, pending.generation);
}

pub fn apply_insight_results(
    mut results: EventReader<AiInsightReady>,
    mut pending: ResMut<PendingInsight>,
    mut cache: ResMut<AiInsightCache>,
    generation: Res<DatasetGeneration>,
) {
    for result in results.read() {
        if let Some(started) = pending.started {
            debug!(
                "AI insight '{}' finished after {:.1}s.",
                result.key,
                started.elapsed().as_secs_f32()
            );
        }
        pending.finish(&result.key, result.generation);
        if result.generation != generation.0 {
            info!(
                "Discarding AI insight '{}' built for an earlier dataset.",
                result.key
            );
            continue;
        }
        cache.store(result.key.clone(), result.text.clone());
    }
}

/// Answers about one table do not apply to the next.
pub fn clear_insights_on_dataset_change(
    mut loaded: EventReader<DatasetLoaded>,
    mut cache: ResMut<AiInsightCache>,
) {
    if loaded.read().last().is_some() && !cache.is_empty() {
        info!("Dataset changed; clearing {} cached AI insight(s).", cache.len());
        cache.clear();
    }
}

pub fn rebuild_backend_on_key_change(
    mut changes: EventReader<SessionKeyChanged>,
    session_key: Res<SessionApiKey>,
    mut commands: Commands,
) {
    if changes.read().last().is_none() {
        return;
    }
    info!(
        "Rebuilding AI backend ({}).",
        if session_key.0.is_some() { "key set" } else { "no key" }
    );
    commands.insert_resource(build_backend(session_key.0.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::definitions::DataOrigin;
    use crate::ui::systems::forward_events;
    use std::path::PathBuf;

    #[derive(Resource, Default)]
    struct FeedbackLog(Vec<String>);

    fn record_feedback(mut events: EventReader<DashboardFeedback>, mut log: ResMut<FeedbackLog>) {
        log.0.extend(events.read().map(|e| e.message.clone()));
    }

    fn insight_app() -> App {
        let mut app = App::new();
        app.add_event::<AiInsightRequested>()
            .add_event::<AiInsightReady>()
            .add_event::<DatasetLoaded>()
            .add_event::<DashboardFeedback>()
            .init_resource::<PendingInsight>()
            .init_resource::<AiInsightCache>()
            .init_resource::<DatasetGeneration>()
            .init_resource::<FeedbackLog>()
            .add_systems(
                Update,
                (
                    clear_insights_on_dataset_change,
                    admit_insight_requests,
                    forward_events::<AiInsightReady>,
                    apply_insight_results,
                    record_feedback,
                )
                    .chain(),
            );
        app
    }

    fn request(key: InsightKey, prompt: &str) -> AiInsightRequested {
        AiInsightRequested {
            key,
            prompt: prompt.to_string(),
        }
    }

    fn ready(key: InsightKey, text: &str, generation: u64) -> AiInsightReady {
        AiInsightReady {
            key,
            text: text.to_string(),
            generation,
        }
    }

    fn load_new_dataset(app: &mut App) {
        let generation = {
            let mut generation = app.world_mut().resource_mut::<DatasetGeneration>();
            generation.0 += 1;
            generation.0
        };
        app.world_mut().send_event(DatasetLoaded {
            path: PathBuf::from("next.csv"),
            origin: DataOrigin::Upload,
            rows: 1,
            columns: 1,
            generation,
        });
    }

    #[test]
    fn begin_refuses_while_busy() {
        let mut pending = PendingInsight::default();
        assert!(pending.begin(&InsightKey::Overview, "p".into(), 0).is_ok());
        let other = InsightKey::Univariate { column: "Cause".into() };
        assert_eq!(pending.begin(&other, "q".into(), 0), Err(InsightKey::Overview));
        assert!(pending.is_pending(&InsightKey::Overview));
        assert_eq!(pending.queued_prompt.as_deref(), Some("p"));
    }

    #[test]
    fn finish_only_frees_matching_slot() {
        let mut pending = PendingInsight::default();
        pending.begin(&InsightKey::Overview, "p".into(), 3).unwrap();
        assert!(!pending.finish(&InsightKey::Overview, 2));
        let other = InsightKey::Univariate { column: "Cause".into() };
        assert!(!pending.finish(&other, 3));
        assert!(pending.finish(&InsightKey::Overview, 3));
        assert!(!pending.is_busy());
    }

    #[test]
    fn second_request_is_refused_with_feedback() {
        let mut app = insight_app();
        app.world_mut().send_event(request(InsightKey::Overview, "first"));
        app.world_mut()
            .send_event(request(InsightKey::Univariate { column: "Cause".into() }, "second"));
        app.update();

        let pending = app.world().resource::<PendingInsight>();
        assert!(pending.is_pending(&InsightKey::Overview));
        assert_eq!(pending.queued_prompt.as_deref(), Some("first"));
        assert_eq!(app.world().resource::<FeedbackLog>().0, vec![BUSY_MESSAGE.to_string()]);
    }

    #[test]
    fn result_clears_pending_and_overwrites_cache() {
        let mut app = insight_app();
        app.world_mut().send_event(request(InsightKey::Overview, "p"));
        app.update();

        app.world_mut().send_event(ready(InsightKey::Overview, "first answer", 0));
        app.update();
        assert!(!app.world().resource::<PendingInsight>().is_busy());
        assert_eq!(
            app.world().resource::<AiInsightCache>().get(&InsightKey::Overview).map(|i| i.text.as_str()),
            Some("first answer")
        );

        app.world_mut().send_event(request(InsightKey::Overview, "p"));
        app.update();
        app.world_mut().send_event(ready(InsightKey::Overview, "second answer", 0));
        app.update();
        let cache = app.world().resource::<AiInsightCache>();
        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get(&InsightKey::Overview).map(|i| i.text.as_str()),
            Some("second answer")
        );
    }

    #[test]
    fn new_dataset_clears_cache() {
        let mut app = insight_app();
        app.world_mut().send_event(ready(InsightKey::Overview, "old", 0));
        app.update();
        assert_eq!(app.world().resource::<AiInsightCache>().len(), 1);

        load_new_dataset(&mut app);
        app.update();
        assert!(app.world().resource::<AiInsightCache>().is_empty());
    }

    #[test]
    fn answer_for_previous_dataset_is_discarded() {
        let mut app = insight_app();
        app.world_mut().send_event(request(InsightKey::Overview, "about the old file"));
        app.update();

        load_new_dataset(&mut app);
        app.update();
        // Still one request in flight until the old task reports back
        assert!(app.world().resource::<PendingInsight>().is_busy());

        app.world_mut().send_event(ready(InsightKey::Overview, "summary of old file", 0));
        app.update();
        assert!(!app.world().resource::<PendingInsight>().is_busy());
        assert!(app.world().resource::<AiInsightCache>().get(&InsightKey::Overview).is_none());
    }

    #[test]
    fn delivered_result_reaches_cache_through_carrier() {
        let mut app = insight_app();
        app.world_mut().send_event(request(InsightKey::Overview, "p"));
        app.update();

        deliver_insight_result(app.world_mut(), ready(InsightKey::Overview, "answer", 0));
        app.update();

        assert!(!app.world().resource::<PendingInsight>().is_busy());
        assert_eq!(
            app.world().resource::<AiInsightCache>().get(&InsightKey::Overview).map(|i| i.text.as_str()),
            Some("answer")
        );
        let carriers = app
            .world_mut()
            .query::<&SendEvent<AiInsightReady>>()
            .iter(app.world())
            .count();
        assert_eq!(carriers, 0);
    }
}
