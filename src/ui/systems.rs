// src/ui/systems.rs
use std::any;

use bevy::prelude::*;

use crate::dataset::events::{DashboardFeedback, DatasetLoaded};
use crate::ui::{state::DashboardState, UiFeedbackState};

pub fn handle_ui_feedback(
    mut feedback_events: EventReader<DashboardFeedback>,
    mut ui_feedback_state: ResMut<UiFeedbackState>,
) {
    let mut last_message = None;
    for event in feedback_events.read() {
        last_message = Some((event.message.clone(), event.is_error));
        // Prioritize showing the first non-error, or the last error
        if !event.is_error {
            break;
        }
    }
    if let Some((msg, is_error)) = last_message {
        ui_feedback_state.last_message = msg;
        ui_feedback_state.is_error = is_error;
        if is_error {
            warn!("UI Feedback (Error): {}", ui_feedback_state.last_message);
        } else {
            info!("UI Feedback: {}", ui_feedback_state.last_message);
        }
    }
}

pub fn reset_selections_on_dataset_change(
    mut loaded: EventReader<DatasetLoaded>,
    mut state: ResMut<DashboardState>,
) {
    if let Some(event) = loaded.read().last() {
        trace!("Resetting column selections for {}", event.path.display());
        state.reset_selections();
    }
}

#[derive(Component)]
pub struct SendEvent<E: Event> {
    pub event: E,
}

pub fn forward_events<E: Event + Clone + std::fmt::Debug>(
    mut commands: Commands,
    mut writer: EventWriter<E>,
    query: Query<(Entity, &SendEvent<E>)>,
    mut event_type_name: Local<String>,
) {
    if event_type_name.is_empty() {
        *event_type_name = any::type_name::<E>()
            .split("::")
            .last()
            .unwrap_or("UnknownEvent")
            .to_string();
    }

    let mut count = 0;
    for (entity, send_event_component) in query.iter() {
        count += 1;
        debug!(
            "Forwarding event type '{}' #{}: {:?}",
            *event_type_name, count, send_event_component.event
        );
        writer.write(send_event_component.event.clone());
        commands.entity(entity).despawn();
    }

    if count > 0 {
        debug!("Forwarded {} instance(s) of event type '{}'.", count, *event_type_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Event, Debug, Clone, PartialEq)]
    struct Ping(u32);

    #[derive(Resource, Default)]
    struct Seen(Vec<u32>);

    fn collect(mut reader: EventReader<Ping>, mut seen: ResMut<Seen>) {
        seen.0.extend(reader.read().map(|p| p.0));
    }

    #[test]
    fn forwarded_events_are_written_once_and_carriers_despawned() {
        let mut app = App::new();
        app.add_event::<Ping>()
            .init_resource::<Seen>()
            .add_systems(Update, (forward_events::<Ping>, collect).chain());
        app.world_mut().spawn(SendEvent { event: Ping(7) });

        app.update();
        app.update();

        assert_eq!(app.world().resource::<Seen>().0, vec![7]);
        let carriers = app
            .world_mut()
            .query::<&SendEvent<Ping>>()
            .iter(app.world())
            .count();
        assert_eq!(carriers, 0);
    }

    #[test]
    fn feedback_error_replaces_message() {
        let mut app = App::new();
        app.add_event::<DashboardFeedback>()
            .init_resource::<UiFeedbackState>()
            .add_systems(Update, handle_ui_feedback);
        app.world_mut().send_event(DashboardFeedback {
            message: "Loaded data from: a.csv".into(),
            is_error: false,
        });
        app.update();
        let state = app.world().resource::<UiFeedbackState>();
        assert_eq!(state.last_message, "Loaded data from: a.csv");
        assert!(!state.is_error);
    }

    #[test]
    fn batch_keeps_first_success_or_last_error() {
        let mut app = App::new();
        app.add_event::<DashboardFeedback>()
            .init_resource::<UiFeedbackState>()
            .add_systems(Update, handle_ui_feedback);
        for (message, is_error) in [("bad one", true), ("ok one", false), ("bad two", true)] {
            app.world_mut().send_event(DashboardFeedback {
                message: message.into(),
                is_error,
            });
        }
        app.update();
        let state = app.world().resource::<UiFeedbackState>();
        assert_eq!(state.last_message, "ok one");
        assert!(!state.is_error);

        for message in ["bad one", "bad two"] {
            app.world_mut().send_event(DashboardFeedback {
                message: message.into(),
                is_error: true,
            });
        }
        app.update();
        let state = app.world().resource::<UiFeedbackState>();
        assert_eq!(state.last_message, "bad two");
        assert!(state.is_error);
    }
}
