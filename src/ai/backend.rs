// src/ai/backend.rs
use std::sync::Arc;

use bevy::prelude::Resource;

/// Failure reported by a text-generation backend for one model attempt.
///
/// The message is shown to the user verbatim when the failure is terminal,
/// so it should carry whatever detail the backend returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A client able to turn a prompt into text using a named model.
///
/// Each call is a single blocking round trip. Implementations must not retry
/// on their own; fallback between models is the resolver's job.
pub trait TextBackend: Send + Sync {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, BackendError>;
}

/// The backend currently used for insight requests.
///
/// Rebuilt whenever the session credential changes.
#[derive(Resource, Clone)]
pub struct AiBackend(pub Arc<dyn TextBackend>);

impl AiBackend {
    pub fn new(backend: impl TextBackend + 'static) -> Self {
        Self(Arc::new(backend))
    }
}
