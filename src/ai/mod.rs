// src/ai/mod.rs
// AI insight requests: backend client, model fallback, prompt text and the
// per-session answer cache.

pub mod backend;
pub mod classify;
pub mod control_handler;
pub mod events;
pub mod gemini;
pub mod insight_cache;
pub mod plugin;
pub mod prompts;
pub mod resolver;

pub use backend::{AiBackend, BackendError, TextBackend};
pub use insight_cache::{AiInsightCache, InsightKey};
pub use plugin::AiInsightsPlugin;
pub use resolver::{QueryResolver, Resolution};
