// src/ai/resolver.rs
//! Query resolver: walks the model candidates in priority order and returns
//! the first answer.
//!
//! Capacity and availability failures move on to the next candidate. Any other
//! failure is reported immediately, so a real misconfiguration (bad key,
//! malformed request) is not hidden behind repeated attempts.
//!
//! The resolver holds no state between calls. Caching of answers belongs to
//! the caller.

use bevy::log::{debug, error, info, warn};

use super::backend::TextBackend;
use super::classify::{classify_failure, Classifier, FailureClass};

/// Production candidates, cheapest first.
pub const DEFAULT_MODEL_CANDIDATES: &[&str] = &[
    "gemini-2.0-flash-lite-001", // lightweight / fast
    "gemini-flash-latest",       // stable general
    "gemini-pro",                // high quality
];

pub const EXHAUSTION_MESSAGE: &str =
    "System Overload: All AI models are currently busy. Please wait 1 minute.";

/// Outcome of resolving one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Answer { model: String, text: String },
    Terminal { model: String, detail: String },
    Exhausted,
}

impl Resolution {
    /// Text shown to the user for this outcome.
    pub fn into_display(self) -> String {
        match self {
            Resolution::Answer { text, .. } => text,
            Resolution::Terminal { model, detail } => format!("AI Error ({}): {}", model, detail),
            Resolution::Exhausted => EXHAUSTION_MESSAGE.to_string(),
        }
    }
}

pub struct QueryResolver<'a> {
    backend: &'a dyn TextBackend,
    candidates: &'a [&'a str],
    classify: Classifier,
}

impl<'a> QueryResolver<'a> {
    pub fn new(backend: &'a dyn TextBackend, candidates: &'a [&'a str]) -> Self {
        Self {
            backend,
            candidates,
            classify: classify_failure,
        }
    }

    /// Replace the failure classifier.
    pub fn with_classifier(mut self, classify: Classifier) -> Self {
        self.classify = classify;
        self
    }

    pub fn resolve(&self, prompt: &str) -> Resolution {
        for model in self.candidates {
            debug!("AI resolver: trying model '{}' ({} prompt bytes)", model, prompt.len());
            match self.backend.generate(model, prompt) {
                Ok(text) => {
                    info!("AI resolver: model '{}' answered.", model);
                    return Resolution::Answer {
                        model: model.to_string(),
                        text,
                    };
                }
                Err(e) => match (self.classify)(&e.message) {
                    FailureClass::Transient(cause) => {
                        warn!("AI resolver: skipping '{}' ({:?}): {}", model, cause, e);
                        continue;
                    }
                    FailureClass::Terminal => {
                        error!("AI resolver: model '{}' failed: {}", model, e);
                        return Resolution::Terminal {
                            model: model.to_string(),
                            detail: e.message,
                        };
                    }
                },
            }
        }
        warn!(
            "AI resolver: all {} candidates unavailable.",
            self.candidates.len()
        );
        Resolution::Exhausted
    }

    /// Resolve and render the outcome as display text.
    pub fn ask(&self, prompt: &str) -> String {
        self.resolve(prompt).into_display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::backend::BackendError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Backend that replays a fixed outcome per model and records every call.
    struct ScriptedBackend {
        outcomes: HashMap<&'static str, Result<&'static str, &'static str>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(outcomes: &[(&'static str, Result<&'static str, &'static str>)]) -> Self {
            Self {
                outcomes: outcomes.iter().cloned().collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl TextBackend for ScriptedBackend {
        fn generate(&self, model: &str, _prompt: &str) -> Result<String, BackendError> {
            self.calls.lock().unwrap().push(model.to_string());
            match self.outcomes.get(model) {
                Some(Ok(text)) => Ok(text.to_string()),
                Some(Err(msg)) => Err(BackendError::new(*msg)),
                None => Err(BackendError::new("unscripted model")),
            }
        }
    }

    const ABC: &[&str] = &["A", "B", "C"];

    #[test]
    fn first_success_calls_one_candidate() {
        let backend = ScriptedBackend::new(&[("A", Ok("  raw answer\n")), ("B", Ok("other"))]);
        let out = QueryResolver::new(&backend, ABC).ask("Summarize column X");
        assert_eq!(out, "  raw answer\n");
        assert_eq!(backend.calls(), vec!["A"]);
    }

    #[test]
    fn transient_then_success_tries_in_order() {
        let backend = ScriptedBackend::new(&[("A", Err("quota exceeded")), ("B", Ok("from B"))]);
        let resolution = QueryResolver::new(&backend, ABC).resolve("p");
        assert_eq!(
            resolution,
            Resolution::Answer {
                model: "B".into(),
                text: "from B".into()
            }
        );
        assert_eq!(backend.calls(), vec!["A", "B"]);
    }

    #[test]
    fn terminal_error_stops_immediately() {
        let backend = ScriptedBackend::new(&[
            ("A", Err("invalid API key")),
            ("B", Ok("never")),
            ("C", Ok("never")),
        ]);
        let out = QueryResolver::new(&backend, ABC).ask("p");
        assert_eq!(out, "AI Error (A): invalid API key");
        assert_eq!(backend.calls(), vec!["A"]);
    }

    #[test]
    fn terminal_error_on_second_candidate_names_it() {
        let backend = ScriptedBackend::new(&[("A", Err("429")), ("B", Err("permission denied"))]);
        let out = QueryResolver::new(&backend, ABC).ask("p");
        assert_eq!(out, "AI Error (B): permission denied");
        assert_eq!(backend.calls(), vec!["A", "B"]);
    }

    #[test]
    fn all_transient_returns_exhaustion() {
        let backend = ScriptedBackend::new(&[
            ("A", Err("resource_exhausted")),
            ("B", Err("resource_exhausted")),
            ("C", Err("resource_exhausted")),
        ]);
        let out = QueryResolver::new(&backend, ABC).ask("p");
        assert_eq!(out, EXHAUSTION_MESSAGE);
        assert_eq!(backend.calls(), vec!["A", "B", "C"]);
    }

    #[test]
    fn mixed_capacity_and_availability_fall_through() {
        let backend = ScriptedBackend::new(&[
            ("A", Err("429 rate limit")),
            ("B", Err("404 not found")),
            ("C", Ok("X ranges 1-10")),
        ]);
        let out = QueryResolver::new(&backend, ABC).ask("Summarize column X");
        assert_eq!(out, "X ranges 1-10");
        assert_eq!(backend.calls(), vec!["A", "B", "C"]);
    }

    #[test]
    fn mixed_case_quota_is_transient() {
        let backend = ScriptedBackend::new(&[("A", Err("Quota Exceeded")), ("B", Ok("ok"))]);
        assert_eq!(QueryResolver::new(&backend, ABC).ask("p"), "ok");
        assert_eq!(backend.calls(), vec!["A", "B"]);
    }

    #[test]
    fn repeated_calls_give_same_outcome() {
        let backend = ScriptedBackend::new(&[("A", Err("RESOURCE_EXHAUSTED")), ("B", Ok("same"))]);
        let resolver = QueryResolver::new(&backend, ABC);
        let first = resolver.resolve("identical prompt");
        let second = resolver.resolve("identical prompt");
        assert_eq!(first, second);
        assert_eq!(backend.calls(), vec!["A", "B", "A", "B"]);
    }

    #[test]
    fn empty_candidate_list_is_exhausted() {
        let backend = ScriptedBackend::new(&[]);
        assert_eq!(QueryResolver::new(&backend, &[]).resolve("p"), Resolution::Exhausted);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn custom_classifier_replaces_markers() {
        fn everything_transient(_: &str) -> FailureClass {
            FailureClass::Transient(crate::ai::classify::TransientCause::Capacity)
        }
        let backend = ScriptedBackend::new(&[("A", Err("invalid API key")), ("B", Ok("fallback"))]);
        let out = QueryResolver::new(&backend, ABC)
            .with_classifier(everything_transient)
            .ask("p");
        assert_eq!(out, "fallback");
    }

    #[test]
    fn production_candidates_are_ordered_cheapest_first() {
        assert_eq!(
            DEFAULT_MODEL_CANDIDATES,
            &["gemini-2.0-flash-lite-001", "gemini-flash-latest", "gemini-pro"]
        );
    }
}
