// src/ai/classify.rs
//! Failure classification for model attempts.
//!
//! Backends report failures as free text, so classification is a substring
//! match on known markers. Update the marker lists here when a backend changes
//! its error phrasing; the resolver's control flow does not need to change.

/// Markers meaning the model is out of capacity for now.
const CAPACITY_MARKERS: &[&str] = &["429", "quota", "resource_exhausted"];

/// Markers meaning the model id is unknown or not served.
const AVAILABILITY_MARKERS: &[&str] = &["404", "not found"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientCause {
    /// Rate limit, quota or resource exhaustion.
    Capacity,
    /// Unknown or unavailable model.
    Availability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Try the next candidate.
    Transient(TransientCause),
    /// Report to the caller and stop.
    Terminal,
}

impl FailureClass {
    pub fn is_transient(self) -> bool {
        matches!(self, FailureClass::Transient(_))
    }
}

/// Signature of a pluggable failure classifier.
pub type Classifier = fn(&str) -> FailureClass;

/// Default classifier for Gemini-style error messages. Case-insensitive.
pub fn classify_failure(message: &str) -> FailureClass {
    let lowered = message.to_lowercase();
    if CAPACITY_MARKERS.iter().any(|m| lowered.contains(m)) {
        FailureClass::Transient(TransientCause::Capacity)
    } else if AVAILABILITY_MARKERS.iter().any(|m| lowered.contains(m)) {
        FailureClass::Transient(TransientCause::Availability)
    } else {
        FailureClass::Terminal
    }
}
