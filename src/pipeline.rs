//! Adaptation pipeline
//!
//! This module provides the public API for adaptive profiling. An
//! [`AdaptiveSession`] owns the counters for one session; each interaction is
//! recorded as it happens and an explicit adapt request classifies the counts
//! accumulated so far. Counters are never reset by classification.

use crate::adapter::InteractionLogAdapter;
use crate::classifier::ProfileClassifier;
use crate::encoder::AdaptationEncoder;
use crate::error::AdaptError;
use crate::recorder::InteractionRecorder;
use crate::types::{AdaptationReport, InteractionKind, Profile, SessionCounters};
use tracing::info;
use uuid::Uuid;

/// Classify an interaction log and return report JSON (stateless, one-shot).
///
/// # Arguments
/// * `interactions` - NDJSON or JSON array interaction log
///
/// # Returns
/// Adaptation report JSON string
///
/// # Example
/// ```ignore
/// let report = profile_from_interactions(r#"["expand", "expand", "collapse"]"#)?;
/// ```
pub fn profile_from_interactions(interactions: &str) -> Result<String, AdaptError> {
    // Stage 1: Parse interaction log
    let kinds = InteractionLogAdapter::parse_auto(interactions)?;

    // Stage 2: Record in order
    let mut session = AdaptiveSession::new();
    session.record_all(kinds);

    // Stage 3: Classify and encode
    session.adapt_to_json()
}

/// Stateful session: records interactions and adapts on request
pub struct AdaptiveSession {
    session_id: String,
    recorder: InteractionRecorder,
    classifier: ProfileClassifier,
    encoder: AdaptationEncoder,
}

impl Default for AdaptiveSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AdaptiveSession {
    /// Create a new session with the default threshold
    pub fn new() -> Self {
        Self::with_classifier(ProfileClassifier::new())
    }

    /// Create a session with a specific expert threshold
    pub fn with_threshold(threshold: f64) -> Result<Self, AdaptError> {
        Ok(Self::with_classifier(ProfileClassifier::with_threshold(
            threshold,
        )?))
    }

    pub fn with_classifier(classifier: ProfileClassifier) -> Self {
        let session_id = Uuid::new_v4().to_string();
        info!(session_id = %session_id, threshold = classifier.threshold(), "adaptive session started");

        Self {
            session_id,
            recorder: InteractionRecorder::new(),
            classifier,
            encoder: AdaptationEncoder::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn threshold(&self) -> f64 {
        self.classifier.threshold()
    }

    /// Record one interaction
    pub fn record(&mut self, kind: InteractionKind) {
        self.recorder.record(kind);
    }

    /// Record a toggle given the panel's visibility after it
    pub fn record_visibility(&mut self, details_visible_after: bool) -> InteractionKind {
        self.recorder.record_visibility(details_visible_after)
    }

    /// Record several interactions in order
    pub fn record_all<I>(&mut self, kinds: I)
    where
        I: IntoIterator<Item = InteractionKind>,
    {
        self.recorder.record_all(kinds);
    }

    /// Current counters
    pub fn counters(&self) -> SessionCounters {
        self.recorder.counters()
    }

    /// Classify the counters accumulated so far
    pub fn classify(&self) -> Result<Profile, AdaptError> {
        self.classifier.classify(&self.recorder.counters())
    }

    /// Classify and build a full report
    pub fn adapt(&self) -> Result<AdaptationReport, AdaptError> {
        let counters = self.recorder.counters();
        let profile = self.classifier.classify(&counters)?;
        self.encoder
            .encode(&self.session_id, counters, self.classifier.threshold(), profile)
    }

    /// Classify and return the report as JSON
    pub fn adapt_to_json(&self) -> Result<String, AdaptError> {
        let counters = self.recorder.counters();
        let profile = self.classifier.classify(&counters)?;
        self.encoder.encode_to_json(
            &self.session_id,
            counters,
            self.classifier.threshold(),
            profile,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::types::InteractionKind::{Collapse as C, Expand as E};

    #[test]
    fn test_adapt_before_any_interaction() {
        let session = AdaptiveSession::new();
        assert!(session.classify().unwrap_err().is_insufficient_data());
        assert!(session.adapt().unwrap_err().is_insufficient_data());
        assert!(session.adapt_to_json().unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_repeated_adapt_accumulates_counters() {
        let mut session = AdaptiveSession::new();

        session.record_all([E, E, C]);
        assert_eq!(session.classify().unwrap(), Profile::Expert);

        // Counters are not reset by classification
        session.record_all([C, C]);
        assert_eq!(session.counters(), SessionCounters::new(2, 3));
        assert_eq!(session.classify().unwrap(), Profile::Beginner);

        session.record_all([E, E, E, E]);
        assert_eq!(session.counters(), SessionCounters::new(6, 3));
        assert_eq!(session.classify().unwrap(), Profile::Expert);
    }

    #[test]
    fn test_adapt_report_matches_classification() {
        let mut session = AdaptiveSession::new();
        session.record_visibility(true);
        session.record_visibility(false);
        session.record_visibility(true);

        let report = session.adapt().unwrap();
        assert_eq!(report.session_id, session.session_id());
        assert_eq!(report.counters, SessionCounters::new(2, 1));
        assert_eq!(report.profile, session.classify().unwrap());
        assert_eq!(report.threshold, 0.6);
    }

    #[test]
    fn test_with_threshold() {
        let mut session = AdaptiveSession::with_threshold(0.5).unwrap();
        session.record_all([E, E, E, C, C]);
        assert_eq!(session.classify().unwrap(), Profile::Expert);

        assert!(AdaptiveSession::with_threshold(2.0).is_err());
    }

    #[test]
    fn test_profile_from_interactions_ndjson() {
        let log = "\"expand\"\n\"expand\"\n\"expand\"\n\"collapse\"\n\"collapse\"\n";
        let json = profile_from_interactions(log).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        // 3 / 5 sits exactly on the threshold
        assert_eq!(value["profile"], "beginner");
        assert_eq!(value["total_interactions"], 5);
    }

    #[test]
    fn test_profile_from_interactions_array() {
        let json = profile_from_interactions(r#"["expand", {"kind": "expand"}, "collapse"]"#)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["profile"], "expert");
        assert_eq!(value["mode_class"], "mode-expert");
    }

    #[test]
    fn test_profile_from_empty_log() {
        let err = profile_from_interactions("[]").unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_profile_from_invalid_log() {
        assert!(matches!(
            profile_from_interactions("not valid json"),
            Err(AdaptError::ParseError(_))
        ));
    }
}
