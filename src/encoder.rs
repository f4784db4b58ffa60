//! Adaptation report encoder
//!
//! Wraps a profile decision with the counters it was derived from and
//! producer metadata.

use crate::error::AdaptError;
use crate::types::{AdaptationReport, Profile, ReportProducer, SessionCounters};
use crate::{ADAPT_VERSION, PRODUCER_NAME};
use chrono::Utc;
use uuid::Uuid;

/// Encoder for adaptation reports
pub struct AdaptationEncoder {
    instance_id: String,
}

impl Default for AdaptationEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AdaptationEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Build a report for a decision reached from `counters`
    pub fn encode(
        &self,
        session_id: &str,
        counters: SessionCounters,
        threshold: f64,
        profile: Profile,
    ) -> Result<AdaptationReport, AdaptError> {
        let detail_ratio = counters.detail_ratio().ok_or_else(|| {
            AdaptError::EncodingError("cannot encode a report without interactions".to_string())
        })?;

        Ok(AdaptationReport {
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: ADAPT_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            session_id: session_id.to_string(),
            computed_at_utc: Utc::now().to_rfc3339(),
            counters,
            total_interactions: counters.total(),
            detail_ratio,
            threshold,
            profile,
            label: profile.label().to_string(),
            mode_class: profile.mode_class().to_string(),
        })
    }

    /// Encode a report to a JSON string
    pub fn encode_to_json(
        &self,
        session_id: &str,
        counters: SessionCounters,
        threshold: f64,
        profile: Profile,
    ) -> Result<String, AdaptError> {
        let report = self.encode(session_id, counters, threshold, profile)?;
        Ok(serde_json::to_string(&report)?)
    }
}
