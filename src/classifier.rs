//! Profile classification
//!
//! Maps accumulated session counters to a profile with a single ratio
//! threshold. Classification is a pure read of the counters.

use crate::error::AdaptError;
use crate::types::{Profile, SessionCounters};
use tracing::{debug, warn};

/// Detail ratio that must be strictly exceeded for the Expert profile
pub const DEFAULT_EXPERT_THRESHOLD: f64 = 0.6;

/// Thresholds are compared as parts per billion
const THRESHOLD_SCALE: u128 = 1_000_000_000;

/// Converts session counters into a profile decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileClassifier {
    threshold: f64,
    /// `threshold` rounded to parts per billion, used for the exact comparison
    threshold_ppb: u128,
}

impl Default for ProfileClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileClassifier {
    /// Create a classifier with the default 0.6 threshold
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_EXPERT_THRESHOLD,
            threshold_ppb: 600_000_000,
        }
    }

    /// Create a classifier with a custom threshold in `[0, 1)`.
    ///
    /// The threshold is resolved to nine decimal places.
    pub fn with_threshold(threshold: f64) -> Result<Self, AdaptError> {
        if !threshold.is_finite() || !(0.0..1.0).contains(&threshold) {
            return Err(AdaptError::InvalidThreshold(threshold));
        }
        let threshold_ppb = (threshold * THRESHOLD_SCALE as f64).round() as u128;
        if threshold_ppb >= THRESHOLD_SCALE {
            return Err(AdaptError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            threshold_ppb,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Classify the given counters.
    ///
    /// Returns `AdaptError::InsufficientData` when no interaction has been
    /// recorded. A ratio exactly equal to the threshold yields `Beginner`.
    pub fn classify(&self, counters: &SessionCounters) -> Result<Profile, AdaptError> {
        let total = counters.total();
        if total == 0 {
            warn!("classification requested with no recorded interactions");
            return Err(AdaptError::InsufficientData);
        }

        // expand / total > ppb / SCALE, cross-multiplied; both sides stay below 2^96
        let is_expert =
            counters.expand_count as u128 * THRESHOLD_SCALE > self.threshold_ppb * total;
        let detail_ratio = counters.detail_ratio().unwrap_or_default();

        let profile = if is_expert {
            Profile::Expert
        } else {
            Profile::Beginner
        };

        debug!(
            expand_count = counters.expand_count,
            collapse_count = counters.collapse_count,
            detail_ratio,
            threshold = self.threshold,
            profile = %profile,
            "classified profile"
        );

        Ok(profile)
    }
}
