//! Core data types
//!
//! This module defines the interaction kinds, the per-session counters, the
//! profile decision, and the report payload that flow through the adaptation
//! pipeline.

use crate::error::AdaptError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two mutually exclusive interaction kinds tracked per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// The user revealed a detail panel
    Expand,
    /// The user hid a detail panel
    Collapse,
}

impl InteractionKind {
    /// Map the visibility of a detail panel *after* a toggle to the interaction kind.
    ///
    /// A panel that is now visible was expanded; a panel that is now hidden was
    /// collapsed.
    pub fn from_visibility(details_visible_after: bool) -> Self {
        if details_visible_after {
            InteractionKind::Expand
        } else {
            InteractionKind::Collapse
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Expand => "expand",
            InteractionKind::Collapse => "collapse",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = AdaptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expand" | "e" => Ok(InteractionKind::Expand),
            "collapse" | "c" => Ok(InteractionKind::Collapse),
            other => Err(AdaptError::UnknownInteraction(other.to_string())),
        }
    }
}

/// A single interaction as it appears in an interaction log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InteractionRecord {
    /// `{"kind": "expand"}`
    Tagged { kind: InteractionKind },
    /// `"expand"`
    Bare(InteractionKind),
}

impl InteractionRecord {
    pub fn kind(&self) -> InteractionKind {
        match self {
            InteractionRecord::Tagged { kind } | InteractionRecord::Bare(kind) => *kind,
        }
    }
}

/// Interaction counts accumulated over one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    /// Number of Expand interactions
    pub expand_count: u64,
    /// Number of Collapse interactions
    pub collapse_count: u64,
}

impl SessionCounters {
    pub fn new(expand_count: u64, collapse_count: u64) -> Self {
        Self {
            expand_count,
            collapse_count,
        }
    }

    /// Total number of recorded interactions.
    ///
    /// Widened to `u128` so the sum of two `u64` counts never overflows.
    pub fn total(&self) -> u128 {
        self.expand_count as u128 + self.collapse_count as u128
    }

    /// Fraction of interactions that were Expand, or `None` with no interactions.
    ///
    /// Approximate for counts beyond 2^53; classification compares exactly.
    pub fn detail_ratio(&self) -> Option<f64> {
        if self.total() == 0 {
            return None;
        }
        let expand = self.expand_count as f64;
        Some(expand / (expand + self.collapse_count as f64))
    }
}

/// Inferred proficiency profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Dense layout, more information visible
    Expert,
    /// Larger fonts, less information per card
    Beginner,
}

impl Profile {
    /// Human-readable label for the profile
    pub fn label(&self) -> &'static str {
        match self {
            Profile::Expert => "Expert (dense layout, more info visible)",
            Profile::Beginner => "Beginner-friendly (larger fonts, less info per card)",
        }
    }

    /// Presentation mode identifier a view layer can switch on
    pub fn mode_class(&self) -> &'static str {
        match self {
            Profile::Expert => "mode-expert",
            Profile::Beginner => "mode-beginner",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Expert => "expert",
            Profile::Beginner => "beginner",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Producer metadata embedded in every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    /// Unique per encoder instance
    pub instance_id: String,
}

/// Report emitted for a successful adaptation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationReport {
    pub producer: ReportProducer,
    /// Session the counters belong to
    pub session_id: String,
    /// RFC 3339 timestamp of the classification
    pub computed_at_utc: String,
    pub counters: SessionCounters,
    pub total_interactions: u128,
    pub detail_ratio: f64,
    /// Ratio that must be strictly exceeded for the Expert profile
    pub threshold: f64,
    pub profile: Profile,
    pub label: String,
    pub mode_class: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_visibility_uses_post_toggle_state() {
        assert_eq!(InteractionKind::from_visibility(true), InteractionKind::Expand);
        assert_eq!(InteractionKind::from_visibility(false), InteractionKind::Collapse);
    }

    #[test]
    fn test_interaction_kind_from_str() {
        assert_eq!("expand".parse::<InteractionKind>().unwrap(), InteractionKind::Expand);
        assert_eq!(" Collapse ".parse::<InteractionKind>().unwrap(), InteractionKind::Collapse);
        assert_eq!("E".parse::<InteractionKind>().unwrap(), InteractionKind::Expand);
        assert_eq!("c".parse::<InteractionKind>().unwrap(), InteractionKind::Collapse);

        let err = "toggle".parse::<InteractionKind>().unwrap_err();
        assert!(matches!(err, AdaptError::UnknownInteraction(ref s) if s == "toggle"));
    }

    #[test]
    fn test_interaction_record_accepts_both_shapes() {
        let tagged: InteractionRecord = serde_json::from_str(r#"{"kind":"expand"}"#).unwrap();
        let bare: InteractionRecord = serde_json::from_str(r#""collapse""#).unwrap();

        assert_eq!(tagged.kind(), InteractionKind::Expand);
        assert_eq!(bare.kind(), InteractionKind::Collapse);
    }

    #[test]
    fn test_counters_serialization_shape() {
        let counters = SessionCounters::new(5, 3);
        let value = serde_json::to_value(counters).unwrap();

        assert_eq!(value, serde_json::json!({"expand_count": 5, "collapse_count": 3}));
    }

    #[test]
    fn test_detail_ratio() {
        assert_eq!(SessionCounters::default().detail_ratio(), None);
        assert_eq!(SessionCounters::new(3, 2).detail_ratio(), Some(0.6));
        assert_eq!(SessionCounters::new(0, 4).detail_ratio(), Some(0.0));
        assert_eq!(SessionCounters::new(4, 0).detail_ratio(), Some(1.0));
    }

    #[test]
    fn test_total_does_not_saturate() {
        let counters = SessionCounters::new(u64::MAX, u64::MAX);

        assert_eq!(counters.total(), 2 * u64::MAX as u128);
        assert_eq!(counters.detail_ratio(), Some(0.5));
    }

    #[test]
    fn test_profile_presentation() {
        assert_eq!(Profile::Expert.mode_class(), "mode-expert");
        assert_eq!(Profile::Beginner.mode_class(), "mode-beginner");
        assert!(Profile::Beginner.label().starts_with("Beginner-friendly"));
        assert_eq!(serde_json::to_string(&Profile::Expert).unwrap(), r#""expert""#);
    }
}
