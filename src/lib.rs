//! Adaptive Profile - infers a presentation profile from interaction behavior
//!
//! Each expand or collapse of a detail panel is recorded into per-session
//! counters. On an explicit adapt request the counters are classified into an
//! Expert or Beginner profile with a fixed detail-ratio threshold:
//! interaction recording → classification → report encoding.
//!
//! Rendering the profile is left to the caller; nothing is persisted.

pub mod adapter;
pub mod classifier;
pub mod encoder;
pub mod error;
pub mod pipeline;
pub mod recorder;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use adapter::InteractionLogAdapter;
pub use classifier::{ProfileClassifier, DEFAULT_EXPERT_THRESHOLD};
pub use error::AdaptError;
pub use pipeline::{profile_from_interactions, AdaptiveSession};
pub use recorder::InteractionRecorder;
pub use types::{AdaptationReport, InteractionKind, Profile, SessionCounters};

/// Library version embedded in all reports
pub const ADAPT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "adaptive-profile";
