//! Pod phase classification for podphase
//!
//! This crate partitions fetched pods into their lifecycle phases.

mod classify;

pub use classify::{ClassificationResult, PhaseCounts, classify};

// Re-export types used in our public API
pub use podphase_types::{PodPhase, PodRecord};
