//! Kubernetes client for podphase
//!
//! This crate resolves kubeconfig credentials, connects to the API server
//! and lists pods as [`PodRecord`]s.

mod client;
mod error;

pub use client::{KubeClient, pod_to_record};
pub use error::{ClientError, ClientResult};

// Re-export types that are used in our public API
pub use podphase_types::{PodPhase, PodRecord};
