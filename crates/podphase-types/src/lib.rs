//! Shared types for podphase
//!
//! This crate contains the pod data structures passed between the
//! Kubernetes client, the classifier and the reporter.

use std::fmt;

use serde::Serialize;

// ============================================================================
// Pod Types
// ============================================================================

/// Coarse lifecycle phase of a pod
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PodPhase {
    Running,
    Succeeded,
    Pending,
    Failed,
    Unknown,
}

impl PodPhase {
    /// All phases, in report order
    pub const ALL: [PodPhase; 5] = [
        Self::Running,
        Self::Succeeded,
        Self::Pending,
        Self::Failed,
        Self::Unknown,
    ];

    /// Name as reported by the Kubernetes API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }

    /// Lowercase label used in summary lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Pending => "pending",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        }
    }

    /// Parse one of the five phase names reported by the Kubernetes API
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Running" => Some(Self::Running),
            "Succeeded" => Some(Self::Succeeded),
            "Pending" => Some(Self::Pending),
            "Failed" => Some(Self::Failed),
            "Unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl From<&str> for PodPhase {
    fn from(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pod as observed at fetch time
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodRecord {
    pub name: String,
    /// Shown in reports and logs; classification ignores it
    pub namespace: String,
    pub phase: PodPhase,
}

impl PodRecord {
    pub fn new(name: impl Into<String>, phase: PodPhase) -> Self {
        Self {
            name: name.into(),
            namespace: String::new(),
            phase,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// `namespace/name`, or just the name when the namespace is unset
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.namespace, self.name)
        }
    }
}
