use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use podphase_types::{PodPhase, PodRecord};

/// Counts per pod phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PhaseCounts {
    #[serde(rename = "Running")]
    pub running: usize,
    #[serde(rename = "Succeeded")]
    pub succeeded: usize,
    #[serde(rename = "Pending")]
    pub pending: usize,
    #[serde(rename = "Failed")]
    pub failed: usize,
    #[serde(rename = "Unknown")]
    pub unknown: usize,
}

impl PhaseCounts {
    pub fn get(&self, phase: PodPhase) -> usize {
        match phase {
            PodPhase::Running => self.running,
            PodPhase::Succeeded => self.succeeded,
            PodPhase::Pending => self.pending,
            PodPhase::Failed => self.failed,
            PodPhase::Unknown => self.unknown,
        }
    }

    fn increment(&mut self, phase: PodPhase) {
        match phase {
            PodPhase::Running => self.running += 1,
            PodPhase::Succeeded => self.succeeded += 1,
            PodPhase::Pending => self.pending += 1,
            PodPhase::Failed => self.failed += 1,
            PodPhase::Unknown => self.unknown += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.running + self.succeeded + self.pending + self.failed + self.unknown
    }
}

/// Outcome of one classification pass
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    counts: PhaseCounts,
    #[serde(rename = "pods", serialize_with = "serialize_names")]
    pods_by_phase: BTreeMap<PodPhase, Vec<PodRecord>>,
}

impl ClassificationResult {
    fn empty() -> Self {
        Self {
            counts: PhaseCounts::default(),
            pods_by_phase: PodPhase::ALL.iter().map(|p| (*p, Vec::new())).collect(),
        }
    }

    fn record(&mut self, pod: PodRecord) {
        self.counts.increment(pod.phase);
        self.pods_by_phase.entry(pod.phase).or_default().push(pod);
    }

    pub fn counts(&self) -> &PhaseCounts {
        &self.counts
    }

    pub fn count(&self, phase: PodPhase) -> usize {
        self.counts.get(phase)
    }

    /// Pods in `phase`, in fetch order
    pub fn pods(&self, phase: PodPhase) -> &[PodRecord] {
        self.pods_by_phase
            .get(&phase)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Pod names in `phase`, in fetch order
    pub fn names(&self, phase: PodPhase) -> Vec<&str> {
        self.pods(phase).iter().map(|p| p.name.as_str()).collect()
    }

    /// Number of pods classified
    pub fn total(&self) -> usize {
        self.counts.total()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn serialize_names<S>(
    pods_by_phase: &BTreeMap<PodPhase, Vec<PodRecord>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(pods_by_phase.iter().map(|(phase, pods)| {
        (
            phase,
            pods.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        )
    }))
}

/// Partition pods by phase in a single pass, preserving input order per phase
pub fn classify<I>(pods: I) -> ClassificationResult
where
    I: IntoIterator<Item = PodRecord>,
{
    let mut result = ClassificationResult::empty();
    for pod in pods {
        result.record(pod);
    }

    tracing::debug!(
        total = result.total(),
        running = result.counts.running,
        succeeded = result.counts.succeeded,
        pending = result.counts.pending,
        failed = result.counts.failed,
        unknown = result.counts.unknown,
        "classified pods"
    );

    result
}
