//! Rendering of classification results

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use podphase_classify::{ClassificationResult, PodPhase};

/// Output format for the report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON document
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    total: usize,
    #[serde(flatten)]
    result: &'a ClassificationResult,
}

/// Render `result` in the requested format. `quiet` drops the per-pod lines
/// from text output.
pub fn render(result: &ClassificationResult, format: OutputFormat, quiet: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result, quiet)),
        OutputFormat::Json => {
            let report = JsonReport {
                total: result.total(),
                result,
            };
            let mut out = serde_json::to_string_pretty(&report)?;
            out.push('\n');
            Ok(out)
        }
    }
}

fn render_text(result: &ClassificationResult, quiet: bool) -> String {
    let mut lines = vec![format!("There are {} pods in the cluster", result.total())];

    if !quiet {
        for phase in PodPhase::ALL {
            lines.extend(
                result
                    .pods(phase)
                    .iter()
                    .map(|pod| format!("Pod {} is {}", pod.qualified_name(), phase)),
            );
        }
    }

    lines.extend(
        PodPhase::ALL
            .iter()
            .map(|phase| format!("Pods in {}: {}", phase.label(), result.count(*phase))),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use podphase_classify::{PodRecord, classify};

    fn sample() -> ClassificationResult {
        classify(vec![
            PodRecord::new("a", PodPhase::Running),
            PodRecord::new("b", PodPhase::Pending),
            PodRecord::new("c", PodPhase::Running),
            PodRecord::new("d", PodPhase::Failed),
        ])
    }

    #[test]
    fn test_text_report() {
        let text = render(&sample(), OutputFormat::Text, false).unwrap();
        let expected = "\
There are 4 pods in the cluster
Pod a is Running
Pod c is Running
Pod b is Pending
Pod d is Failed
Pods in running: 2
Pods in succeeded: 0
Pods in pending: 1
Pods in failed: 1
Pods in unknown: 0
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_text_report_shows_namespace() {
        let result = classify(vec![
            PodRecord::new("web", PodPhase::Running).with_namespace("shop"),
            PodRecord::new("web", PodPhase::Running).with_namespace("blog"),
            PodRecord::new("migrate", PodPhase::Succeeded).with_namespace("shop"),
        ]);
        let text = render(&result, OutputFormat::Text, false).unwrap();
        let pod_lines: Vec<_> = text.lines().filter(|l| l.starts_with("Pod ")).collect();

        assert_eq!(
            pod_lines,
            [
                "Pod shop/web is Running",
                "Pod blog/web is Running",
                "Pod shop/migrate is Succeeded",
            ]
        );
    }

    #[test]
    fn test_quiet_text_report() {
        let text = render(&sample(), OutputFormat::Text, true).unwrap();
        assert!(!text.contains("Pod a is Running"));
        assert!(text.starts_with("There are 4 pods in the cluster\n"));
        assert_eq!(text.lines().count(), 6);
    }

    #[test]
    fn test_empty_text_report() {
        let text = render(&classify(Vec::new()), OutputFormat::Text, false).unwrap();
        assert!(text.starts_with("There are 0 pods in the cluster\n"));
        assert!(text.contains("Pods in unknown: 0"));
    }

    #[test]
    fn test_json_report() {
        let json = render(&sample(), OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total"], 4);
        assert_eq!(value["counts"]["Running"], 2);
        assert_eq!(value["counts"]["Succeeded"], 0);
        assert_eq!(value["pods"]["Running"], serde_json::json!(["a", "c"]));
        for phase in PodPhase::ALL {
            assert!(value["pods"][phase.as_str()].is_array());
        }
    }
}
