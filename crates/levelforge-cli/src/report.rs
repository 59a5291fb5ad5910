use std::collections::BTreeMap;
use std::path::Path;

use levelforge_rules::{MirrorDrift, PacingFailure, Severity};

/// One pacing failure, flattened for JSON output.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureRecord {
    pub rule_id: &'static str,
    pub level: String,
    pub location: String,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl From<&PacingFailure> for FailureRecord {
    fn from(failure: &PacingFailure) -> Self {
        Self {
            rule_id: failure.rule_id(),
            level: failure.level.to_string(),
            location: failure.location.clone(),
            severity: failure.severity,
            message: failure.violation.to_string(),
            hint: failure.hint(),
        }
    }
}

/// Result of one `validate` run.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub source: String,
    pub levels_checked: usize,
    pub blocking: usize,
    pub advisory: usize,
    pub failures: Vec<FailureRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mirror_drift: Vec<String>,
}

impl ValidationReport {
    pub fn new(source: &str, levels_checked: usize, failures: &[PacingFailure]) -> Self {
        let blocking = failures.iter().filter(|f| f.is_blocking()).count();
        Self {
            source: source.to_owned(),
            levels_checked,
            blocking,
            advisory: failures.len() - blocking,
            failures: failures.iter().map(FailureRecord::from).collect(),
            mirror_drift: Vec::new(),
        }
    }

    pub fn with_drift(mut self, drift: &[MirrorDrift]) -> Self {
        self.mirror_drift = drift.iter().map(ToString::to_string).collect();
        self
    }

    /// Exit status of the run: blocking findings and mirror drift both fail it.
    pub fn passed(&self) -> bool {
        self.blocking == 0 && self.mirror_drift.is_empty()
    }

    /// Process exit code for the run: 0 when passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Save a report as pretty JSON, creating parent directories.
pub fn save_report(path: &Path, report: &ValidationReport) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// One line per failure, hint included, then a summary line.
pub fn format_text(report: &ValidationReport) -> String {
    let mut out = String::new();
    for f in &report.failures {
        out.push_str(&format!(
            "{} [{}] {} Level {} {}",
            f.severity, f.rule_id, f.location, f.level, f.message
        ));
        if let Some(hint) = f.hint {
            out.push_str(&format!(" (hint: {})", hint));
        }
        out.push('\n');
    }
    for drift in &report.mirror_drift {
        out.push_str(&format!("drift {}\n", drift));
    }
    out.push_str(&format!(
        "{} level(s) checked: {} blocking, {} advisory",
        report.levels_checked, report.blocking, report.advisory
    ));
    if !report.mirror_drift.is_empty() {
        out.push_str(&format!(", {} mirror drift(s)", report.mirror_drift.len()));
    }
    out.push('\n');
    out
}

/// Format failure counts per rule as a markdown summary table.
pub fn format_markdown(report: &ValidationReport) -> String {
    let mut counts: BTreeMap<(&str, Severity), usize> = BTreeMap::new();
    for f in &report.failures {
        *counts.entry((f.rule_id, f.severity)).or_default() += 1;
    }

    let mut out = String::new();
    out.push_str("| Rule | Severity | Count |\n");
    out.push_str("|------|----------|-------|\n");
    for ((rule, severity), count) in &counts {
        out.push_str(&format!("| {} | {} | {} |\n", rule, severity, count));
    }
    if counts.is_empty() {
        out.push_str(&format!(
            "\nAll {} levels pass the pacing rules.\n",
            report.levels_checked
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelforge_core::types::LevelKey;
    use levelforge_rules::PacingViolation;

    fn failures() -> Vec<PacingFailure> {
        vec![
            PacingFailure {
                level: LevelKey::new(2, 3),
                location: "campaign#2-3/chunk[4]".into(),
                severity: Severity::Blocking,
                violation: PacingViolation::UnknownChunk {
                    chunk: "ghost_chunk_99".into(),
                },
            },
            PacingFailure {
                level: LevelKey::new(2, 3),
                location: "campaign#2-3/chunk[5]".into(),
                severity: Severity::Advisory,
                violation: PacingViolation::TagNotAllowed {
                    chunk: "benchmark_sprint_01".into(),
                    world: 2,
                    tags: "AUTO_SCROLL".into(),
                },
            },
        ]
    }

    #[test]
    fn test_counts_and_pass_state() {
        let report = ValidationReport::new("campaign", 28, &failures());
        assert_eq!((report.blocking, report.advisory), (1, 1));
        assert!(!report.passed());
        assert!(ValidationReport::new("campaign", 28, &[]).passed());

        let drifted = ValidationReport::new("campaign", 28, &[])
            .with_drift(&[MirrorDrift::MissingLevel(LevelKey::new(1, 1))]);
        assert!(!drifted.passed());
    }

    #[test]
    fn test_exit_code_follows_blocking_and_drift() {
        assert_eq!(ValidationReport::new("campaign", 28, &[]).exit_code(), 0);

        let advisory_only: Vec<_> = failures()
            .into_iter()
            .filter(|f| !f.is_blocking())
            .collect();
        assert_eq!(advisory_only.len(), 1);
        assert_eq!(ValidationReport::new("campaign", 28, &advisory_only).exit_code(), 0);

        assert_eq!(ValidationReport::new("campaign", 28, &failures()).exit_code(), 1);
        let drifted = ValidationReport::new("campaign", 28, &[])
            .with_drift(&[MirrorDrift::MissingLevel(LevelKey::new(1, 1))]);
        assert_eq!(drifted.exit_code(), 1);
    }

    #[test]
    fn test_text_puts_each_failure_on_one_line() {
        let text = format_text(&ValidationReport::new("campaign", 28, &failures()));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "blocking [campaign.chunk.unknown] campaign#2-3/chunk[4] Level 2-3 uses unknown chunk id 'ghost_chunk_99' (hint: register the chunk in the catalog or fix the id)"
        );
        assert!(lines[1].starts_with("advisory [campaign.tag.notAllowed] campaign#2-3/chunk[5] Level 2-3 "));
        assert!(lines[1].ends_with("(hint: pick a chunk whose tags the world unlocks)"));
        assert!(!text.contains("\n    "));
        assert_eq!(lines[2], "28 level(s) checked: 1 blocking, 1 advisory");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_markdown_table() {
        let md = format_markdown(&ValidationReport::new("campaign", 28, &failures()));
        assert!(md.contains("| campaign.chunk.unknown | blocking | 1 |"));
        assert!(md.contains("| campaign.tag.notAllowed | advisory | 1 |"));

        let clean = format_markdown(&ValidationReport::new("campaign", 28, &[]));
        assert!(clean.contains("All 28 levels pass"));
    }

    #[test]
    fn test_json_shape() {
        let report = ValidationReport::new("campaign", 28, &failures());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["levelsChecked"], 28);
        assert_eq!(json["failures"][0]["ruleId"], "campaign.chunk.unknown");
        assert_eq!(json["failures"][1]["severity"], "advisory");
        assert!(json.get("mirrorDrift").is_none());
    }
}
