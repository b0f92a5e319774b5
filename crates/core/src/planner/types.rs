//! Per-file outcomes and the run report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::converter::{MediaFile, Title};

/// What happened to one candidate.
///
/// A failed conversion has no variant: it ends the run with a `PlannerError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Transcoded; `cleaned_up` tells whether the input was deleted.
    Converted { cleaned_up: bool },
    /// Title already catalogued.
    SkippedDuplicate { cleaned_up: bool },
    /// Output path already taken.
    SkippedExisting,
    /// `ffmpeg.run` is false.
    SkippedDisabled,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Converted { .. } => "converted",
            Outcome::SkippedDuplicate { .. } => "skipped_duplicate",
            Outcome::SkippedExisting => "skipped_existing",
            Outcome::SkippedDisabled => "skipped_disabled",
        }
    }

    pub fn cleaned_up(&self) -> bool {
        matches!(
            self,
            Outcome::Converted { cleaned_up: true } | Outcome::SkippedDuplicate { cleaned_up: true }
        )
    }
}

/// A processed candidate.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub file: MediaFile,
    pub title: Title,
    pub output: PathBuf,
    pub outcome: Outcome,
}

/// Result of one planning run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Number of candidates found in the input directory.
    pub candidates: usize,
    /// Number of titles in the catalog the run compared against.
    pub catalogued: usize,
    /// Processed candidates, in order.
    pub entries: Vec<ReportEntry>,
    /// The duplicate input that stopped the run, if any.
    pub aborted_by: Option<PathBuf>,
}

impl RunReport {
    pub fn new(candidates: usize) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            candidates,
            catalogued: 0,
            entries: Vec::new(),
            aborted_by: None,
        }
    }

    pub fn record(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    fn count(&self, f: impl Fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|e| f(&e.outcome)).count()
    }

    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Converted { .. }))
    }

    pub fn skipped_duplicate(&self) -> usize {
        self.count(|o| matches!(o, Outcome::SkippedDuplicate { .. }))
    }

    pub fn skipped_existing(&self) -> usize {
        self.count(|o| matches!(o, Outcome::SkippedExisting))
    }

    pub fn skipped_disabled(&self) -> usize {
        self.count(|o| matches!(o, Outcome::SkippedDisabled))
    }

    pub fn cleaned_up(&self) -> usize {
        self.count(Outcome::cleaned_up)
    }

    /// Candidates never looked at because the run was aborted.
    pub fn not_processed(&self) -> usize {
        self.candidates.saturating_sub(self.entries.len())
    }

    pub fn was_aborted(&self) -> bool {
        self.aborted_by.is_some()
    }

    pub fn elapsed_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }

    /// One-line summary for the end-of-run log.
    pub fn summary(&self) -> String {
        format!(
            "{} candidate(s): {} converted, {} duplicate, {} existing, {} disabled, {} not processed, {} cleaned up",
            self.candidates,
            self.converted(),
            self.skipped_duplicate(),
            self.skipped_existing(),
            self.skipped_disabled(),
            self.not_processed(),
            self.cleaned_up(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, outcome: Outcome) -> ReportEntry {
        ReportEntry {
            file: MediaFile::new(format!("/in/{}.aax", name)),
            title: Title::new(name),
            output: PathBuf::from(format!("/out/{}.m4b", name)),
            outcome,
        }
    }

    #[test]
    fn test_counts_and_summary() {
        let mut report = RunReport::new(5);
        report.record(entry("a", Outcome::Converted { cleaned_up: true }));
        report.record(entry("b", Outcome::SkippedExisting));
        report.record(entry("c", Outcome::SkippedDuplicate { cleaned_up: false }));
        report.aborted_by = Some(PathBuf::from("/in/c.aax"));
        report.finish();

        assert_eq!(report.converted(), 1);
        assert_eq!(report.skipped_existing(), 1);
        assert_eq!(report.skipped_duplicate(), 1);
        assert_eq!(report.skipped_disabled(), 0);
        assert_eq!(report.cleaned_up(), 1);
        assert_eq!(report.not_processed(), 2);
        assert!(report.was_aborted());
        assert!(report.elapsed_ms().unwrap() >= 0);
        assert_eq!(
            report.summary(),
            "5 candidate(s): 1 converted, 1 duplicate, 1 existing, 0 disabled, 2 not processed, 1 cleaned up"
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(Outcome::Converted { cleaned_up: true }).unwrap();
        assert_eq!(json["outcome"], "converted");
        assert_eq!(json["cleaned_up"], true);

        let json = serde_json::to_value(Outcome::SkippedDisabled).unwrap();
        assert_eq!(json["outcome"], "skipped_disabled");
        assert_eq!(Outcome::SkippedExisting.label(), "skipped_existing");
    }
}
