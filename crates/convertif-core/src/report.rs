//! Grading report types with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grading::GradingResult;
use crate::statistics::SheetStats;

/// The graded outcome of one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: String,
    #[serde(default)]
    pub student: Option<String>,
    /// Category the question was graded under (empty if none applied).
    pub category: String,
    pub source_unit: String,
    pub target_unit: String,
    pub measured_value: f64,
    pub response: String,
    pub result: GradingResult,
}

/// Summary of an answer sheet (without the questions themselves).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

/// A complete grading report for one answer sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the answer sheet.
    pub sheet: SheetSummary,
    /// Individual question outcomes, in sheet order.
    pub outcomes: Vec<QuestionOutcome>,
    /// Aggregate statistics.
    pub summary: SheetStats,
    /// Wall-clock grading time in milliseconds.
    pub duration_ms: u64,
}

impl GradingReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradingReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Outcomes the student got wrong, with the expected answers.
    pub fn incorrect(&self) -> impl Iterator<Item = (&QuestionOutcome, f64)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.correct_answer().map(|answer| (o, answer)))
    }

    /// Returns true if any gradeable answer was incorrect.
    pub fn has_incorrect(&self) -> bool {
        self.summary.incorrect > 0
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.sheet.name));
        md.push_str(&format!(
            "**Summary:** {} correct, {} incorrect, {} invalid, {} invalid responses ({:.1}%)\n\n",
            self.summary.correct,
            self.summary.incorrect,
            self.summary.invalid,
            self.summary.invalid_response,
            self.summary.score * 100.0
        ));

        md.push_str("| Question | Student | Conversion | Value | Response | Verdict |\n");
        md.push_str("|----------|---------|------------|-------|----------|---------|\n");
        for o in &self.outcomes {
            let verdict = match o.result.correct_answer() {
                Some(answer) => format!("{} (correct answer is {answer})", o.result),
                None => o.result.to_string(),
            };
            md.push_str(&format!(
                "| {} | {} | {} -> {} | {} | {} | {} |\n",
                o.question_id,
                o.student.as_deref().unwrap_or("-"),
                o.source_unit,
                o.target_unit,
                o.measured_value,
                o.response,
                verdict
            ));
        }

        if self.summary.per_student.len() > 1 {
            md.push_str("\n### Students\n\n");
            md.push_str("| Student | Answered | Correct | Score |\n");
            md.push_str("|---------|----------|---------|-------|\n");
            for s in self.summary.per_student.values() {
                md.push_str(&format!(
                    "| {} | {} | {} | {:.1}% |\n",
                    s.student,
                    s.answered,
                    s.correct,
                    s.score * 100.0
                ));
            }
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::compute_sheet_stats;

    fn make_outcome(id: &str, student: &str, result: GradingResult) -> QuestionOutcome {
        QuestionOutcome {
            question_id: id.into(),
            student: Some(student.into()),
            category: "temperature".into(),
            source_unit: "celsius".into(),
            target_unit: "kelvin".into(),
            measured_value: 0.0,
            response: "200".into(),
            result,
        }
    }

    fn make_report(outcomes: Vec<QuestionOutcome>) -> GradingReport {
        GradingReport {
            id: Uuid::nil(),
            created_at: Utc::now(),
            sheet: SheetSummary {
                id: "test".into(),
                name: "Test".into(),
                question_count: outcomes.len(),
            },
            summary: compute_sheet_stats(&outcomes),
            outcomes,
            duration_ms: 0,
        }
    }

    #[test]
    fn json_roundtrip() {
        let report = make_report(vec![make_outcome(
            "q1",
            "Ada",
            GradingResult::Incorrect { correct_answer: 273.2 },
        )]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = GradingReport::load_json(&path).unwrap();

        assert_eq!(loaded.sheet.id, "test");
        assert_eq!(loaded.outcomes, report.outcomes);
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn load_missing_report_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GradingReport::load_json(&dir.path().join("none.json")).is_err());
    }

    #[test]
    fn incorrect_lists_expected_answers() {
        let report = make_report(vec![
            make_outcome("q1", "Ada", GradingResult::Correct),
            make_outcome("q2", "Ada", GradingResult::Incorrect { correct_answer: 273.2 }),
        ]);
        let wrong: Vec<_> = report.incorrect().collect();
        assert_eq!(wrong.len(), 1);
        assert_eq!(wrong[0].0.question_id, "q2");
        assert_eq!(wrong[0].1, 273.2);
        assert!(report.has_incorrect());
    }

    #[test]
    fn markdown_output() {
        let report = make_report(vec![
            make_outcome("q1", "Ada", GradingResult::Correct),
            make_outcome("q2", "Grace", GradingResult::Incorrect { correct_answer: 273.2 }),
        ]);
        let md = report.to_markdown();
        assert!(md.contains("1 correct, 1 incorrect"));
        assert!(md.contains("Incorrect (correct answer is 273.2)"));
        assert!(md.contains("### Students"));
        assert!(md.contains("| Grace | 1 | 0 | 0.0% |"));
    }
}
