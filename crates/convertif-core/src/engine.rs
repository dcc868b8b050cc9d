//! Answer sheet grading.
//!
//! Runs every question of an answer sheet through the grading engine and
//! collects the outcomes into a [`GradingReport`].

use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::grading::Grader;
use crate::model::AnswerSheet;
use crate::report::{GradingReport, QuestionOutcome, SheetSummary};
use crate::statistics::compute_sheet_stats;

/// Progress reporting trait.
pub trait ProgressReporter {
    fn on_question_graded(&self, outcome: &QuestionOutcome);
    fn on_sheet_complete(&self, sheet: &SheetSummary, correct: usize, total: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_question_graded(&self, _: &QuestionOutcome) {}
    fn on_sheet_complete(&self, _: &SheetSummary, _: usize, _: usize, _: Duration) {}
}

/// Grades whole answer sheets.
pub struct SheetGrader<'t> {
    grader: Grader<'t>,
}

impl SheetGrader<'static> {
    /// A sheet grader over the process-wide conversion table.
    pub fn global() -> Self {
        Self::new(Grader::global())
    }
}

impl<'t> SheetGrader<'t> {
    pub fn new(grader: Grader<'t>) -> Self {
        Self { grader }
    }

    /// Grade every question on `sheet`, in order.
    pub fn grade(&self, sheet: &AnswerSheet, progress: &dyn ProgressReporter) -> GradingReport {
        let start = Instant::now();

        let outcomes: Vec<QuestionOutcome> = sheet
            .questions
            .iter()
            .map(|question| {
                let request = question.to_request(sheet.default_category);
                let result = self.grader.grade(&request);
                let outcome = QuestionOutcome {
                    question_id: question.id.clone(),
                    student: question.student.clone(),
                    category: request.category,
                    source_unit: request.source_unit,
                    target_unit: request.target_unit,
                    measured_value: request.measured_value,
                    response: request.student_response,
                    result,
                };
                progress.on_question_graded(&outcome);
                outcome
            })
            .collect();

        let summary = compute_sheet_stats(&outcomes);
        let sheet_summary = SheetSummary {
            id: sheet.id.clone(),
            name: sheet.name.clone(),
            question_count: sheet.questions.len(),
        };

        let elapsed = start.elapsed();
        progress.on_sheet_complete(&sheet_summary, summary.correct, summary.total, elapsed);
        tracing::info!(
            sheet = %sheet.id,
            total = summary.total,
            correct = summary.correct,
            incorrect = summary.incorrect,
            "graded answer sheet"
        );

        GradingReport {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            sheet: sheet_summary,
            outcomes,
            summary,
            duration_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Grade a sheet against the global table without progress reporting.
pub fn grade_sheet(sheet: &AnswerSheet) -> GradingReport {
    SheetGrader::global().grade(sheet, &NoopReporter)
}

/// Grade a sheet with an explicit grader, without progress reporting.
pub fn grade_sheet_with(grader: Grader<'_>, sheet: &AnswerSheet) -> GradingReport {
    SheetGrader::new(grader).grade(sheet, &NoopReporter)
}
