//! Aggregate statistics over graded answer sheets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::grading::GradingResult;
use crate::report::QuestionOutcome;

/// Bucket for questions that carry no student name.
pub const ANONYMOUS_STUDENT: &str = "anonymous";

/// Fraction of gradeable answers that are correct.
///
/// Invalid conversions and unparseable responses are not counted. Returns
/// 0.0 when nothing could be graded.
pub fn score(correct: usize, incorrect: usize) -> f64 {
    let graded = correct + incorrect;
    if graded == 0 {
        0.0
    } else {
        correct as f64 / graded as f64
    }
}

/// Statistics for a whole sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetStats {
    /// Number of questions graded.
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// Questions whose category/unit combination is not convertible.
    pub invalid: usize,
    /// Questions whose response is not a number.
    pub invalid_response: usize,
    /// `correct / (correct + incorrect)`.
    pub score: f64,
    /// Per-student statistics, keyed by student name.
    pub per_student: BTreeMap<String, StudentStats>,
}

/// Statistics for a single student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentStats {
    /// Student name.
    pub student: String,
    /// Questions attributed to this student.
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// `correct / (correct + incorrect)`.
    pub score: f64,
}

/// Compute sheet statistics from graded outcomes.
pub fn compute_sheet_stats(outcomes: &[QuestionOutcome]) -> SheetStats {
    let mut stats = SheetStats {
        total: outcomes.len(),
        ..SheetStats::default()
    };

    for outcome in outcomes {
        let name = outcome
            .student
            .clone()
            .unwrap_or_else(|| ANONYMOUS_STUDENT.to_string());
        let student = stats
            .per_student
            .entry(name.clone())
            .or_insert_with(|| StudentStats {
                student: name,
                ..StudentStats::default()
            });
        student.answered += 1;

        match outcome.result {
            GradingResult::Correct => {
                stats.correct += 1;
                student.correct += 1;
            }
            GradingResult::Incorrect { .. } => {
                stats.incorrect += 1;
                student.incorrect += 1;
            }
            GradingResult::Invalid => stats.invalid += 1,
            GradingResult::InvalidResponse => stats.invalid_response += 1,
        }
    }

    stats.score = score(stats.correct, stats.incorrect);
    for student in stats.per_student.values_mut() {
        student.score = score(student.correct, student.incorrect);
    }

    stats
}
