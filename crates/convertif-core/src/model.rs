//! Answer sheet data model.
//!
//! An answer sheet is a batch of questions, each asking a student to convert
//! a measured value between two units, together with the student's answer.

use serde::{Deserialize, Serialize};

use crate::grading::GradingRequest;
use crate::units::ConversionCategory;

/// A single graded question on an answer sheet.
///
/// Category and unit identifiers are kept as written so that a sheet with a
/// typo still loads; such questions grade as `Invalid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question within the sheet.
    pub id: String,
    /// Student who answered, if the sheet covers more than one.
    #[serde(default)]
    pub student: Option<String>,
    /// Category identifier; falls back to the sheet default.
    #[serde(default)]
    pub category: Option<String>,
    /// Source unit identifier.
    pub source_unit: String,
    /// Target unit identifier.
    pub target_unit: String,
    /// The instructor's measured value.
    pub measured_value: f64,
    /// The student's answer, as written.
    pub response: String,
    /// Tags for filtering questions.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Question {
    /// The category this question is graded under, if any.
    pub fn effective_category(&self, default: Option<ConversionCategory>) -> Option<String> {
        self.category
            .clone()
            .or_else(|| default.map(|c| c.key().to_string()))
    }

    /// Build the grading request for this question.
    ///
    /// A question with neither its own category nor a sheet default gets an
    /// empty category, which grades as `Invalid`.
    pub fn to_request(&self, default: Option<ConversionCategory>) -> GradingRequest {
        GradingRequest::new(
            self.effective_category(default).unwrap_or_default(),
            self.source_unit.as_str(),
            self.target_unit.as_str(),
            self.measured_value,
            self.response.as_str(),
        )
    }
}

/// A collection of questions graded together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSheet {
    /// Unique identifier for this sheet.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this sheet.
    #[serde(default)]
    pub description: String,
    /// Category for questions that don't specify one.
    #[serde(default)]
    pub default_category: Option<ConversionCategory>,
    /// The questions on this sheet.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl AnswerSheet {
    /// Use `fallback` as the default category when the sheet declares none.
    pub fn inherit_default_category(&mut self, fallback: Option<ConversionCategory>) {
        if self.default_category.is_none() {
            self.default_category = fallback;
        }
    }

    /// Keep only the questions answered by `student`.
    pub fn retain_student(&mut self, student: &str) {
        self.questions
            .retain(|q| q.student.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(student)));
    }

    /// Keep only questions carrying at least one of `tags`.
    pub fn retain_tags(&mut self, tags: &[&str]) {
        self.questions
            .retain(|q| q.tags.iter().any(|t| tags.contains(&t.as_str())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::{grade, GradingResult};

    fn question(id: &str, student: Option<&str>, category: Option<&str>) -> Question {
        Question {
            id: id.into(),
            student: student.map(Into::into),
            category: category.map(Into::into),
            source_unit: "celsius".into(),
            target_unit: "fahrenheit".into(),
            measured_value: 100.0,
            response: "212".into(),
            tags: vec!["boiling".into()],
        }
    }

    #[test]
    fn question_falls_back_to_sheet_category() {
        let q = question("q1", None, None);
        let request = q.to_request(Some(ConversionCategory::Temperature));
        assert_eq!(request.category, "temperature");
        assert_eq!(grade(&request), GradingResult::Correct);
    }

    #[test]
    fn question_category_overrides_default() {
        let q = question("q1", None, Some("Temperature"));
        let request = q.to_request(Some(ConversionCategory::Volume));
        assert_eq!(request.category, "Temperature");
    }

    #[test]
    fn missing_category_grades_invalid() {
        let q = question("q1", None, None);
        assert_eq!(grade(&q.to_request(None)), GradingResult::Invalid);
    }

    #[test]
    fn sheet_default_wins_over_inherited_category() {
        let mut sheet = AnswerSheet {
            id: "s".into(),
            name: "S".into(),
            description: String::new(),
            default_category: None,
            questions: vec![question("q1", None, None)],
        };
        sheet.inherit_default_category(Some(ConversionCategory::Temperature));
        assert_eq!(sheet.default_category, Some(ConversionCategory::Temperature));

        sheet.inherit_default_category(Some(ConversionCategory::Volume));
        assert_eq!(sheet.default_category, Some(ConversionCategory::Temperature));
    }

    #[test]
    fn retain_student_is_case_insensitive() {
        let mut sheet = AnswerSheet {
            id: "s".into(),
            name: "S".into(),
            description: String::new(),
            default_category: Some(ConversionCategory::Temperature),
            questions: vec![
                question("q1", Some("Ada"), None),
                question("q2", Some("Grace"), None),
                question("q3", None, None),
            ],
        };
        sheet.retain_student("ada");
        assert_eq!(sheet.questions.len(), 1);
        assert_eq!(sheet.questions[0].id, "q1");
    }

    #[test]
    fn sheet_serde_roundtrip() {
        let sheet = AnswerSheet {
            id: "quiz-1".into(),
            name: "Quiz 1".into(),
            description: "Temperatures".into(),
            default_category: Some(ConversionCategory::Temperature),
            questions: vec![question("q1", Some("Ada"), None)],
        };
        let json = serde_json::to_string(&sheet).unwrap();
        let parsed: AnswerSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sheet);
    }
}
