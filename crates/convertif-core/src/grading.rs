//! The grading engine.
//!
//! Grades one student answer against the converted value of a measurement.
//! Both the measured value and the student's response are rounded to one
//! decimal place before the conversion is applied and compared, and the
//! comparison tolerance is exactly one tenth. The rounding grain and the
//! tolerance move together.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::ConversionTable;

/// Maximum absolute difference between the rounded converted value and the
/// rounded response for the response to be correct.
pub const TOLERANCE: f64 = 0.1;

/// One grading request, as collected by an input form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingRequest {
    /// Conversion category identifier (e.g. "temperature").
    pub category: String,
    /// Unit the measurement is expressed in.
    pub source_unit: String,
    /// Unit the student was asked to convert to.
    pub target_unit: String,
    /// The instructor's measured value.
    pub measured_value: f64,
    /// The student's answer, as typed.
    pub student_response: String,
}

impl GradingRequest {
    pub fn new(
        category: impl Into<String>,
        source_unit: impl Into<String>,
        target_unit: impl Into<String>,
        measured_value: f64,
        student_response: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            source_unit: source_unit.into(),
            target_unit: target_unit.into(),
            measured_value,
            student_response: student_response.into(),
        }
    }
}

/// The verdict of a single grading call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum GradingResult {
    /// The category/unit combination is not in the conversion table.
    Invalid,
    /// The student response is not a number.
    InvalidResponse,
    /// The response matches the converted value within tolerance.
    Correct,
    /// The response is outside tolerance.
    Incorrect { correct_answer: f64 },
}

impl GradingResult {
    pub fn is_correct(&self) -> bool {
        matches!(self, GradingResult::Correct)
    }

    /// The expected answer, reported only for incorrect responses.
    pub fn correct_answer(&self) -> Option<f64> {
        match self {
            GradingResult::Incorrect { correct_answer } => Some(*correct_answer),
            _ => None,
        }
    }
}

impl fmt::Display for GradingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingResult::Invalid => write!(f, "Invalid"),
            GradingResult::InvalidResponse => write!(f, "Invalid student response"),
            GradingResult::Correct => write!(f, "Correct"),
            GradingResult::Incorrect { .. } => write!(f, "Incorrect"),
        }
    }
}

/// Round half up (ties toward positive infinity) to the nearest integer.
fn round_half_up(v: f64) -> f64 {
    let floor = v.floor();
    if v - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round to one decimal place: `round(v * 10) / 10`, ties toward +inf.
pub fn round_to_tenth(v: f64) -> f64 {
    round_half_up(v * 10.0) / 10.0
}

/// Parse a typed student response.
///
/// Surrounding whitespace is ignored. Empty text, non-numeric text and
/// non-finite values (`inf`, `NaN`) are rejected, as are radix
/// prefixes such as `0x10`.
pub fn parse_response(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Grade a request against the global conversion table.
pub fn grade(request: &GradingRequest) -> GradingResult {
    Grader::global().grade(request)
}

/// Grade a request against an explicit table.
pub fn grade_with(table: &ConversionTable, request: &GradingRequest) -> GradingResult {
    Grader::new(table).grade(request)
}

/// A grading engine bound to a conversion table.
#[derive(Debug, Clone, Copy)]
pub struct Grader<'t> {
    table: &'t ConversionTable,
}

impl Grader<'static> {
    /// A grader over the process-wide table.
    pub fn global() -> Self {
        Self {
            table: ConversionTable::global(),
        }
    }
}

impl<'t> Grader<'t> {
    pub fn new(table: &'t ConversionTable) -> Self {
        Self { table }
    }

    /// Grade one request. Never fails: every outcome is a verdict.
    pub fn grade(&self, request: &GradingRequest) -> GradingResult {
        let result = self.evaluate(request);
        tracing::debug!(
            category = %request.category,
            source = %request.source_unit,
            target = %request.target_unit,
            measured = request.measured_value,
            response = %request.student_response,
            verdict = %result,
            "graded response"
        );
        result
    }

    fn evaluate(&self, request: &GradingRequest) -> GradingResult {
        let Some(convert) = self.table.lookup(
            &request.category,
            &request.source_unit,
            &request.target_unit,
        ) else {
            return GradingResult::Invalid;
        };

        // A measurement that is not a finite number cannot be converted.
        if !request.measured_value.is_finite() {
            return GradingResult::Invalid;
        }

        let Some(response) = parse_response(&request.student_response) else {
            return GradingResult::InvalidResponse;
        };

        let measured = round_to_tenth(request.measured_value);
        let response = round_to_tenth(response);
        let converted = round_to_tenth(convert(measured));

        // Both sides sit on the 0.1 grid; compare whole tenths so that float
        // noise in the subtraction cannot move a neighbouring tenth inside
        // the tolerance.
        let distance = (round_half_up(converted * 10.0) - round_half_up(response * 10.0)).abs();
        if distance * 0.1 < TOLERANCE {
            GradingResult::Correct
        } else {
            GradingResult::Incorrect {
                correct_answer: converted,
            }
        }
    }
}
