//! TOML answer sheet parser.
//!
//! Loads answer sheets from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::grading::parse_response;
use crate::model::{AnswerSheet, Question};
use crate::table::ConversionTable;
use crate::units::{ConversionCategory, Unit};

/// Character limit of the measured value and response fields on the
/// instructor's form.
pub const FORM_FIELD_LIMIT: usize = 5;

/// Intermediate TOML structure for parsing answer sheet files.
#[derive(Debug, Deserialize)]
struct TomlSheetFile {
    sheet: TomlSheetHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlSheetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    default_category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(default)]
    student: Option<String>,
    #[serde(default)]
    category: Option<String>,
    from: String,
    to: String,
    value: f64,
    response: TomlResponse,
    #[serde(default)]
    tags: Vec<String>,
}

/// Responses may be written as TOML strings or bare numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlResponse {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl TomlResponse {
    fn into_text(self) -> String {
        match self {
            TomlResponse::Text(s) => s,
            TomlResponse::Integer(i) => i.to_string(),
            TomlResponse::Float(f) => f.to_string(),
        }
    }
}

/// Parse a single TOML file into an `AnswerSheet`.
pub fn parse_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;

    parse_answer_sheet_str(&content, path)
}

/// Parse a TOML string into an `AnswerSheet` (useful for testing).
pub fn parse_answer_sheet_str(content: &str, source_path: &Path) -> Result<AnswerSheet> {
    let parsed: TomlSheetFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let default_category = parsed
        .sheet
        .default_category
        .map(|c| c.parse::<ConversionCategory>())
        .transpose()
        .with_context(|| format!("invalid default_category in {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            id: q.id,
            student: q.student,
            category: q.category,
            source_unit: q.from,
            target_unit: q.to,
            measured_value: q.value,
            response: q.response.into_text(),
            tags: q.tags,
        })
        .collect();

    Ok(AnswerSheet {
        id: parsed.sheet.id,
        name: parsed.sheet.name,
        description: parsed.sheet.description,
        default_category,
        questions,
    })
}

/// Recursively load all `.toml` answer sheets from a directory.
pub fn load_sheet_directory(dir: &Path) -> Result<Vec<AnswerSheet>> {
    let mut sheets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            sheets.extend(load_sheet_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_answer_sheet(&path) {
                Ok(sheet) => sheets.push(sheet),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sheets)
}

/// Load a single sheet file, or every sheet in a directory.
pub fn load_sheets(path: &Path) -> Result<Vec<AnswerSheet>> {
    if path.is_dir() {
        load_sheet_directory(path)
    } else {
        Ok(vec![parse_answer_sheet(path)?])
    }
}

/// A warning from answer sheet validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate an answer sheet for questions that cannot be graded as intended.
pub fn validate_answer_sheet(sheet: &AnswerSheet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let table = ConversionTable::global();

    if sheet.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "sheet has no questions".into(),
        });
    }

    // Check for duplicate question IDs
    let mut seen_ids = std::collections::HashSet::new();
    for q in &sheet.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("duplicate question ID: {}", q.id),
            ));
        }
    }

    for q in &sheet.questions {
        if let Some(message) = conversion_problem(table, q, sheet.default_category) {
            warnings.push(ValidationWarning::question(&q.id, message));
        }

        if parse_response(&q.response).is_none() {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("response '{}' is not a number", q.response),
            ));
        }

        if q.response.trim().chars().count() > FORM_FIELD_LIMIT {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("response is longer than {FORM_FIELD_LIMIT} characters"),
            ));
        }

        if q.measured_value.to_string().chars().count() > FORM_FIELD_LIMIT {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("measured value is longer than {FORM_FIELD_LIMIT} characters"),
            ));
        }
    }

    warnings
}

/// Describe why a question's conversion would grade as `Invalid`, if it would.
fn conversion_problem(
    table: &ConversionTable,
    q: &Question,
    default: Option<ConversionCategory>,
) -> Option<String> {
    let Some(category) = q.effective_category(default) else {
        return Some("no category and the sheet has no default_category".into());
    };
    let category = match category.parse::<ConversionCategory>() {
        Ok(c) => c,
        Err(e) => return Some(e.to_string()),
    };
    let source = match Unit::parse(category, &q.source_unit) {
        Ok(u) => u,
        Err(e) => return Some(e.to_string()),
    };
    let target = match Unit::parse(category, &q.target_unit) {
        Ok(u) => u,
        Err(e) => return Some(e.to_string()),
    };
    if !table.contains(source, target) {
        return Some(format!("no {category} conversion from {source} to {target}"));
    }
    if !q.measured_value.is_finite() {
        return Some("measured value is not a finite number".into());
    }
    None
}
