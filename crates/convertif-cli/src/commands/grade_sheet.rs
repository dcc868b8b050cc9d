//! The `convertif grade-sheet` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use convertif_core::config::load_config_from;
use convertif_core::engine::{ProgressReporter, SheetGrader};
use convertif_core::parser::load_sheets;
use convertif_core::report::{GradingReport, QuestionOutcome, SheetSummary};

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_question_graded(&self, outcome: &QuestionOutcome) {
        let student = outcome
            .student
            .as_deref()
            .map(|s| format!(" ({s})"))
            .unwrap_or_default();
        match outcome.result.correct_answer() {
            Some(answer) => eprintln!(
                "  {}{student}: {} (expected {answer}, got {})",
                outcome.question_id, outcome.result, outcome.response
            ),
            None => eprintln!("  {}{student}: {}", outcome.question_id, outcome.result),
        }
    }

    fn on_sheet_complete(&self, sheet: &SheetSummary, correct: usize, total: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {}: {correct}/{total} correct ({:.1}ms)",
            sheet.name,
            elapsed.as_secs_f64() * 1000.0
        );
    }
}

#[allow(clippy::too_many_arguments)]
pub fn execute(
    sheet_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    student: Option<String>,
    filter: Option<String>,
    fail_on_incorrect: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let format = format.unwrap_or_else(|| config.format.clone());
    let fail_on_incorrect = fail_on_incorrect || config.fail_on_incorrect;

    let formats: Vec<&str> = if format == "all" {
        vec!["text", "json", "markdown"]
    } else {
        format.split(',').map(str::trim).collect()
    };
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "text" | "json" | "markdown" | "md"),
            "unknown format: {fmt} (expected text, json, markdown or all)"
        );
    }

    let mut sheets = load_sheets(&sheet_path)?;
    anyhow::ensure!(!sheets.is_empty(), "no answer sheets found in {}", sheet_path.display());

    for sheet in &mut sheets {
        sheet.inherit_default_category(config.default_category);
        if let Some(name) = &student {
            sheet.retain_student(name);
            if sheet.questions.is_empty() {
                tracing::warn!("no questions answered by {name} in {}", sheet.name);
            }
        }
        if let Some(filter_tags) = &filter {
            let tags: Vec<&str> = filter_tags.split(',').map(|s| s.trim()).collect();
            sheet.retain_tags(&tags);
        }
    }

    let grader = SheetGrader::global();
    let reporter = ConsoleReporter;
    let mut any_incorrect = false;

    for sheet in &sheets {
        eprintln!(
            "convertif v{} - Grading {} questions from {}",
            env!("CARGO_PKG_VERSION"),
            sheet.questions.len(),
            sheet.name
        );
        eprintln!();

        let report = grader.grade(sheet, &reporter);
        any_incorrect |= report.has_incorrect();

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        for fmt in &formats {
            match *fmt {
                "text" => print_summary(&report),
                "json" => {
                    let path = output.join(format!("report-{}-{timestamp}.json", sheet.id));
                    report.save_json(&path)?;
                    eprintln!("Results saved to: {}", path.display());
                }
                _ => {
                    let path = output.join(format!("report-{}-{timestamp}.md", sheet.id));
                    std::fs::create_dir_all(&output)?;
                    std::fs::write(&path, report.to_markdown())?;
                    eprintln!("Markdown report: {}", path.display());
                }
            }
        }
    }

    if fail_on_incorrect && any_incorrect {
        anyhow::bail!("one or more answers were incorrect");
    }

    Ok(())
}

fn print_summary(report: &GradingReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Question", "Student", "Conversion", "Value", "Response", "Verdict"]);

    for o in &report.outcomes {
        let verdict = match o.result.correct_answer() {
            Some(answer) => format!("{} (correct answer is {answer})", o.result),
            None => o.result.to_string(),
        };
        table.add_row(vec![
            Cell::new(&o.question_id),
            Cell::new(o.student.as_deref().unwrap_or("-")),
            Cell::new(format!("{} -> {}", o.source_unit, o.target_unit)),
            Cell::new(o.measured_value),
            Cell::new(&o.response),
            Cell::new(verdict),
        ]);
    }

    println!("{table}");

    let s = &report.summary;
    println!(
        "{}: {} correct, {} incorrect, {} invalid, {} invalid responses, score {:.1}%",
        report.sheet.name,
        s.correct,
        s.incorrect,
        s.invalid,
        s.invalid_response,
        s.score * 100.0
    );

    if s.per_student.len() > 1 {
        let mut students = Table::new();
        students.set_header(vec!["Student", "Answered", "Correct", "Score"]);
        for st in s.per_student.values() {
            students.add_row(vec![
                Cell::new(&st.student),
                Cell::new(st.answered),
                Cell::new(st.correct),
                Cell::new(format!("{:.1}%", st.score * 100.0)),
            ]);
        }
        println!("{students}");
    }
}
