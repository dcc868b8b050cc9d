//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn convertif() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("convertif").unwrap()
}

fn grade(category: &str, from: &str, to: &str, value: &str, response: &str) -> assert_cmd::assert::Assert {
    convertif()
        .arg("grade")
        .args(["--category", category])
        .args(["--from", from])
        .args(["--to", to])
        .args(["--value", value])
        .args(["--response", response])
        .assert()
}

#[test]
fn grade_correct_fahrenheit() {
    grade("temperature", "celsius", "fahrenheit", "0", "32")
        .success()
        .stdout(predicate::str::diff("Correct\n"));
}

#[test]
fn grade_incorrect_reports_answer() {
    grade("temperature", "celsius", "kelvin", "0", "200")
        .success()
        .stdout(predicate::str::contains("Incorrect"))
        .stdout(predicate::str::contains("Correct answer is 273.2"));
}

#[test]
fn grade_volume_within_tolerance() {
    grade("volume", "gallon", "liter", "1", "3.8")
        .success()
        .stdout(predicate::str::diff("Correct\n"));
}

#[test]
fn grade_cross_category_is_invalid() {
    grade("temperature", "celsius", "liter", "10", "10")
        .success()
        .stdout(predicate::str::diff("Invalid\n"));
}

#[test]
fn grade_non_numeric_response() {
    grade("temperature", "celsius", "fahrenheit", "10", "abc")
        .success()
        .stdout(predicate::str::contains("Invalid student response"));
}

#[test]
fn grade_is_case_insensitive() {
    grade("Temperature", "CELSIUS", "Fahrenheit", "0", "32")
        .success()
        .stdout(predicate::str::diff("Correct\n"));
}

#[test]
fn grade_negative_values() {
    grade("temperature", "celsius", "fahrenheit", "-40", "-40")
        .success()
        .stdout(predicate::str::diff("Correct\n"));
}

#[test]
fn grade_json_output() {
    convertif()
        .args(["grade", "--category", "temperature", "--from", "celsius", "--to", "kelvin"])
        .args(["--value", "0", "--response", "200", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"verdict\": \"incorrect\""))
        .stdout(predicate::str::contains("\"correct_answer\": 273.2"));
}

#[test]
fn grade_rejects_non_numeric_value() {
    convertif()
        .args(["grade", "--category", "temperature", "--from", "celsius", "--to", "kelvin"])
        .args(["--value", "warm", "--response", "1"])
        .assert()
        .failure();
}

#[test]
fn validate_valid_sheet() {
    convertif()
        .arg("validate")
        .arg("--sheet")
        .arg("../../sheets/temperature-quiz.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("8 questions"))
        .stdout(predicate::str::contains("All answer sheets valid"));
}

#[test]
fn validate_reports_warnings() {
    convertif()
        .arg("validate")
        .arg("--sheet")
        .arg("../../sheets/volume-quiz.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("[v7] WARNING"))
        .stdout(predicate::str::contains("'about 7.6' is not a number"));
}

#[test]
fn validate_directory() {
    convertif()
        .arg("validate")
        .arg("--sheet")
        .arg("../../sheets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Temperature Quiz"))
        .stdout(predicate::str::contains("Volume Quiz"));
}

const UNCATEGORISED_SHEET: &str = r#"[sheet]
id = "pantry"
name = "Pantry"

[[questions]]
id = "p1"
from = "gallon"
to = "liter"
value = 1
response = "3.8"
"#;

#[test]
fn validate_uses_config_default_category() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("pantry.toml"), UNCATEGORISED_SHEET).unwrap();

    convertif()
        .current_dir(dir.path())
        .args(["validate", "--sheet", "pantry.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no category"));

    std::fs::write(dir.path().join("convertif.toml"), "default_category = \"volume\"\n").unwrap();

    convertif()
        .current_dir(dir.path())
        .args(["validate", "--sheet", "pantry.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All answer sheets valid"));

    convertif()
        .current_dir(dir.path())
        .args(["grade-sheet", "--sheet", "pantry.toml", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 correct, 0 incorrect"));
}

#[test]
fn validate_nonexistent_file() {
    convertif()
        .arg("validate")
        .arg("--sheet")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn grade_sheet_prints_summary_and_saves_json() {
    let dir = TempDir::new().unwrap();

    convertif()
        .arg("grade-sheet")
        .arg("--sheet")
        .arg("../../sheets/temperature-quiz.toml")
        .arg("--output")
        .arg(dir.path())
        .args(["--format", "text,json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 correct, 2 incorrect"))
        .stdout(predicate::str::contains("correct answer is 273.2"))
        .stdout(predicate::str::contains("75.0%"));

    let reports: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert_eq!(reports.len(), 1);
    let content = std::fs::read_to_string(&reports[0]).unwrap();
    assert!(content.contains("\"temperature-quiz\""));
}

#[test]
fn grade_sheet_student_filter() {
    let dir = TempDir::new().unwrap();

    convertif()
        .arg("grade-sheet")
        .arg("--sheet")
        .arg("../../sheets/temperature-quiz.toml")
        .arg("--output")
        .arg(dir.path())
        .args(["--format", "text", "--student", "grace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 correct, 1 incorrect"))
        .stdout(predicate::str::contains("t1").not());
}

#[test]
fn grade_sheet_fail_on_incorrect() {
    let dir = TempDir::new().unwrap();

    convertif()
        .arg("grade-sheet")
        .arg("--sheet")
        .arg("../../sheets/volume-quiz.toml")
        .arg("--output")
        .arg(dir.path())
        .args(["--format", "text", "--fail-on-incorrect"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("5 correct, 1 incorrect, 1 invalid, 1 invalid responses"))
        .stderr(predicate::str::contains("incorrect"));
}

#[test]
fn grade_sheet_markdown() {
    let dir = TempDir::new().unwrap();

    convertif()
        .arg("grade-sheet")
        .arg("--sheet")
        .arg("../../sheets/volume-quiz.toml")
        .arg("--output")
        .arg(dir.path())
        .args(["--format", "markdown"])
        .assert()
        .success();

    let markdown: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    assert_eq!(markdown.len(), 1);
    let content = std::fs::read_to_string(&markdown[0]).unwrap();
    assert!(content.contains("## Volume Quiz"));
    assert!(content.contains("Incorrect (correct answer is 4.2)"));
}

#[test]
fn grade_sheet_unknown_format() {
    convertif()
        .arg("grade-sheet")
        .arg("--sheet")
        .arg("../../sheets/volume-quiz.toml")
        .args(["--format", "sarif"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn units_lists_all_categories() {
    convertif()
        .arg("units")
        .assert()
        .success()
        .stdout(predicate::str::contains("Temperature (temperature)"))
        .stdout(predicate::str::contains("rankine"))
        .stdout(predicate::str::contains("Cubic Inch"))
        .stdout(predicate::str::contains("cubic-foot"));
}

#[test]
fn units_single_category() {
    convertif()
        .args(["units", "--category", "Volume"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gallon"))
        .stdout(predicate::str::contains("celsius").not());
}

#[test]
fn units_unknown_category() {
    convertif()
        .args(["units", "--category", "length"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown conversion category: length"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    convertif()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created convertif.toml"))
        .stdout(predicate::str::contains("Created sheets/example.toml"));

    assert!(dir.path().join("convertif.toml").exists());
    assert!(dir.path().join("sheets/example.toml").exists());

    // The generated sheet is valid and gradeable.
    convertif()
        .current_dir(dir.path())
        .args(["validate", "--sheet", "sheets/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All answer sheets valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    convertif()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    convertif()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    convertif()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit conversion answer grader"));
}

#[test]
fn version_output() {
    convertif()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("convertif"));
}
