//! The `convertif validate` command.

use std::path::PathBuf;

use anyhow::Result;

use convertif_core::config::load_config_from;
use convertif_core::parser::{load_sheets, validate_answer_sheet};

pub fn execute(sheet_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut sheets = load_sheets(&sheet_path)?;
    for sheet in &mut sheets {
        sheet.inherit_default_category(config.default_category);
    }

    let mut total_warnings = 0;

    for sheet in &sheets {
        println!("Answer sheet: {} ({} questions)", sheet.name, sheet.questions.len());

        let warnings = validate_answer_sheet(sheet);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All answer sheets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
