//! The `convertif grade` command.

use anyhow::Result;

use convertif_core::grading::{grade, GradingRequest};

pub fn execute(
    category: String,
    source_unit: String,
    target_unit: String,
    value: f64,
    response: String,
    json: bool,
) -> Result<()> {
    let request = GradingRequest::new(category, source_unit, target_unit, value, response);
    let result = grade(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{result}");
    if let Some(answer) = result.correct_answer() {
        println!("Correct answer is {answer}");
    }

    Ok(())
}
