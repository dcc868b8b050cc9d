//! The `convertif init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create convertif.toml
    if std::path::Path::new("convertif.toml").exists() {
        println!("convertif.toml already exists, skipping.");
    } else {
        std::fs::write("convertif.toml", SAMPLE_CONFIG)?;
        println!("Created convertif.toml");
    }

    // Create example answer sheet
    std::fs::create_dir_all("sheets")?;
    let example_path = std::path::Path::new("sheets/example.toml");
    if example_path.exists() {
        println!("sheets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SHEET)?;
        println!("Created sheets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Enter your students' answers in sheets/example.toml");
    println!("  2. Run: convertif validate --sheet sheets/example.toml");
    println!("  3. Run: convertif grade-sheet --sheet sheets/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# convertif configuration

output_dir = "./convertif-results"
format = "text"
fail_on_incorrect = false
# default_category = "temperature"
"#;

const EXAMPLE_SHEET: &str = r#"[sheet]
id = "example"
name = "Example Answer Sheet"
description = "A few conversions to get started"
default_category = "temperature"

[[questions]]
id = "freezing"
student = "Student A"
from = "celsius"
to = "fahrenheit"
value = 0
response = "32"

[[questions]]
id = "absolute"
student = "Student A"
from = "celsius"
to = "kelvin"
value = 0
response = "273"

[[questions]]
id = "milk"
student = "Student B"
category = "volume"
from = "gallon"
to = "liter"
value = 1
response = "3.8"
"#;
