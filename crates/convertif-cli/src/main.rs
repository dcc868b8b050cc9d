//! convertif CLI: grade unit-conversion answers from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "convertif", version, about = "Unit conversion answer grader")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a single student response
    Grade {
        /// Conversion category (temperature, volume)
        #[arg(long)]
        category: String,

        /// Unit the measured value is expressed in
        #[arg(long = "from")]
        source_unit: String,

        /// Unit the student converted to
        #[arg(long = "to")]
        target_unit: String,

        /// The measured value
        #[arg(long, allow_negative_numbers = true)]
        value: f64,

        /// The student's response, as written
        #[arg(long, allow_hyphen_values = true)]
        response: String,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// Grade every question of an answer sheet
    GradeSheet {
        /// Path to .toml answer sheet or directory
        #[arg(long)]
        sheet: PathBuf,

        /// Output directory (default: from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json, markdown, all (default: from config)
        #[arg(long)]
        format: Option<String>,

        /// Only grade questions answered by this student
        #[arg(long)]
        student: Option<String>,

        /// Only grade questions carrying one of these tags (comma-separated)
        #[arg(long)]
        filter: Option<String>,

        /// Exit code 1 if any answer is incorrect
        #[arg(long)]
        fail_on_incorrect: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate answer sheet TOML files
    Validate {
        /// Path to answer sheet file or directory
        #[arg(long)]
        sheet: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List conversion categories and their units
    Units {
        /// Only list units of this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Create starter config and example answer sheet
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("convertif=info".parse().expect("static directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            category,
            source_unit,
            target_unit,
            value,
            response,
            json,
        } => commands::grade::execute(category, source_unit, target_unit, value, response, json),
        Commands::GradeSheet {
            sheet,
            output,
            format,
            student,
            filter,
            fail_on_incorrect,
            config,
        } => commands::grade_sheet::execute(
            sheet,
            output,
            format,
            student,
            filter,
            fail_on_incorrect,
            config,
        ),
        Commands::Validate { sheet, config } => commands::validate::execute(sheet, config),
        Commands::Units { category } => commands::units::execute(category),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
