//! Validate command - check a submission against a checklist.

use colored::Colorize;
use checklisttools::{
    ReaderConfig, SubmissionOutcome, SubmissionValidator, ValidationReport, ValidatorConfig,
};
use tracing::info;

use crate::cli::Cli;

pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = ValidatorConfig {
        reader: ReaderConfig {
            units_marker: cli.units_marker,
            null_values: cli.na_values,
            ..Default::default()
        },
    };

    let validator = SubmissionValidator::with_config(config);
    let outcome = validator.validate_file(&cli.checklist_file, &cli.samples_file)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    if let Some(output) = cli.output_file {
        if outcome.samples.is_valid() {
            info!("no samples failures, skipping {}", output.display());
        } else {
            outcome.samples.write_tsv(&output)?;
            if !cli.json {
                println!(
                    "{} \"{}\"",
                    "Validation failures saved to file".green().bold(),
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &SubmissionOutcome) {
    for report in outcome.reports() {
        if report.is_valid() {
            println!(
                "{} {} table has no validation errors",
                "OK".green().bold(),
                report.table
            );
        } else {
            print_report(report);
        }
    }

    if outcome.has_failures() {
        println!();
        println!(
            "Found {} validation errors ({} units, {} samples)",
            outcome.total_failures().to_string().white().bold(),
            outcome.units.failure_count().to_string().yellow(),
            outcome.samples.failure_count().to_string().red()
        );
    }
}

fn print_report(report: &ValidationReport) {
    let title = report.title();
    println!();
    println!("{}", title.red().bold());
    println!("{}", "=".repeat(title.len()).red());
    println!();
    println!(
        "Checklist: {} ({})",
        report.checklist_name.cyan(),
        report.checklist_id
    );
    println!();
    print!("{}", report.render_details());
}
