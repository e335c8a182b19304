use std::fs;
use std::path::PathBuf;

use case_intake::config::AppConfig;
use case_intake::error::AppError;
use case_intake::telemetry;
use case_intake::workflows::family_case::{
    navigator, rules, submission, FamilyCaseRecord, WizardStep,
};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "case-intake",
    about = "Inspect a family case record against the registration wizard rules",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report branch conditions and per-step validity for a record file
    Validate(RecordArgs),
    /// Preview the server-bound payload built from a record file
    Payload(RecordArgs),
}

#[derive(Args, Debug)]
struct RecordArgs {
    /// Flat JSON record (field name -> value, dates in DD-MM-YYYY form)
    #[arg(long)]
    record: PathBuf,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Payload(args) => run_payload(args),
    }
}

fn load_record(path: &PathBuf) -> Result<FamilyCaseRecord, AppError> {
    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;

    let mut record = FamilyCaseRecord::default();
    if let Some(object) = value.as_object() {
        for (name, entry) in object {
            if let Some(text) = entry.as_str() {
                record.set_field(name, text);
            }
        }
    }
    info!(path = %path.display(), "record loaded");
    Ok(record)
}

fn run_validate(args: RecordArgs) -> Result<(), AppError> {
    let record = load_record(&args.record)?;
    let conditions = record.conditions();

    println!("Family case record check");
    println!(
        "Status: {}",
        record
            .status()
            .map(|status| status.label())
            .unwrap_or("(not set)")
    );
    println!(
        "Branches: father deceased={}, mother deceased={}, guardian required={}, extended tier={}",
        conditions.father_deceased,
        conditions.mother_deceased,
        conditions.guardian_required,
        conditions.extended_tier
    );

    println!("\nStep validity");
    let mut first_blocked = None;
    for step in WizardStep::ordered() {
        if step == WizardStep::Guardian && !conditions.guardian_required {
            println!("- {}: skipped", step.label());
            continue;
        }
        let valid = rules::is_step_valid(step, &record);
        println!("- {}: {}", step.label(), if valid { "ok" } else { "incomplete" });
        if !valid && first_blocked.is_none() {
            first_blocked = Some(step);
        }
    }

    match first_blocked {
        Some(step) => println!("\nFirst blocked step: {}", step.label()),
        None => match navigator::next(WizardStep::Household, &record) {
            Ok(_) => println!("\nAll steps complete; record is ready to submit"),
            Err(err) => println!("\nNavigation check failed: {err}"),
        },
    }

    Ok(())
}

fn run_payload(args: RecordArgs) -> Result<(), AppError> {
    let record = load_record(&args.record)?;
    let payload = submission::build_payload(&record);

    println!("Submission payload preview");
    for (name, value) in &payload.fields {
        println!("- {name}: {value}");
    }

    match &payload.photo {
        Some(part) => println!(
            "\nPhoto part: {} ({}, {})",
            part.file_name, part.content_type, part.uri
        ),
        None => println!("\nPhoto part: none (empty or already persisted remotely)"),
    }

    Ok(())
}
