use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use journal_advice::{assess_risk, generate_suggestion};
use journal_core::{Coordinates, EngineConfig, HealthRecord, UserProfile};
use journal_places::{format_distance, ingest_candidates, HospitalDirectory};
use journal_store::{load_profile, load_records, save_profile, save_record, MemoryStore};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(
    name = "journal-cli",
    about = "Summarize a health journal export: risk, suggestions, nearby hospitals."
)]
struct Args {
    /// Path to the JSON export file.
    #[arg(short, long)]
    input: PathBuf,
    /// Disease or specialty to search hospitals for.
    #[arg(short, long, default_value = "general")]
    query: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Could not read file {:?}", args.input))?;
    let export: Value = serde_json::from_str(&data).context("Export is not valid JSON")?;

    // Round-trip through the store the way the browser session does, so the
    // display ordering comes from a reload rather than from file order.
    let mut store = MemoryStore::new();

    if let Some(raw_records) = export.get("records") {
        let records: Vec<HealthRecord> =
            serde_json::from_value(raw_records.clone()).context("Could not read records")?;
        for record in &records {
            save_record(&mut store, record)?;
        }
    }

    if let Some(raw_profile) = export.get("profile") {
        let profile: UserProfile =
            serde_json::from_value(raw_profile.clone()).context("Could not read profile")?;
        let (profile, validation) = profile.sanitize();
        if !validation.is_clean() {
            eprintln!("Profile had implausible measurements; they were dropped.");
        }
        save_profile(&mut store, &profile)?;
    }

    let records = load_records(&store)?;
    let profile = load_profile(&store)?;

    match records.split_first() {
        Some((latest, history)) => {
            let assessment = assess_risk(latest, history);
            let suggestion = generate_suggestion(latest, history, profile.as_ref());

            println!("Risk level: {}", assessment.level.label());
            println!("{}", assessment.message);
            for recommendation in &assessment.recommendations {
                println!("  - {recommendation}");
            }
            println!("\nSuggestions (record {}):", suggestion.record_id);
            for item in &suggestion.items {
                println!("  - {item}");
            }
        }
        None => println!("No check-ins in this export."),
    }

    if let Some(raw_hospitals) = export.get("hospitals") {
        let mut directory = HospitalDirectory::new();
        directory.replace_hospitals(ingest_candidates(raw_hospitals)?);
        directory.set_location(read_location(&export));

        let nearest = directory.nearest_by_query(&args.query, &EngineConfig::default());
        println!("\nNearest hospitals for \"{}\":", args.query);
        if nearest.is_empty() {
            println!("  (no matches)");
        }
        for hospital in nearest {
            println!(
                "  {} - {} ({})",
                hospital.name,
                format_distance(hospital.distance_km.unwrap_or(f64::INFINITY)),
                hospital.phone
            );
        }
    }

    Ok(())
}

fn read_location(export: &Value) -> Option<Coordinates> {
    let location = export.get("location")?;
    Some(Coordinates {
        latitude: location.get("latitude")?.as_f64()?,
        longitude: location.get("longitude")?.as_f64()?,
    })
}
