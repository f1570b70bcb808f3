use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut types = Vec::new();

    // Contact types
    types.push(clean_type(Contact::export_to_string()?));
    types.push(clean_type(CreateContactRequest::export_to_string()?));
    types.push(clean_type(UpdateContactRequest::export_to_string()?));

    // Deal types
    types.push(clean_type(DealStage::export_to_string()?));
    types.push(clean_type(Deal::export_to_string()?));
    types.push(clean_type(CreateDealRequest::export_to_string()?));
    types.push(clean_type(UpdateDealRequest::export_to_string()?));

    // Task types
    types.push(clean_type(TaskStatus::export_to_string()?));
    types.push(clean_type(TaskPriority::export_to_string()?));
    types.push(clean_type(Task::export_to_string()?));
    types.push(clean_type(CreateTaskRequest::export_to_string()?));
    types.push(clean_type(UpdateTaskRequest::export_to_string()?));

    // Settings types
    types.push(clean_type(Currency::export_to_string()?));
    types.push(clean_type(Locale::export_to_string()?));
    types.push(clean_type(DateFormat::export_to_string()?));
    types.push(clean_type(DisplaySettings::export_to_string()?));

    // Response bodies
    types.push(clean_type(ErrorResponse::export_to_string()?));
    types.push(clean_type(StatusResponse::export_to_string()?));
    types.push(clean_type(MessageResponse::export_to_string()?));

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("../web/src/api-types"));
    fs::create_dir_all(&output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Deal imports Contact; all types land in one file so imports go.
    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
