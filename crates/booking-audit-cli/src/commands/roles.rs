//! Roles command - show how column names are classified.

use std::path::PathBuf;

use booking_audit::{Parser, classify};
use colored::Colorize;

pub fn run(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (table, source) = Parser::new().load_file(&file)?;
    let hints = classify(table.column_names());

    println!(
        "{} {}",
        "Column roles for".cyan().bold(),
        source.file.white()
    );
    println!();

    for column in table.columns() {
        let roles = hints
            .roles(&column.name)
            .filter(|r| !r.is_empty())
            .map(|r| {
                r.iter()
                    .map(|role| role.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:30} {:10} {}",
            column.name,
            column.column_type.to_string(),
            roles.yellow()
        );
    }

    Ok(())
}
