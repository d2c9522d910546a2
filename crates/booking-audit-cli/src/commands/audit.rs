//! Audit command - run every check and print the report.

use std::path::PathBuf;

use booking_audit::{AuditConfig, Auditor};
use chrono::NaiveDate;

use crate::render;

pub struct AuditArgs {
    pub file: PathBuf,
    pub json: bool,
    pub as_of: Option<String>,
    pub config: Option<PathBuf>,
    pub delimiter: Option<char>,
    pub infer_dates: bool,
}

pub fn run(args: AuditArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let config = build_config(&args)?;
    let report = Auditor::with_config(config).audit_file(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_report(&report));
    }

    Ok(())
}

fn build_config(args: &AuditArgs) -> Result<AuditConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => AuditConfig::from_json_file(path)?,
        None => AuditConfig::default(),
    };

    if let Some(d) = args.delimiter {
        config.parser.delimiter = Some(d);
    }
    if args.infer_dates {
        config.parser.infer_dates = true;
    }
    if let Some(as_of) = &args.as_of {
        // The whole as-of day counts as "not in the future".
        let date = NaiveDate::parse_from_str(as_of, "%Y-%m-%d")
            .map_err(|e| format!("Invalid --as-of date '{}': {}", as_of, e))?;
        let end_of_day = date
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| format!("Invalid --as-of date '{}'", as_of))?;
        config.reference_time = Some(end_of_day);
    }

    config.validate()?;
    Ok(config)
}
