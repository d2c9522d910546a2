//! booking-audit CLI - data quality report for booking records.

mod cli;
mod commands;
mod render;

use clap::Parser;
use cli::{Cli, Commands};
use tracing::Level;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let result = match cli.command {
        Commands::Audit {
            file,
            json,
            as_of,
            config,
            delimiter,
            infer_dates,
        } => commands::audit::run(commands::audit::AuditArgs {
            file,
            json,
            as_of,
            config,
            delimiter,
            infer_dates,
        }),

        Commands::Roles { file } => commands::roles::run(file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
