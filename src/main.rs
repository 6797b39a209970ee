//! Ping Monitor - Main CLI Application
//!
//! Probes configurable hosts with the system ping utility, tracks latency
//! over timed runs, and reduces the samples into summary statistics.

use clap::Parser;
use pingmon::{
    app::App,
    cli::Cli,
    error::{AppError, Result},
};
use std::{error::Error, process};

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        eprintln!("Please report this issue with the output above");
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();

    // Handle the actual application logic
    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);

        if let Some(source) = e.source() {
            eprintln!("Caused by: {}", source);
        }

        // Print suggestions for common errors
        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    // Cross-flag checks clap cannot express
    cli.validate().map_err(AppError::validation)?;

    let app = App::new(cli)?;
    app.run().await
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - Duration, interval and timeout must all be positive");
            eprintln!("  - PINGMON_* environment variables override the defaults");
        }
        AppError::Validation(_) => {
            eprintln!();
            eprintln!("Input help:");
            eprintln!("  - Targets are written as NAME=ADDRESS or a bare ADDRESS");
            eprintln!("  - Registry flags (--add, --remove, --list) cannot be combined with a run");
            eprintln!("  - Use --list to see the registered servers");
        }
        AppError::Probe(_) => {
            eprintln!();
            eprintln!("Probe troubleshooting:");
            eprintln!("  - Check that the system ping command is installed and on PATH");
            eprintln!("  - Some systems restrict ICMP; try running with elevated privileges");
            eprintln!("  - Increase the reply wait with --timeout");
        }
        AppError::Storage(_) => {
            eprintln!();
            eprintln!("Storage troubleshooting:");
            eprintln!("  - Check that the data directory exists and is writable");
            eprintln!("  - Point --data-dir (or PINGMON_DATA_DIR) at a writable location");
        }
        _ => {}
    }
}
