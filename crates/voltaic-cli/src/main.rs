//! Voltaic CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use voltaic_cli::{Args, error_adapter::to_reportables};

fn main() {
    // Panics should come out as miette reports too
    miette::set_panic_hook();

    let args = Args::parse();

    // An unknown level falls back to warn instead of aborting the render
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Voltaic");
    debug!(args:?; "Parsed arguments");

    // Netlist in, schematic (or layout JSON) out
    if let Err(err) = voltaic_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();

        // One report per diagnostic; plain Display if the graphical render fails
        for reportable in to_reportables(&err) {
            let mut writer = String::new();
            if reporter.render_report(&mut writer, &reportable).is_err() {
                writer = reportable.to_string();
            }

            error!("{writer}");
        }

        process::exit(1);
    }

    info!("Completed successfully");
}
