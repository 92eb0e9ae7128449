//! Placard CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use placard_cli::{Args, error_adapter::to_reportables};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = args.log_level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", args.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Placard");
    debug!(args:?; "Parsed arguments");

    let Err(err) = placard_cli::run(&args) else {
        info!("Completed successfully");
        return ExitCode::SUCCESS;
    };

    let reporter = miette::GraphicalReportHandler::new();
    for reportable in to_reportables(&err) {
        let mut report = String::new();
        if reporter.render_report(&mut report, &reportable).is_err() {
            report = reportable.to_string();
        }
        error!("{report}");
    }

    ExitCode::FAILURE
}
