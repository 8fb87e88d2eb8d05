use std::process::ExitCode;

use region_splice::cli::{self, JSON, VERBOSE};
use region_splice::{patch, telemetry};

fn main() -> ExitCode {
    let command = cli::build();
    let matches = command.get_matches();

    if let Err(e) = telemetry::initialise(matches.get_flag(VERBOSE)) {
        eprintln!("{e}");
    }

    let request = match cli::request_from(&matches) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = match patch::run(&request) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if matches.get_flag(JSON) {
        match outcome.report.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else if request.dry_run {
        match patch::changes_summary(&outcome.report) {
            Ok(summary) => println!("{summary}"),
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }

    match &outcome.written_to {
        Some(path) => eprintln!("Splice applied successfully to {}.", path.display()),
        None => eprintln!("Dry run completed successfully."),
    }
    ExitCode::SUCCESS
}
