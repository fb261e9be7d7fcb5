use std::path::PathBuf;
use std::process::ExitCode;

use medichat::config::{self, TriageConfig};
use medichat::{DiagnoseRequest, TriageEngine};

/// Optional path to a `TriageConfig` JSON file.
const CONFIG_ENV: &str = "MEDICHAT_CONFIG";

fn main() -> ExitCode {
    medichat::init_tracing();
    tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);

    let triage_config = match std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        Some(path) => match TriageConfig::from_json_file(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => TriageConfig::default(),
    };

    let engine = match TriageEngine::load(&config::data_dir(), triage_config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--symptoms") {
        for symptom in engine.symptoms() {
            println!("{symptom}");
        }
        return ExitCode::SUCCESS;
    }

    let request = DiagnoseRequest::from_text(args.join(" "), 1);
    match engine.diagnose(&request) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        Err(e) if e.is_recoverable() => {
            eprintln!("Enter a valid symptom or disease");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
