use std::process::ExitCode;

use stepflow::{load_env_file, FlowRegistry, Settings, Shell, StdConsole};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let env_file_problem = load_env_file();
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("stepflow: {e}");
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|e| {
        eprintln!("stepflow: ignoring log filter '{}': {e}", settings.log_filter);
        EnvFilter::new("warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(e) = env_file_problem {
        warn!("Ignoring .env file: {e}");
    }

    info!("Starting with files resolved against {}", settings.base_dir.display());
    let mut shell = Shell::new(settings, FlowRegistry::new());
    let mut console = StdConsole::new();
    match shell.run(&mut console) {
        Ok(()) => {
            info!("Exiting with {} flows in memory", shell.registry().len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("stepflow: {e}");
            ExitCode::FAILURE
        }
    }
}
