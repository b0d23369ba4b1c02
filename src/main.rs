use app_icon::{IcoBuilder, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `debug` or `app_icon=trace`.
const LOG_ENV: &str = "APP_ICON_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    // build_file checks the imaging capabilities before touching the filesystem.
    match IcoBuilder::new(DEFAULT_INPUT_PATH).build_file(DEFAULT_OUTPUT_PATH) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}
