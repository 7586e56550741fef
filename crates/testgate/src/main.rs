//! testgate: CI gate for automation test logs
//!
//! Usage: `testgate <LOG_PATH> <BUILD_ID>`. Prints one line per test result
//! and exits with the build verdict: 0 all passed, 1 failures, 2 no tests
//! found, negative for usage and environment errors.

use clap::Parser;
use clap::error::ErrorKind;
use tracing::{Level, error};

use testgate::config::Config;
use testgate::gate;
use testgate_results::verdict::USAGE_ERROR_EXIT_CODE;

/// Initialize the tracing subscriber
///
/// Logs go to stderr; stdout is reserved for test results.
fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    // clap's own exit status 2 would read as "no tests found"
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                if let Err(print_err) = err.print() {
                    init_tracing(Level::ERROR);
                    error!(error = %print_err, usage = %err, "failed to print usage error");
                }
                std::process::exit(USAGE_ERROR_EXIT_CODE);
            }
        },
    };

    init_tracing(config.log_level());

    let result = gate::run(&config);
    if let Err(ref e) = result {
        error!(error = %e, "testgate failed");
    }
    std::process::exit(gate::exit_code(&result));
}
