//! natspec-config binary entry point.
//! Discovers the config from the current directory, validates it, and
//! prints the effective settings plus selected sources for the linter.

use natspec_config::app;
use natspec_config::config::DiscoveryProvider;
use natspec_config::error::ConfigError;
use natspec_config::output;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Log filter, e.g. `NATSPEC_CONFIG_LOG=debug`.
const LOG_ENV: &str = "NATSPEC_CONFIG_LOG";
/// Output mode: `json` (default) or `human`.
const OUTPUT_ENV: &str = "NATSPEC_CONFIG_OUTPUT";

fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    setup_logging();
    let cwd = match std::env::current_dir() {
        Ok(d) => d,
        Err(source) => {
            let e = ConfigError::Read {
                path: PathBuf::from("."),
                source,
            };
            eprintln!("{}", output::render_error(&e));
            std::process::exit(app::EXIT_CONFIG);
        }
    };
    let mode = std::env::var(OUTPUT_ENV).unwrap_or_else(|_| "json".to_string());
    let code = app::run(
        &DiscoveryProvider::from_env(&cwd),
        &cwd,
        &mode,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    std::process::exit(code);
}
