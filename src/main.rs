//! Landmark Command Line Interface
//!
//! Resolves navigation, threads comments and builds SOQL queries from JSON exports.

use landmark::{cli, Config};
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
