//! Logging setup using `tracing-subscriber`.
//!
//! - quiet: error
//! - default: warn
//! - `-v`: debug
//! - `-vv`: trace
//!
//! `RUST_LOG` overrides the flags when set.

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub fn init(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet).as_str().to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("taxonomy_core={level},taxonomy={level}")));

    // A second init (tests) is not an error worth reporting
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
