//! CLI module for burstcheck
//!
//! Provides the command-line interface for the dispatcher and the server.

/// Dispatcher subcommand
pub mod run;
/// Server subcommand
pub mod serve;

use clap::{Parser, Subcommand};

/// burstcheck - Fire a burst of concurrent health checks at one URL
#[derive(Parser, Debug)]
#[command(name = "burstcheck")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    BURSTCHECK_TARGET        Health check URL (default: https://api.shubhamiitbhu.in/user/health)
    BURSTCHECK_COUNT         Requests per batch (default: 100)
    BURSTCHECK_TIMEOUT_SECS  Per-request timeout (default: none)
    BURSTCHECK_HOST          Server bind address (default: 0.0.0.0)
    BURSTCHECK_PORT          Server listen port (default: 3000)
    BURSTCHECK_DATABASE_URL  Server database URL (default: sqlite:data/burstcheck.db)
    BURSTCHECK_LOG_LEVEL     Log filter (default: info)
    BURSTCHECK_LOG_DIR       Also write JSON logs to this directory

    Deprecated names TARGET_URL, REQUEST_COUNT, TIMEOUT_SECS, RUST_LOG and
    LOG_DIR are still read, with a warning.

EXIT STATUS:
    0  every request succeeded
    1  fatal error
    2  batch completed with at least one failed request
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch one batch of concurrent requests (default)
    Run(run::RunArgs),
    /// Start the health/test server
    Serve(serve::ServeArgs),
}
