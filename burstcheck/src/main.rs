//! burstcheck entry point

use burstcheck::cli::{run::RunArgs, serve, Cli, Commands};
use burstcheck::config::{DispatchConfig, ServerConfig};
use burstcheck::logging;
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Some(Commands::Serve(args)) => match serve::execute(ServerConfig::from(args)).await {
            Ok(()) => 0,
            Err(e) => {
                tracing::error!("Server error: {:#}", e);
                1
            }
        },
        Some(Commands::Run(args)) => dispatch(DispatchConfig::try_from(&args), args.json).await,
        // No subcommand - same as `run` without flags
        None => dispatch(DispatchConfig::try_from(&RunArgs::default()), false).await,
    };

    // Flush file logs before exiting.
    drop(guard);
    std::process::exit(code);
}

async fn dispatch(
    config: Result<DispatchConfig, burstcheck::config::ConfigError>,
    json: bool,
) -> i32 {
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return 1;
        }
    };

    match burstcheck::cli::run::execute(config, json).await {
        Ok(status) => status.exit_code(),
        Err(e) => {
            tracing::error!("Error in API calls: {:#}", e);
            1
        }
    }
}
