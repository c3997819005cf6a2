mod cmd;
mod config;
mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::{Cli, Commands};
use error::ServerError;

/// `RUST_LOG` wins; otherwise the scan lifecycle is logged at `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn dispatch(command: Commands) -> Result<(), ServerError> {
    match command {
        Commands::Lambda(args) => cmd::lambda::run(args).await,
        Commands::Serve(args) => cmd::serve::run(args).await,
        Commands::Dump(args) => cmd::dump::run(args).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match dispatch(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "scan-server failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
