//! calbridge CLI entry point.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use calbridge_client::cli::{Cli, Command};
use calbridge_client::commands;
use calbridge_client::error::ClientResult;
use calbridge_core::tracing::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.command.is_serve() {
        TracingConfig::module()
    } else {
        TracingConfig::cli(cli.debug)
    };
    let tracing_config = if cli.debug {
        tracing_config.with_level(tracing::Level::DEBUG)
    } else {
        tracing_config
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    match cli.command {
        Command::Serve {
            socket,
            connection_timeout,
            max_connections,
        } => {
            commands::serve::run(
                socket,
                Duration::from_secs(connection_timeout),
                max_connections,
            )
            .await
        }
        Command::Validate { config } => commands::validate::run(&config),
        Command::Configure { socket, config } => commands::configure::run(socket, &config).await,
        Command::Call {
            socket,
            timeout,
            command,
        } => commands::call::run(socket, timeout, &command).await,
        Command::Ping { socket } => commands::ping::run(socket).await,
    }
}
