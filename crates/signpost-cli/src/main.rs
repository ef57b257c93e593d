//! signpost - CLI for sending messages to a flipdot sign service.
//!
//! This is a thin presentation layer over the `signpost-core` session
//! client and flow state machine; the `run` command walks the login,
//! message, and result phases interactively.

mod cli;
mod commands;
mod output;
mod service_select;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Send(args) => commands::send::run(args).await,
        Commands::Info(args) => commands::info::run(args).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
