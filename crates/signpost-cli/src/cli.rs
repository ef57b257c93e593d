//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands;

/// CLI for sending messages to a flipdot sign service.
#[derive(Parser, Debug)]
#[command(name = "signpost")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive session: log in, compose messages, review outcomes
    Run(commands::run::RunArgs),

    /// Authenticate and send a single message
    Send(commands::send::SendArgs),

    /// Show information about the connected signs
    Info(commands::info::InfoArgs),
}
