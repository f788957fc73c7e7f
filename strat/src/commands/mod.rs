mod check;
mod completions;
mod init;
mod order;
mod synth;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use init::InitCommand;
use order::OrderCommand;
use synth::SynthCommand;

use crate::logging::LogLevel;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for stratus_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "strat")]
#[command(version)]
#[command(about = "Synthesize infrastructure documents from a stack.toml")]
pub(crate) struct Cli {
    /// Log level for debugging (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value = "off")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Synth(cmd) => cmd.run(),
            Commands::Order(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an example stack.toml
    Init(InitCommand),

    /// Validate stack.toml without writing a document
    Check(CheckCommand),

    /// Synthesize the resource document
    Synth(SynthCommand),

    /// Print the order resources are applied in
    Order(OrderCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
