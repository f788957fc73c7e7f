use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use stratus_manifest::StackToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to stack.toml (defaults to ./stack.toml)
    #[arg(short, long, default_value = "stack.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let stack = StackToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(&stack);

        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
