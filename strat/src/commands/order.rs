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
pub struct OrderCommand {
    /// Path to stack.toml (defaults to ./stack.toml)
    #[arg(short, long, default_value = "stack.toml")]
    pub config: PathBuf,
}

impl OrderCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = StackToml::open(&self.config)
            .unwrap_or_exit()
            .into_manifest();

        let mut out = TerminalOutput::new();
        match ops::order(manifest) {
            Ok(report) => report.render(&mut out),
            Err(diagnostics) => {
                diagnostics.render(&mut out);
                std::process::exit(1);
            }
        }
        Ok(())
    }
}
