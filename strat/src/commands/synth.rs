use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use stratus_manifest::StackToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct SynthCommand {
    /// Path to stack.toml (defaults to ./stack.toml)
    #[arg(short, long, default_value = "stack.toml")]
    pub config: PathBuf,

    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SynthCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = StackToml::open(&self.config)
            .unwrap_or_exit()
            .into_manifest();
        let report = ops::synth(manifest, self.output.as_deref())?;

        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            std::process::exit(1);
        }

        if let (None, Some(document)) = (&report.written_to, &report.document) {
            let json = document
                .to_json_string()
                .wrap_err("failed to render document")?;
            print!("{}", json);
        }

        Ok(())
    }
}
