use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result, eyre};
use stratus_manifest::Manifest;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct InitCommand {
    /// Stack name (defaults to the current directory's name)
    #[arg(default_value = ".")]
    pub name: String,

    /// Output directory (defaults to ./<name>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let (stack_name, output_dir) = Self::resolve_paths(&self.name, self.output.clone())?;

        // A name that is not a valid identifier surfaces here, pointing at
        // the generated stack.toml
        let content = Manifest::example(&stack_name);
        Manifest::from_str_with_filename(&content, "stack.toml").unwrap_or_exit();

        let report = ops::init(&stack_name, &content, &output_dir)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    fn resolve_paths(name: &str, output: Option<PathBuf>) -> Result<(String, PathBuf)> {
        if name == "." {
            let cwd = std::env::current_dir().wrap_err("failed to get current directory")?;
            let dir_name = cwd
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| eyre!("current directory has no valid name"))?
                .to_string();
            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            Ok((dir_name, output_dir))
        } else {
            let output_dir = output.unwrap_or_else(|| PathBuf::from(name));
            Ok((name.to_string(), output_dir))
        }
    }
}
