use std::path::{Path, PathBuf};

use super::output::{Output, Report};

/// Result of creating an example stack.
#[derive(Debug)]
pub struct InitReport {
    pub stack_name: String,
    pub output_dir: PathBuf,
    /// The written stack.toml.
    pub config_path: PathBuf,
}

impl Report for InitReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("Created stack '{}'", self.stack_name));
        out.added_item(&self.config_path.display().to_string());
        out.newline();

        out.section("Next steps");
        if self.output_dir != Path::new(".") {
            out.list_item(&format!("cd {}", self.output_dir.display()));
        }
        out.list_item("strat check");
        out.list_item("strat synth -o stack.json");
    }
}
