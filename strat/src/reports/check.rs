//! Check command report.

use std::path::PathBuf;

use super::{
    Diagnostics,
    output::{Output, Report},
};

/// Result of validating a stack.toml.
#[derive(Debug)]
pub struct CheckReport {
    pub config_path: PathBuf,
    pub stack_name: String,
    pub description: Option<String>,
    /// Resources including data sources.
    pub resource_count: usize,
    pub resolver_count: usize,
    pub diagnostics: Diagnostics,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        self.diagnostics.render(out);

        for info in &self.diagnostics.infos {
            out.preformatted(&format!("info: {}", info));
        }

        if self.diagnostics.has_problems() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.preformatted(&format!("  {}", self.stack_name));
        if let Some(desc) = &self.description {
            out.preformatted(&format!("  {}", desc));
        }
        out.preformatted(&format!(
            "  {} resource{}, {} resolver{}",
            self.resource_count,
            plural(self.resource_count),
            self.resolver_count,
            plural(self.resolver_count)
        ));
    }
}

pub(super) fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
