use stratus_synth::pipeline::{Diagnostic, Severity};

use super::output::{Output, Report};

/// Pipeline diagnostics, formatted and split by severity.
#[derive(Debug, Default)]
pub struct Diagnostics {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
}

impl Diagnostics {
    pub fn collect(diagnostics: &[Diagnostic]) -> Self {
        let mut collected = Self::default();
        for diag in diagnostics {
            let mut msg = diag.message.clone();
            if let Some(loc) = &diag.location {
                msg.push_str(&format!("\n  --> {}", loc));
            }
            if let Some(help) = &diag.help {
                msg.push_str(&format!("\n  help: {}", help));
            }

            match diag.severity {
                Severity::Error => collected.errors.push(msg),
                Severity::Warning => collected.warnings.push(msg),
                Severity::Info => collected.infos.push(msg),
            }
        }
        collected
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether anything was written to stderr.
    pub fn has_problems(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }
}

impl Report for Diagnostics {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
    }
}
