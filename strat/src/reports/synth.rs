use std::path::PathBuf;

use stratus_graph::Document;

use super::{
    Diagnostics,
    check::plural,
    output::{Output, Report},
};

/// Result of synthesizing a stack.
#[derive(Debug)]
pub struct SynthReport {
    /// The document, absent when synthesis failed.
    pub document: Option<Document>,
    /// Where the document was written, if not to stdout.
    pub written_to: Option<PathBuf>,
    pub diagnostics: Diagnostics,
}

impl SynthReport {
    pub fn is_success(&self) -> bool {
        self.document.is_some() && !self.diagnostics.has_errors()
    }
}

impl Report for SynthReport {
    fn render(&self, out: &mut dyn Output) {
        self.diagnostics.render(out);

        let (Some(document), Some(path)) = (&self.document, &self.written_to) else {
            return;
        };

        out.preformatted(&format!("Synthesized {}", path.display()));
        out.added_item(&format!(
            "{} resource{}",
            document.resources.len(),
            plural(document.resources.len())
        ));
        out.added_item(&format!(
            "{} resolver{}",
            document.resolvers.len(),
            plural(document.resolvers.len())
        ));
    }
}
