//! Response mapping templates.

use std::ops::Range;

use crate::{Placeholder, PlaceholderKind, Result, TemplateSource, placeholder::scan_placeholders};

/// A parsed response mapping template.
///
/// Responses are free-form text; only their placeholders carry meaning.
#[derive(Debug, Clone)]
pub struct ResponseTemplate {
    pub placeholders: Vec<Placeholder>,
}

impl ResponseTemplate {
    pub fn parse(source: &TemplateSource) -> Result<Self> {
        Ok(Self {
            placeholders: scan_placeholders(source)?,
        })
    }

    /// The statement index read by the first indexed result placeholder.
    pub fn statement_index(&self) -> Option<(usize, Range<usize>)> {
        self.placeholders.iter().find_map(|p| {
            p.statement_index().map(|index| (index, p.span.clone()))
        })
    }

    /// Whether the template reads the backend result at all.
    pub fn reads_result(&self) -> bool {
        self.placeholders
            .iter()
            .any(|p| matches!(p.kind, PlaceholderKind::Result { .. }))
    }
}
