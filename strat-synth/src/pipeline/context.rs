//! Synthesis context passed through pipeline phases.

use eyre::{Result, eyre};
use stratus_graph::{Document, ResourceGraph};
use stratus_ir::ResourceId;
use stratus_manifest::Manifest;

use super::diagnostic::Diagnostic;

/// State of a synthesis run, filled in phase by phase.
#[derive(Debug)]
pub struct SynthesisContext {
    /// The manifest being synthesized.
    pub manifest: Manifest,
    /// The resource graph (populated by LowerPhase).
    pub graph: Option<ResourceGraph>,
    /// Resource ids in apply order (populated by OrderPhase).
    pub apply_order: Option<Vec<ResourceId>>,
    /// The rendered document (populated by EmitPhase).
    pub document: Option<Document>,
    /// Diagnostics collected so far.
    pub diagnostics: Vec<Diagnostic>,
}

impl SynthesisContext {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            graph: None,
            apply_order: None,
            document: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// The resource graph, if LowerPhase has run.
    pub fn graph(&self) -> Result<&ResourceGraph> {
        self.graph
            .as_ref()
            .ok_or_else(|| eyre!("resource graph not built - did LowerPhase run?"))
    }

    pub fn graph_mut(&mut self) -> Result<&mut ResourceGraph> {
        self.graph
            .as_mut()
            .ok_or_else(|| eyre!("resource graph not built - did LowerPhase run?"))
    }

    /// The apply order, if OrderPhase has run.
    pub fn apply_order(&self) -> Result<&[ResourceId]> {
        self.apply_order
            .as_deref()
            .ok_or_else(|| eyre!("apply order not computed - did OrderPhase run?"))
    }

    /// The document, if EmitPhase has run.
    pub fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| eyre!("document not emitted - did EmitPhase run?"))
    }
}
