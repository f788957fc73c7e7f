//! Diagnostics collected while synthesizing a stack.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// A problem that prevents synthesis.
    Error,
    /// Suspicious but synthesizable.
    Warning,
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A message produced by a pipeline phase.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: String,
    pub message: String,
    /// Where in the manifest the problem is (e.g., "resolvers.Query.getDemos").
    pub location: Option<String>,
    /// How to fix it, if known.
    pub help: Option<String>,
}

impl Diagnostic {
    fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            message: message.into(),
            location: None,
            help: None,
        }
    }

    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let diag = Diagnostic::warning("validate", "data source 'rds' is never used")
            .at("data_sources.rds");
        assert_eq!(
            diag.to_string(),
            "warning: data source 'rds' is never used (at data_sources.rds)"
        );
    }

    #[test]
    fn test_severity() {
        assert!(Diagnostic::error("lower", "boom").severity.is_error());
        assert!(!Diagnostic::info("lower", "fine").severity.is_warning());
        assert_eq!(Severity::Info.to_string(), "info");
    }
}
