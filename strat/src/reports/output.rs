//! Output trait for rendering reports.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render it.
pub trait Output {
    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    /// Render a numbered list item.
    fn numbered_item(&mut self, index: usize, text: &str);

    /// Render a bullet list item.
    fn list_item(&mut self, text: &str);

    /// Render an added item (e.g., a written file).
    fn added_item(&mut self, text: &str);

    fn error(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output. Errors and warnings go to stderr, everything else to
/// stdout.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn numbered_item(&mut self, index: usize, text: &str) {
        println!("  {}. {}", index, text);
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {}", text);
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {}", text);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Collects rendered lines for assertions.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Output for RecordingOutput {
    fn section(&mut self, name: &str) {
        self.lines.push(format!("{}:", name));
    }

    fn numbered_item(&mut self, index: usize, text: &str) {
        self.lines.push(format!("  {}. {}", index, text));
    }

    fn list_item(&mut self, text: &str) {
        self.lines.push(format!("  - {}", text));
    }

    fn added_item(&mut self, text: &str) {
        self.lines.push(format!("  + {}", text));
    }

    fn error(&mut self, msg: &str) {
        self.lines.push(format!("error: {}", msg));
    }

    fn warning(&mut self, msg: &str) {
        self.lines.push(format!("warning: {}", msg));
    }

    fn preformatted(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn newline(&mut self) {
        self.lines.push(String::new());
    }
}
