//! Accumulated parse/lex errors and caret-annotated snippet rendering.

use crate::location::Location;
use crate::source::SourceFile;
use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::{self, Chars, Config};
use termcolor::Buffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub location: Location,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn error(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// An ordered accumulator of diagnostics recorded during a single parse.
/// Order matters: the CLI reports [`DiagnosticLog::first`] as the primary
/// failure, matching how a recursive-descent parser naturally encounters
/// the earliest relevant error before its recovery pass finds others
/// further downstream.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(message = %diagnostic.message, offset = diagnostic.location.byte_offset, "recorded diagnostic");
        self.diagnostics.push(diagnostic);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

pub type Snippet = String;

impl Location {
    /// Renders a caret-annotated excerpt of `file` around this location.
    /// `width` truncates each rendered line; `context_lines` controls how
    /// many source lines before/after the span are shown; `use_color`
    /// selects ANSI styling for a terminal versus a plain buffer for logs
    /// or files.
    #[must_use]
    pub fn snippet(
        &self,
        file: &SourceFile,
        width: usize,
        context_lines: usize,
        use_color: bool,
    ) -> Snippet {
        let text = String::from_utf8_lossy(file.bytes()).into_owned();
        let cs_file = SimpleFile::new(file.name(), text);

        let start = self.byte_offset as usize;
        let end = self.byte_end().max(self.byte_offset + 1) as usize;
        let diagnostic = CsDiagnostic::error()
            .with_message("parse error")
            .with_labels(vec![Label::primary((), start..end)]);

        let mut config = Config {
            chars: Chars::ascii(),
            ..Config::default()
        };
        config.start_context_lines = context_lines;
        config.end_context_lines = context_lines;

        let mut buffer = if use_color {
            Buffer::ansi()
        } else {
            Buffer::no_color()
        };
        term::emit(&mut buffer, &config, &cs_file, &diagnostic).ok();

        let rendered = String::from_utf8_lossy(buffer.as_slice()).into_owned();
        rendered
            .lines()
            .map(|line| {
                if line.chars().count() > width {
                    let truncated: String = line.chars().take(width).collect();
                    format!("{truncated}…")
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
