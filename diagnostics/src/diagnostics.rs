pub use codespan_reporting::diagnostic::{LabelStyle, Severity};
use codespan_reporting::diagnostic::{Diagnostic as CodespanDiagnostic, Label as CodespanLabel};
use codespan_reporting::files::{Error as FilesError, SimpleFile};
use codespan_reporting::term::termcolor::{NoColor, WriteColor};
use codespan_reporting::term::{emit, Config};
use syntax::SourceSpan;

use std::fmt;

// These diagnostic interfaces implement the same API as the codespan_reporting crate, except
// Label, which is located by a line/column span instead of a file and byte range.

#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub message: String,
    pub labels: Vec<Label>,
    severity: Severity,
}

impl Diagnostic {
    pub fn error() -> Diagnostic {
        Diagnostic {
            message: String::new(),
            labels: vec![],
            severity: Severity::Error,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_labels(mut self, labels: impl Into<Vec<Label>>) -> Self {
        self.labels = labels.into();
        self
    }

    /// The span of the first primary label, if there is one.
    pub fn primary_span(&self) -> Option<SourceSpan> {
        self.labels
            .iter()
            .find(|label| label.style == LabelStyle::Primary)
            .map(|label| label.span)
    }

    /// Convert to a codespan-reporting diagnostic over a single source file.
    pub fn to_codespan(&self, source: &str) -> CodespanDiagnostic<()> {
        CodespanDiagnostic::new(self.severity)
            .with_message(self.message.clone())
            .with_labels(
                self.labels
                    .iter()
                    .map(|label| {
                        CodespanLabel::new(label.style, (), label.span.to_range(source))
                            .with_message(label.message.clone())
                    })
                    .collect(),
            )
    }

    pub fn emit(&self, name: &str, source: &str, writer: &mut dyn WriteColor) -> Result<(), FilesError> {
        let file = SimpleFile::new(name, source);
        let config = Config::default();
        emit(writer, &config, &file, &self.to_codespan(source))
    }

    /// Renders the diagnostic without colors, falling back to the bare
    /// message when the labels do not fit `source`.
    pub fn render(&self, name: &str, source: &str) -> String {
        let mut out = NoColor::new(Vec::new());
        match self.emit(name, source, &mut out) {
            Ok(()) => String::from_utf8_lossy(&out.into_inner()).into_owned(),
            Err(_) => self.to_string(),
        }
    }

}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(span) = self.primary_span() {
            if !span.is_synthetic() {
                write!(f, " ({}:{})", span.start.line, span.start.column)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub style: LabelStyle,
    pub span: SourceSpan,
    pub message: String,
}

impl Label {
    pub fn primary(span: SourceSpan) -> Label {
        Label {
            style: LabelStyle::Primary,
            span,
            message: String::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}
