use crate::SnippetParseErrorKind;
use crate::SourceSpan;

/// A snippet parse error with location information.
///
/// Raised for malformed snippets: bad characters, unterminated literals,
/// unexpected tokens, unsupported argument values, or a full document
/// disguised as a snippet. The first error aborts the whole parse; there are
/// no partial results.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct SnippetParseError {
    /// Human-readable primary error message.
    message: String,

    /// The span where the error was detected.
    span: SourceSpan,

    /// Categorized error kind for programmatic handling.
    kind: SnippetParseErrorKind,
}

impl SnippetParseError {
    pub fn new(
        message: impl Into<String>,
        span: SourceSpan,
        kind: SnippetParseErrorKind,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
        }
    }

    /// Returns the human-readable error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the span where the error was detected.
    pub fn span(&self) -> &SourceSpan {
        &self.span
    }

    /// Returns the categorized error kind.
    pub fn kind(&self) -> &SnippetParseErrorKind {
        &self.kind
    }

    /// Formats this error as a single-line `line:col: message` summary with
    /// one-indexed coordinates.
    pub fn format_oneline(&self) -> String {
        let line = self.span.start_inclusive.line() + 1;
        let column = self.span.start_inclusive.col() + 1;
        format!("{line}:{column}: {}", self.message)
    }
}
