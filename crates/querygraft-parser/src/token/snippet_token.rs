use crate::SourceSpan;
use crate::token::SnippetTokenKind;

/// A single lexed token plus its span within the snippet source.
///
/// The `'src` lifetime ties borrowed token text to the source string; the
/// lexer is zero-copy, so names, numbers, and raw string literals are slices
/// of the input.
#[derive(Clone, Debug, PartialEq)]
pub struct SnippetToken<'src> {
    pub kind: SnippetTokenKind<'src>,
    pub span: SourceSpan,
}

impl<'src> SnippetToken<'src> {
    pub fn new(kind: SnippetTokenKind<'src>, span: SourceSpan) -> Self {
        Self { kind, span }
    }
}
