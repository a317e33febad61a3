/// Categorized error kinds for [`SnippetParseError`](crate::SnippetParseError).
///
/// Enables tools to pattern-match on error types without parsing messages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SnippetParseErrorKind {
    /// The input is a full GraphQL document (it starts with `query`,
    /// `mutation`, `subscription`, or `fragment`), not a selection snippet.
    DocumentNotSnippet {
        /// The offending leading keyword.
        keyword: String,
    },

    /// A character outside the snippet grammar.
    UnexpectedCharacter,

    /// A string or block-string literal with no closing quote.
    UnterminatedString,

    /// A well-formed token in a position where it is not allowed.
    UnexpectedToken {
        /// What the parser was looking for, e.g. "a field name".
        expected: String,
    },

    /// The input ended mid-construct.
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
    },

    /// A value token outside the argument-value grammar, or a literal that
    /// cannot be interpreted (integer overflow, bad escape sequence).
    UnsupportedValue,

    /// Selection sets nested beyond the parser's recursion limit.
    RecursionDepthExceeded,
}
