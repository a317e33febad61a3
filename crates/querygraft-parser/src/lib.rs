//! Lexing and parsing for GraphQL selection "snippets".
//!
//! A snippet is partial, possibly brace-less selection text: either a full
//! `{ ... }` selection set, or a bare whitespace/comma-separated sequence of
//! sibling selections. Snippets are the textual currency of incremental
//! query construction, where many independent modules each contribute a few
//! fields to one shared operation before it is rendered.
//!
//! Full GraphQL documents are deliberately rejected: input whose first name
//! token is `query`, `mutation`, `subscription`, or `fragment` fails with a
//! [`SnippetParseErrorKind::DocumentNotSnippet`] error rather than being
//! parsed into a wrong tree.
//!
//! Parsing is fail-fast: the first lexer or parser error aborts the whole
//! snippet with no partial results.
//!
//! ```rust
//! use querygraft_parser::parse_snippet;
//!
//! let selections = parse_snippet("user(id: $id) { name email }").unwrap();
//! assert_eq!(selections.len(), 1);
//! ```

pub mod ast;
mod lexer;
mod snippet_parse_error;
mod snippet_parse_error_kind;
mod snippet_parser;
mod source_position;
mod source_span;
mod string_decode_error;
pub mod token;
mod token_stream;

pub use lexer::SnippetLexer;
pub use snippet_parse_error::SnippetParseError;
pub use snippet_parse_error_kind::SnippetParseErrorKind;
pub use snippet_parser::SnippetParser;
pub use snippet_parser::parse_snippet;
pub use source_position::SourcePosition;
pub use source_span::SourceSpan;
pub use string_decode_error::StringDecodeError;
pub use token_stream::SnippetTokenStream;
