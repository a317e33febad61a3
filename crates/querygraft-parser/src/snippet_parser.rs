//! Recursive-descent parser for the snippet grammar.
//!
//! ```text
//! snippet      := selectionSet | selection+
//! selection    := spread | field
//! spread       := '...' NAME | '...' 'on' NAME directives? selectionSet
//! field        := (alias ':')? NAME args? directives? selectionSet?
//! args         := '(' (NAME ':' value)* ')'
//! value        := '$' NAME | STRING | NUMBER | 'true' | 'false' | 'null'
//!               | NAME | '[' value* ']' | '{' (NAME ':' value)* '}'
//! directives   := ('@' NAME args?)*
//! ```
//!
//! The parser is fail-fast: the first error aborts the whole snippet. Input
//! that begins with a document keyword (`query`, `mutation`, `subscription`,
//! `fragment`) is rejected up front so a full document is never silently
//! parsed into a wrong sibling list.

use crate::SnippetParseError;
use crate::SnippetParseErrorKind;
use crate::SnippetTokenStream;
use crate::SourcePosition;
use crate::SourceSpan;
use crate::StringDecodeError;
use crate::ast::ArgValue;
use crate::ast::Directive;
use crate::ast::FieldNode;
use crate::ast::FragmentSpread;
use crate::ast::InlineFragment;
use crate::ast::Selection;
use crate::token::SnippetToken;
use crate::token::SnippetTokenKind;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, SnippetParseError>;

/// Keywords that can only start a full GraphQL document.
const DOCUMENT_KEYWORDS: [&str; 4] = ["query", "mutation", "subscription", "fragment"];

/// Nesting limit shared by selection sets and list/object values.
const MAX_RECURSION_DEPTH: usize = 128;

/// Parses a selection snippet into an ordered sibling list.
///
/// Accepts either a full `{ ... }` selection set or a bare sequence of one
/// or more sibling selections.
pub fn parse_snippet(source: &str) -> Result<Vec<Selection>> {
    SnippetParser::new(source).parse()
}

/// The recursive-descent snippet parser. Most callers want the
/// [`parse_snippet`] convenience function.
pub struct SnippetParser<'src> {
    tokens: SnippetTokenStream<'src>,
    recursion_depth: usize,
}

impl<'src> SnippetParser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            tokens: SnippetTokenStream::new(source),
            recursion_depth: 0,
        }
    }

    /// Consumes the parser and produces the snippet's sibling list.
    pub fn parse(mut self) -> Result<Vec<Selection>> {
        self.reject_document_keyword()?;

        let selections = if self.peek_is(&SnippetTokenKind::CurlyBraceOpen) {
            self.parse_selection_set()?
        } else {
            if self.tokens.is_at_end() {
                let span = self.peek_span();
                return Err(SnippetParseError::new(
                    "expected a selection, found end of input",
                    span,
                    SnippetParseErrorKind::UnexpectedEndOfInput {
                        expected: "a selection".to_string(),
                    },
                ));
            }
            let mut selections = Vec::new();
            while !self.tokens.is_at_end() {
                selections.push(self.parse_selection()?);
            }
            selections
        };

        self.expect_eof()?;
        Ok(selections)
    }

    /// Fails with a distinguishable error if the input is a full document
    /// rather than a snippet.
    fn reject_document_keyword(&mut self) -> Result<()> {
        if let Some(token) = self.tokens.peek()
            && let SnippetTokenKind::Name(name) = token.kind
            && DOCUMENT_KEYWORDS.contains(&name)
        {
            return Err(SnippetParseError::new(
                format!(
                    "`{name}` begins a full GraphQL document; expected a selection snippet"
                ),
                token.span,
                SnippetParseErrorKind::DocumentNotSnippet {
                    keyword: name.to_string(),
                },
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Selections
    // =========================================================================

    /// Parses `{ ... }`. An empty `{ }` yields an empty sibling list, which
    /// keeps rendered empty operations re-parseable.
    fn parse_selection_set(&mut self) -> Result<Vec<Selection>> {
        self.enter_recursion()?;
        let result = self.parse_selection_set_impl();
        self.exit_recursion();
        result
    }

    fn parse_selection_set_impl(&mut self) -> Result<Vec<Selection>> {
        let open = self.expect(&SnippetTokenKind::CurlyBraceOpen, "`{`")?;

        let mut selections = Vec::new();
        loop {
            if self.peek_is(&SnippetTokenKind::CurlyBraceClose) {
                break;
            }
            if self.tokens.is_at_end() {
                return Err(SnippetParseError::new(
                    "unclosed `{`",
                    open.span,
                    SnippetParseErrorKind::UnexpectedEndOfInput {
                        expected: "`}`".to_string(),
                    },
                ));
            }
            selections.push(self.parse_selection()?);
        }

        self.expect(&SnippetTokenKind::CurlyBraceClose, "`}`")?;
        Ok(selections)
    }

    /// Parses a single selection (field, fragment spread, or inline
    /// fragment).
    fn parse_selection(&mut self) -> Result<Selection> {
        if self.peek_is(&SnippetTokenKind::Ellipsis) {
            self.expect(&SnippetTokenKind::Ellipsis, "`...`")?;
            if self.peek_is_name("on") {
                self.parse_inline_fragment()
            } else {
                self.parse_fragment_spread()
            }
        } else {
            self.parse_field().map(Selection::Field)
        }
    }

    /// Parses a field: `alias: name(args) @directives { selections }`.
    fn parse_field(&mut self) -> Result<FieldNode> {
        let first_name = self.expect_name("a field name")?;

        let (alias, name) = if self.peek_is(&SnippetTokenKind::Colon) {
            self.expect(&SnippetTokenKind::Colon, "`:`")?;
            let field_name = self.expect_name("a field name after the alias")?;
            (Some(first_name.to_string()), field_name.to_string())
        } else {
            (None, first_name.to_string())
        };

        let arguments = if self.peek_is(&SnippetTokenKind::ParenOpen) {
            self.parse_arguments()?
        } else {
            IndexMap::new()
        };

        let directives = self.parse_directives()?;

        let selection_set = if self.peek_is(&SnippetTokenKind::CurlyBraceOpen) {
            self.parse_selection_set()?
        } else {
            Vec::new()
        };

        Ok(FieldNode {
            name,
            alias,
            arguments,
            directives,
            selection_set,
        })
    }

    /// Parses `...Name` (the `...` has already been consumed).
    fn parse_fragment_spread(&mut self) -> Result<Selection> {
        let name = self.expect_name("a fragment name after `...`")?;
        Ok(Selection::FragmentSpread(FragmentSpread::new(name)))
    }

    /// Parses `... on Type @directives { selections }` (the `...` has
    /// already been consumed).
    fn parse_inline_fragment(&mut self) -> Result<Selection> {
        self.expect_name("`on`")?; // the `on` keyword
        let on_type = self.expect_name("a type name after `on`")?;
        let directives = self.parse_directives()?;
        let selection_set = self.parse_selection_set()?;

        Ok(Selection::InlineFragment(InlineFragment {
            on_type: on_type.to_string(),
            directives,
            selection_set,
        }))
    }

    // =========================================================================
    // Arguments, directives, values
    // =========================================================================

    /// Parses `( name: value ... )`. A repeated argument name keeps the last
    /// value.
    fn parse_arguments(&mut self) -> Result<IndexMap<String, ArgValue>> {
        let open = self.expect(&SnippetTokenKind::ParenOpen, "`(`")?;

        let mut arguments = IndexMap::new();
        loop {
            if self.peek_is(&SnippetTokenKind::ParenClose) {
                break;
            }
            if self.tokens.is_at_end() {
                return Err(SnippetParseError::new(
                    "unclosed `(`",
                    open.span,
                    SnippetParseErrorKind::UnexpectedEndOfInput {
                        expected: "`)`".to_string(),
                    },
                ));
            }
            let name = self.expect_name("an argument name")?;
            self.expect(&SnippetTokenKind::Colon, "`:` after the argument name")?;
            let value = self.parse_value()?;
            arguments.insert(name.to_string(), value);
        }

        self.expect(&SnippetTokenKind::ParenClose, "`)`")?;
        Ok(arguments)
    }

    /// Parses `(@ NAME args?)*`.
    fn parse_directives(&mut self) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();
        while self.peek_is(&SnippetTokenKind::At) {
            self.expect(&SnippetTokenKind::At, "`@`")?;
            let name = self.expect_name("a directive name")?;
            let arguments = if self.peek_is(&SnippetTokenKind::ParenOpen) {
                self.parse_arguments()?
            } else {
                IndexMap::new()
            };
            directives.push(Directive::with_arguments(name, arguments));
        }
        Ok(directives)
    }

    /// Parses one argument value.
    fn parse_value(&mut self) -> Result<ArgValue> {
        self.enter_recursion()?;
        let result = self.parse_value_impl();
        self.exit_recursion();
        result
    }

    fn parse_value_impl(&mut self) -> Result<ArgValue> {
        let token = self.next_token();
        match token.kind {
            SnippetTokenKind::Dollar => {
                let name = self.expect_name("a variable name after `$`")?;
                Ok(ArgValue::Variable(name.to_string()))
            }

            SnippetTokenKind::StringValue(_) => {
                // decode_string_value() is Some for StringValue by
                // construction.
                match token.kind.decode_string_value() {
                    Some(Ok(content)) => Ok(ArgValue::String(content)),
                    Some(Err(decode_error)) => {
                        let kind = match decode_error {
                            StringDecodeError::UnterminatedString => {
                                SnippetParseErrorKind::UnterminatedString
                            }
                            StringDecodeError::InvalidEscapeSequence(_)
                            | StringDecodeError::InvalidUnicodeEscape(_) => {
                                SnippetParseErrorKind::UnsupportedValue
                            }
                        };
                        Err(SnippetParseError::new(
                            decode_error.to_string(),
                            token.span,
                            kind,
                        ))
                    }
                    None => unreachable!("StringValue token"),
                }
            }

            SnippetTokenKind::IntValue(raw) => match token.kind.parse_int_value() {
                Some(Ok(value)) => Ok(ArgValue::Int(value)),
                _ => Err(SnippetParseError::new(
                    format!("integer literal `{raw}` is out of range"),
                    token.span,
                    SnippetParseErrorKind::UnsupportedValue,
                )),
            },

            SnippetTokenKind::FloatValue(raw) => match token.kind.parse_float_value() {
                Some(Ok(value)) => Ok(ArgValue::Float(value)),
                _ => Err(SnippetParseError::new(
                    format!("float literal `{raw}` cannot be represented"),
                    token.span,
                    SnippetParseErrorKind::UnsupportedValue,
                )),
            },

            SnippetTokenKind::True => Ok(ArgValue::Boolean(true)),
            SnippetTokenKind::False => Ok(ArgValue::Boolean(false)),
            SnippetTokenKind::Null => Ok(ArgValue::Null),
            SnippetTokenKind::Name(name) => Ok(ArgValue::Enum(name.to_string())),

            SnippetTokenKind::SquareBracketOpen => {
                let mut values = Vec::new();
                loop {
                    if self.peek_is(&SnippetTokenKind::SquareBracketClose) {
                        break;
                    }
                    if self.tokens.is_at_end() {
                        return Err(SnippetParseError::new(
                            "unclosed `[`",
                            token.span,
                            SnippetParseErrorKind::UnexpectedEndOfInput {
                                expected: "`]`".to_string(),
                            },
                        ));
                    }
                    values.push(self.parse_value()?);
                }
                self.expect(&SnippetTokenKind::SquareBracketClose, "`]`")?;
                Ok(ArgValue::List(values))
            }

            SnippetTokenKind::CurlyBraceOpen => {
                let mut object = IndexMap::new();
                loop {
                    if self.peek_is(&SnippetTokenKind::CurlyBraceClose) {
                        break;
                    }
                    if self.tokens.is_at_end() {
                        return Err(SnippetParseError::new(
                            "unclosed `{` in an object value",
                            token.span,
                            SnippetParseErrorKind::UnexpectedEndOfInput {
                                expected: "`}`".to_string(),
                            },
                        ));
                    }
                    let name = self.expect_name("an object field name")?;
                    self.expect(&SnippetTokenKind::Colon, "`:` after the object field name")?;
                    let value = self.parse_value()?;
                    object.insert(name.to_string(), value);
                }
                self.expect(&SnippetTokenKind::CurlyBraceClose, "`}`")?;
                Ok(ArgValue::Object(object))
            }

            SnippetTokenKind::Error { message, kind } => {
                Err(SnippetParseError::new(message, token.span, kind))
            }

            other => Err(SnippetParseError::new(
                format!("{} is not a valid argument value", other.description()),
                token.span,
                SnippetParseErrorKind::UnsupportedValue,
            )),
        }
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn next_token(&mut self) -> SnippetToken<'src> {
        self.tokens.consume().unwrap_or_else(|| {
            SnippetToken::new(
                SnippetTokenKind::Eof,
                SourceSpan::empty(SourcePosition::default()),
            )
        })
    }

    fn peek_is(&mut self, kind: &SnippetTokenKind) -> bool {
        self.tokens.peek().is_some_and(|token| &token.kind == kind)
    }

    fn peek_is_name(&mut self, name: &str) -> bool {
        self.tokens
            .peek()
            .and_then(|token| token.kind.as_name())
            .is_some_and(|token_name| token_name == name)
    }

    fn peek_span(&mut self) -> SourceSpan {
        self.tokens
            .peek()
            .map(|token| token.span)
            .unwrap_or_else(|| SourceSpan::empty(SourcePosition::default()))
    }

    /// Consumes the next token, requiring it to be exactly `kind`.
    fn expect(
        &mut self,
        kind: &SnippetTokenKind,
        expected: &str,
    ) -> Result<SnippetToken<'src>> {
        let token = self.next_token();
        if &token.kind == kind {
            Ok(token)
        } else {
            Err(self.unexpected(token, expected))
        }
    }

    /// Consumes the next token, requiring it to be usable as a name.
    fn expect_name(&mut self, expected: &str) -> Result<&'src str> {
        let token = self.next_token();
        match token.kind.as_name() {
            Some(name) => Ok(name),
            None => Err(self.unexpected(token, expected)),
        }
    }

    fn expect_eof(&mut self) -> Result<()> {
        let token = self.next_token();
        match token.kind {
            SnippetTokenKind::Eof => Ok(()),
            _ => Err(self.unexpected(token, "end of input")),
        }
    }

    /// Builds the parse error for an out-of-place token, forwarding lexer
    /// errors as-is.
    fn unexpected(&self, token: SnippetToken<'src>, expected: &str) -> SnippetParseError {
        match token.kind {
            SnippetTokenKind::Error { message, kind } => {
                SnippetParseError::new(message, token.span, kind)
            }
            SnippetTokenKind::Eof => SnippetParseError::new(
                format!("expected {expected}, found end of input"),
                token.span,
                SnippetParseErrorKind::UnexpectedEndOfInput {
                    expected: expected.to_string(),
                },
            ),
            other => SnippetParseError::new(
                format!("expected {expected}, found {}", other.description()),
                token.span,
                SnippetParseErrorKind::UnexpectedToken {
                    expected: expected.to_string(),
                },
            ),
        }
    }

    fn enter_recursion(&mut self) -> Result<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            let span = self.peek_span();
            return Err(SnippetParseError::new(
                "selection nesting exceeds the recursion limit",
                span,
                SnippetParseErrorKind::RecursionDepthExceeded,
            ));
        }
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }
}
