//! A zero-copy lexer over snippet source text.
//!
//! Token values borrow directly from the source string, so lexing a snippet
//! allocates only for error messages. Whitespace, commas, and `#` line
//! comments are insignificant and skipped. Invalid input produces an
//! [`SnippetTokenKind::Error`] token rather than halting the iterator; the
//! parser aborts on the first such token.

use crate::SnippetParseErrorKind;
use crate::SourcePosition;
use crate::SourceSpan;
use crate::token::SnippetToken;
use crate::token::SnippetTokenKind;

/// A streaming lexer producing [`SnippetToken`]s from a `&str` input.
///
/// The iterator yields an `Eof` token after the last real token, then
/// `None`.
pub struct SnippetLexer<'src> {
    /// The full source text being lexed.
    source: &'src str,

    /// Current byte offset from the start of `source`. The remaining text is
    /// `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,

    /// Current zero-based line number.
    curr_line: usize,

    /// Current zero-based UTF-8 character column.
    curr_col: usize,

    /// Whether the previous character was `\r`, so a following `\n` does not
    /// count as a second newline.
    last_char_was_cr: bool,

    /// Whether the `Eof` token has been emitted.
    finished: bool,
}

impl<'src> SnippetLexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_col: 0,
            last_char_was_cr: false,
            finished: false,
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(self.curr_line, self.curr_col, self.curr_byte_offset)
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes the next character, updating line/column tracking.
    ///
    /// `\n`, `\r`, and `\r\n` each count as one newline.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;

        if ch == '\n' {
            if self.last_char_was_cr {
                self.last_char_was_cr = false;
            } else {
                self.curr_line += 1;
                self.curr_col = 0;
            }
        } else if ch == '\r' {
            self.curr_line += 1;
            self.curr_col = 0;
            self.last_char_was_cr = true;
        } else {
            self.curr_col += 1;
            self.last_char_was_cr = false;
        }

        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    fn make_span(&self, start: SourcePosition) -> SourceSpan {
        SourceSpan::new(start, self.curr_position())
    }

    fn make_token(&self, kind: SnippetTokenKind<'src>, span: SourceSpan) -> SnippetToken<'src> {
        SnippetToken::new(kind, span)
    }

    fn error_token(
        &self,
        message: impl Into<String>,
        kind: SnippetParseErrorKind,
        span: SourceSpan,
    ) -> SnippetToken<'src> {
        self.make_token(
            SnippetTokenKind::Error {
                message: message.into(),
                kind,
            },
            span,
        )
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    fn next_token(&mut self) -> SnippetToken<'src> {
        loop {
            self.skip_insignificant();

            let start = self.curr_position();

            match self.peek_char() {
                None => {
                    let span = self.make_span(start);
                    return self.make_token(SnippetTokenKind::Eof, span);
                }

                Some('#') => {
                    // Line comment; insignificant between tokens.
                    self.skip_comment();
                    continue;
                }

                Some('@') => return self.punctuator(SnippetTokenKind::At, start),
                Some(':') => return self.punctuator(SnippetTokenKind::Colon, start),
                Some('}') => return self.punctuator(SnippetTokenKind::CurlyBraceClose, start),
                Some('{') => return self.punctuator(SnippetTokenKind::CurlyBraceOpen, start),
                Some('$') => return self.punctuator(SnippetTokenKind::Dollar, start),
                Some(')') => return self.punctuator(SnippetTokenKind::ParenClose, start),
                Some('(') => return self.punctuator(SnippetTokenKind::ParenOpen, start),
                Some(']') => return self.punctuator(SnippetTokenKind::SquareBracketClose, start),
                Some('[') => return self.punctuator(SnippetTokenKind::SquareBracketOpen, start),

                Some('.') => return self.lex_ellipsis(start),
                Some('"') => return self.lex_string(start),

                Some(c) if is_name_start(c) => return self.lex_name(start),
                Some(c) if c == '-' || c.is_ascii_digit() => return self.lex_number(start),

                Some(c) => {
                    self.consume();
                    let span = self.make_span(start);
                    return self.error_token(
                        format!("unexpected character `{c}`"),
                        SnippetParseErrorKind::UnexpectedCharacter,
                        span,
                    );
                }
            }
        }
    }

    /// Skips whitespace and commas. Commas are insignificant separators in
    /// GraphQL source text.
    fn skip_insignificant(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\n' | '\r' | ',' | '\u{FEFF}' => {
                    self.consume();
                }
                _ => break,
            }
        }
    }

    /// Skips a `#` comment through the end of the line.
    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.consume();
        }
    }

    fn punctuator(
        &mut self,
        kind: SnippetTokenKind<'src>,
        start: SourcePosition,
    ) -> SnippetToken<'src> {
        self.consume();
        let span = self.make_span(start);
        self.make_token(kind, span)
    }

    // =========================================================================
    // Multi-character tokens
    // =========================================================================

    /// Lexes `...`. One or two dots are an error.
    fn lex_ellipsis(&mut self, start: SourcePosition) -> SnippetToken<'src> {
        let mut dots = 0;
        while dots < 3 && self.peek_char() == Some('.') {
            self.consume();
            dots += 1;
        }
        let span = self.make_span(start);
        if dots == 3 {
            self.make_token(SnippetTokenKind::Ellipsis, span)
        } else {
            self.error_token(
                format!("expected `...`, found {dots} dot(s)"),
                SnippetParseErrorKind::UnexpectedCharacter,
                span,
            )
        }
    }

    /// Lexes a name and maps the `true`/`false`/`null` keywords to their own
    /// token kinds.
    fn lex_name(&mut self, start: SourcePosition) -> SnippetToken<'src> {
        let name_start = self.curr_byte_offset;
        while let Some(c) = self.peek_char() {
            if !is_name_continue(c) {
                break;
            }
            self.consume();
        }
        let name = &self.source[name_start..self.curr_byte_offset];
        let span = self.make_span(start);

        let kind = match name {
            "true" => SnippetTokenKind::True,
            "false" => SnippetTokenKind::False,
            "null" => SnippetTokenKind::Null,
            _ => SnippetTokenKind::Name(name),
        };
        self.make_token(kind, span)
    }

    /// Lexes an optionally signed number with optional decimal and exponent
    /// parts. The raw text is kept; the parser interprets it on demand.
    fn lex_number(&mut self, start: SourcePosition) -> SnippetToken<'src> {
        let raw_start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        if !self.consume_digits() {
            let span = self.make_span(start);
            return self.error_token(
                "expected a digit after `-`",
                SnippetParseErrorKind::UnexpectedCharacter,
                span,
            );
        }

        if self.peek_char() == Some('.') {
            // Only a digit continues the number; `a.b` paths never reach the
            // lexer, but `1.x` is malformed input.
            if self.peek_char_nth(1).is_some_and(|c| c.is_ascii_digit()) {
                self.consume();
                self.consume_digits();
                is_float = true;
            } else {
                self.consume();
                let span = self.make_span(start);
                return self.error_token(
                    "expected a digit after the decimal point",
                    SnippetParseErrorKind::UnexpectedCharacter,
                    span,
                );
            }
        }

        if matches!(self.peek_char(), Some('e') | Some('E')) {
            let after_e = self.peek_char_nth(1);
            let after_sign = self.peek_char_nth(2);
            let exponent_follows = match after_e {
                Some(c) if c.is_ascii_digit() => true,
                Some('+') | Some('-') => after_sign.is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if exponent_follows {
                self.consume(); // e/E
                if matches!(self.peek_char(), Some('+') | Some('-')) {
                    self.consume();
                }
                self.consume_digits();
                is_float = true;
            }
        }

        // A name character directly after a number is malformed (`1x`).
        if self.peek_char().is_some_and(is_name_start) {
            let c = self.consume().unwrap_or_default();
            let span = self.make_span(start);
            return self.error_token(
                format!("unexpected character `{c}` after a number"),
                SnippetParseErrorKind::UnexpectedCharacter,
                span,
            );
        }

        let raw = &self.source[raw_start..self.curr_byte_offset];
        let span = self.make_span(start);
        let kind = if is_float {
            SnippetTokenKind::FloatValue(raw)
        } else {
            SnippetTokenKind::IntValue(raw)
        };
        self.make_token(kind, span)
    }

    fn consume_digits(&mut self) -> bool {
        let mut any = false;
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.consume();
            any = true;
        }
        any
    }

    /// Lexes a `"..."` or `"""..."""` string literal, keeping the raw text
    /// (quotes included). Escape sequences are decoded later by
    /// [`SnippetTokenKind::decode_string_value()`].
    fn lex_string(&mut self, start: SourcePosition) -> SnippetToken<'src> {
        let raw_start = self.curr_byte_offset;

        let is_block = self.remaining().starts_with("\"\"\"");
        if is_block {
            self.consume();
            self.consume();
            self.consume();
            loop {
                if self.remaining().starts_with("\\\"\"\"") {
                    for _ in 0..4 {
                        self.consume();
                    }
                    continue;
                }
                if self.remaining().starts_with("\"\"\"") {
                    self.consume();
                    self.consume();
                    self.consume();
                    let raw = &self.source[raw_start..self.curr_byte_offset];
                    let span = self.make_span(start);
                    return self.make_token(SnippetTokenKind::StringValue(raw), span);
                }
                if self.consume().is_none() {
                    let span = self.make_span(start);
                    return self.error_token(
                        "unterminated block string literal",
                        SnippetParseErrorKind::UnterminatedString,
                        span,
                    );
                }
            }
        }

        self.consume(); // opening quote
        loop {
            match self.peek_char() {
                None | Some('\n') | Some('\r') => {
                    let span = self.make_span(start);
                    return self.error_token(
                        "unterminated string literal",
                        SnippetParseErrorKind::UnterminatedString,
                        span,
                    );
                }
                Some('"') => {
                    self.consume();
                    let raw = &self.source[raw_start..self.curr_byte_offset];
                    let span = self.make_span(start);
                    return self.make_token(SnippetTokenKind::StringValue(raw), span);
                }
                Some('\\') => {
                    self.consume();
                    // The escaped character is consumed blindly here and
                    // validated during decoding.
                    self.consume();
                }
                Some(_) => {
                    self.consume();
                }
            }
        }
    }
}

impl<'src> Iterator for SnippetLexer<'src> {
    type Item = SnippetToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if matches!(token.kind, SnippetTokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

/// `[A-Za-z_]`
fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// `[A-Za-z0-9_]`
fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
