//! Buffered token stream over the [`SnippetLexer`] with bounded lookahead.

use smallvec::SmallVec;

use crate::SnippetLexer;
use crate::token::SnippetToken;
use crate::token::SnippetTokenKind;

/// A peekable stream of [`SnippetToken`]s.
///
/// Centralizes buffering and lookahead so the parser can call `peek()` and
/// `consume()` without owning lexer state. The snippet grammar needs at most
/// two tokens of lookahead (`alias :` and keyword disambiguation), so the
/// buffer is a [`SmallVec`] that never spills in practice.
pub struct SnippetTokenStream<'src> {
    lexer: SnippetLexer<'src>,
    /// Unconsumed tokens, front first. Grows at the back via
    /// `ensure_buffer_has()`.
    buffer: SmallVec<[SnippetToken<'src>; 2]>,
}

impl<'src> SnippetTokenStream<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: SnippetLexer::new(source),
            buffer: SmallVec::new(),
        }
    }

    /// Advance to the next token and return it as an owned value.
    ///
    /// Returns `None` once the stream is exhausted (after `Eof` has been
    /// consumed).
    pub fn consume(&mut self) -> Option<SnippetToken<'src>> {
        self.ensure_buffer_has(1);
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer.remove(0))
        }
    }

    /// Peek at the next token without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Option<&SnippetToken<'src>> {
        self.peek_nth(0)
    }

    /// Peek at the nth token ahead (0-indexed from the next unconsumed
    /// token).
    pub fn peek_nth(&mut self, n: usize) -> Option<&SnippetToken<'src>> {
        self.ensure_buffer_has(n + 1);
        self.buffer.get(n)
    }

    /// Returns `true` if there are no more tokens to consume, or if the next
    /// token is `Eof`.
    pub fn is_at_end(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(token) => matches!(token.kind, SnippetTokenKind::Eof),
        }
    }

    fn ensure_buffer_has(&mut self, count: usize) {
        while self.buffer.len() < count {
            if let Some(token) = self.lexer.next() {
                self.buffer.push(token);
            } else {
                break;
            }
        }
    }
}
