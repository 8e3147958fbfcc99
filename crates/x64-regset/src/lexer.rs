//! Whitespace-delimited tokenizer for register-set text.
//!
//! Tokens are maximal runs of non-whitespace characters, exactly what a
//! formatted string extraction would yield. Only the six ASCII whitespace
//! characters of the C locale separate tokens; any other character,
//! including Unicode spaces such as U+00A0, is part of a token.
//!
//! Each [`Token`] borrows its text from the input and carries the [`Span`]
//! it was read from, so a reader can report the position of the offending
//! token.
//!
//! [`Tokens`] is a cursor rather than a one-shot `Vec`: several values can
//! be read from the same input in sequence, each read consuming only what
//! it needs.

use crate::error::Span;

/// Space, tab, newline, vertical tab, form feed, carriage return.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// A token borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// Source text of the token.
    pub text: &'src str,
    /// Source location.
    pub span: Span,
}

/// Cursor over the whitespace-separated tokens of a string.
#[derive(Debug, Clone)]
pub struct Tokens<'src> {
    src: &'src str,
    pos: usize,
    line: u32,
    line_start: usize,
}

impl<'src> Tokens<'src> {
    /// Start reading at the beginning of `src`.
    #[must_use]
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The unconsumed remainder of the input.
    #[must_use]
    pub fn rest(&self) -> &'src str {
        &self.src[self.pos..]
    }

    /// Zero-length span at the cursor, after skipping whitespace.
    #[must_use]
    pub fn eof_span(&self) -> Span {
        let mut probe = self.clone();
        probe.skip_whitespace();
        probe.span_at(probe.pos, 0)
    }

    /// Look at the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<Token<'src>> {
        self.clone().next()
    }

    fn span_at(&self, offset: usize, len: usize) -> Span {
        Span::new(
            self.line,
            (offset - self.line_start + 1) as u32,
            offset,
            len,
        )
    }

    fn skip_whitespace(&mut self) {
        for (i, c) in self.src[self.pos..].char_indices() {
            if !is_separator(c) {
                self.pos += i;
                return;
            }
            if c == '\n' {
                self.line += 1;
                self.line_start = self.pos + i + 1;
            }
        }
        self.pos = self.src.len();
    }
}

impl<'src> Iterator for Tokens<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        self.skip_whitespace();
        if self.pos >= self.src.len() {
            return None;
        }
        let start = self.pos;
        let len = self.src[start..]
            .find(is_separator)
            .unwrap_or(self.src.len() - start);
        self.pos = start + len;
        Some(Token {
            text: &self.src[start..start + len],
            span: self.span_at(start, len),
        })
    }
}
