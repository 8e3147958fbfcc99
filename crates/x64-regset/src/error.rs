//! Error types and source span tracking for the text readers.

#[allow(unused_imports)]
use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::operand::OperandKind;

/// Position of a token in register-set text.
///
/// Spans are produced by [`Tokens`](crate::lexer::Tokens) as it reads; an
/// end-of-input span has `len == 0` and points past any trailing
/// whitespace. Lines and columns start at 1, so the default span
/// (`0:0`) never comes from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (byte offset within line).
    pub col: u32,
    /// 0-based byte offset from start of input.
    pub offset: usize,
    /// Byte length of the spanned region.
    pub len: usize,
}

impl Span {
    /// A span at `line:col`, `len` bytes long, starting `offset` bytes
    /// into the input.
    #[must_use]
    pub fn new(line: u32, col: u32, offset: usize, len: usize) -> Self {
        Self {
            line,
            col,
            offset,
            len,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Failure while reading operands or register sets from text.
///
/// A failed read leaves the destination in an unspecified, partially
/// built state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseError {
    /// The first token of a register set was not `{`.
    ExpectedOpenBrace {
        /// The token found instead.
        found: String,
        /// Source location of that token.
        span: Span,
    },

    /// Input ended before the closing `}` (or before any token at all).
    UnexpectedEof {
        /// Location just past the last consumed byte.
        span: Span,
    },

    /// A token is not the mnemonic of any register or flag.
    UnknownOperand {
        /// The unrecognized token.
        token: String,
        /// Source location of the token.
        span: Span,
    },

    /// Modifiers have no textual form and can never be read.
    ModifierNotReadable {
        /// The modifier kind that was requested.
        kind: OperandKind,
        /// Source location of the token that was offered.
        span: Span,
    },

    /// Tokens remained after a complete value was read.
    TrailingInput {
        /// The first unconsumed token.
        token: String,
        /// Source location of the token.
        span: Span,
    },

    /// A configurable resource limit was exceeded.
    ResourceLimitExceeded {
        /// Human-readable name of the resource (e.g. "tokens").
        resource: String,
        /// The configured limit that was exceeded.
        limit: usize,
    },
}

impl ParseError {
    /// Source location of the error, if it has one.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::ExpectedOpenBrace { span, .. }
            | ParseError::UnexpectedEof { span }
            | ParseError::UnknownOperand { span, .. }
            | ParseError::ModifierNotReadable { span, .. }
            | ParseError::TrailingInput { span, .. } => Some(*span),
            ParseError::ResourceLimitExceeded { .. } => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ExpectedOpenBrace { found, span } => {
                write!(f, "{}: expected '{{', found '{}'", span, found)
            }
            ParseError::UnexpectedEof { span } => {
                write!(f, "{}: unexpected end of input", span)
            }
            ParseError::UnknownOperand { token, span } => {
                write!(f, "{}: '{}' is not a register or flag", span, token)
            }
            ParseError::ModifierNotReadable { kind, span } => {
                write!(f, "{}: {:?} has no textual form", span, kind)
            }
            ParseError::TrailingInput { token, span } => {
                write!(f, "{}: unexpected trailing input '{}'", span, token)
            }
            ParseError::ResourceLimitExceeded { resource, limit } => {
                write!(
                    f,
                    "resource limit exceeded: {} (limit: {})",
                    resource, limit
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
