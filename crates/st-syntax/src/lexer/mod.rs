//! Lexer for IEC 61131-3 Structured Text.
//!
//! This module provides a lexer that tokenizes ST source code into a stream
//! of tokens with their positions in the source text. The lexer is lazy and
//! can be restarted at any token boundary, which the incremental re-parser
//! relies on to relex only an edited region.

pub mod literals;
mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use std::collections::VecDeque;
use text_size::{TextRange, TextSize};

/// Zero-based line and UTF-8 byte column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based byte offset within the line.
    pub col: u32,
}

impl LineCol {
    /// Creates a position.
    #[must_use]
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Position reached after `text` starting from `self`.
    #[must_use]
    pub fn advance(self, text: &str) -> Self {
        match text.rfind('\n') {
            Some(last) => Self {
                line: self.line + text.matches('\n').count() as u32,
                col: (text.len() - last - 1) as u32,
            },
            None => Self {
                line: self.line,
                col: self.col + text.len() as u32,
            },
        }
    }

    /// Position of byte `offset` in `text`.
    #[must_use]
    pub fn of_offset(text: &str, offset: TextSize) -> Self {
        let prefix = &text.as_bytes()[..usize::from(offset).min(text.len())];
        let line_start = prefix
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |idx| idx + 1);
        Self {
            line: prefix.iter().filter(|b| **b == b'\n').count() as u32,
            col: (prefix.len() - line_start) as u32,
        }
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
    /// The token text.
    pub text: &'src str,
    /// Position of the first byte.
    pub start: LineCol,
    /// Position just past the last byte.
    pub end: LineCol,
}

impl Token<'_> {
    /// Returns the length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    /// Returns true if the token has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Lexer for Structured Text source code.
///
/// The lexer is an iterator over tokens. It handles all error recovery
/// internally: unrecognized characters come back as `TokenKind::Invalid`,
/// cut-short literals and comments as the `Unterminated*` kinds.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
    base: usize,
    pos: LineCol,
    pending: VecDeque<(TokenKind, std::ops::Range<usize>)>,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::starting_at(source, TextSize::from(0), LineCol::default())
    }

    /// Creates a lexer that resumes at `offset`, which must be a token
    /// boundary, with `pos` as the line/column of that offset.
    ///
    /// An offset past the end or inside a UTF-8 sequence yields no tokens.
    #[must_use]
    pub fn starting_at(source: &'src str, offset: TextSize, pos: LineCol) -> Self {
        let base = usize::from(offset);
        let rest = source.get(base..).unwrap_or("");
        let base = source.len() - rest.len();
        Self {
            inner: TokenKind::lexer(rest),
            source,
            base,
            pos,
            pending: VecDeque::new(),
        }
    }

    /// Returns the source text being lexed.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    fn next_raw(&mut self) -> Option<(TokenKind, std::ops::Range<usize>)> {
        if let Some(raw) = self.pending.pop_front() {
            return Some(raw);
        }

        let kind = self.inner.next()?;
        let span = self.inner.span();
        let kind = match kind {
            Ok(kind) => kind,
            Err(()) => {
                let text = self.inner.slice();
                if text.starts_with("(*") || text.starts_with("/*") {
                    TokenKind::UnterminatedComment
                } else {
                    TokenKind::Invalid
                }
            }
        };

        // Longest-match quirk: `1..10` comes back as `1.` followed by `.10`.
        if kind == TokenKind::IntLiteral {
            let text = self.inner.slice();
            if text.ends_with('.') && span.end > span.start + 1 {
                let dot_start = span.end - 1;
                self.pending
                    .push_back((TokenKind::IntLiteral, span.start..dot_start));

                match self.inner.next() {
                    Some(next_kind) => {
                        let next_span = self.inner.span();
                        let next_kind = next_kind.unwrap_or(TokenKind::Invalid);
                        if next_kind == TokenKind::Dot && next_span.start == span.end {
                            self.pending
                                .push_back((TokenKind::DotDot, dot_start..next_span.end));
                        } else {
                            self.pending.push_back((TokenKind::Dot, dot_start..span.end));
                            self.pending.push_back((next_kind, next_span));
                        }
                    }
                    None => self.pending.push_back((TokenKind::Dot, dot_start..span.end)),
                }

                return self.pending.pop_front();
            }
        }

        Some((kind, span))
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let (kind, span) = self.next_raw()?;
        let start = self.base + span.start;
        let end = self.base + span.end;
        let text = &self.source[start..end];

        let start_pos = self.pos;
        self.pos = start_pos.advance(text);

        Some(Token {
            kind,
            range: TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32)),
            text,
            start: start_pos,
            end: self.pos,
        })
    }
}

/// Lex the entire source and return all tokens.
///
/// This is a convenience function for testing and simple use cases.
/// For the parser, use the `Lexer` iterator directly.
#[must_use]
pub fn lex(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).collect()
}

/// Lex source and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &str) -> Vec<(Token<'_>, &str)> {
    Lexer::new(source).map(|token| (token, token.text)).collect()
}
