//! Token source for the parser.
//!
//! `Source` wraps a token slice, hides trivia from the grammar and answers
//! the bounded lookahead questions the grammar's predicates ask.

use text_size::TextSize;

use crate::grammar::TokenSet;
use crate::lexer::{Token, TokenKind};

/// A token source that provides tokens to the parser.
pub(crate) struct Source<'t, 'src> {
    tokens: &'t [Token<'src>],
    /// Indices of the non-trivia tokens.
    significant: Vec<usize>,
    cursor: usize,
    end: TextSize,
}

impl<'t, 'src> Source<'t, 'src> {
    /// Creates a source over `tokens`; `end` is the offset just past the
    /// last token.
    pub(crate) fn new(tokens: &'t [Token<'src>], end: TextSize) -> Self {
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !token.kind.is_trivia())
            .map(|(idx, _)| idx)
            .collect();
        Self {
            tokens,
            significant,
            cursor: 0,
            end,
        }
    }

    /// Returns the current token kind, or `Eof` if at end.
    pub(crate) fn current(&self) -> TokenKind {
        self.peek_kind_n(0)
    }

    /// Returns the current token, or `None` if at end.
    pub(crate) fn current_token(&self) -> Option<&Token<'src>> {
        self.peek_token_n(0)
    }

    /// Peeks at the nth non-trivia token ahead (0 = current).
    pub(crate) fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.peek_token_n(n).map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Peeks at the nth non-trivia token ahead and returns the token.
    pub(crate) fn peek_token_n(&self, n: usize) -> Option<&Token<'src>> {
        let idx = *self.significant.get(self.cursor + n)?;
        self.tokens.get(idx)
    }

    /// Advances past the current token.
    pub(crate) fn bump(&mut self) {
        if self.cursor < self.significant.len() {
            self.cursor += 1;
        }
    }

    /// Returns `true` if at end of input.
    pub(crate) fn at_end(&self) -> bool {
        self.cursor >= self.significant.len()
    }

    /// Number of non-trivia tokens consumed so far.
    pub(crate) fn position(&self) -> usize {
        self.cursor
    }

    /// Start of the current token, or the end of input.
    pub(crate) fn current_start(&self) -> TextSize {
        self.current_token()
            .map_or(self.end, |token| token.range.start())
    }

    /// Returns true if there is a top-level assignment operator before the
    /// statement ends.
    pub(crate) fn has_assign_ahead(&self, stop: &TokenSet) -> bool {
        self.scan_top_level(stop, |kind| {
            matches!(kind, TokenKind::Assign | TokenKind::RefAssign)
        })
    }

    /// Returns true if there is a top-level colon before the statement ends.
    pub(crate) fn has_case_label_ahead(&self, stop: &TokenSet) -> bool {
        self.scan_top_level(stop, |kind| kind == TokenKind::Colon)
    }

    /// Scans forward at parenthesis/bracket depth zero until `found` holds
    /// or a statement boundary (`;`, a clause keyword or a `stop` token)
    /// is reached.
    fn scan_top_level(&self, stop: &TokenSet, found: impl Fn(TokenKind) -> bool) -> bool {
        let mut paren_depth = 0u32;
        let mut bracket_depth = 0u32;

        for &idx in &self.significant[self.cursor..] {
            let kind = self.tokens[idx].kind;
            match kind {
                TokenKind::LParen => paren_depth += 1,
                TokenKind::RParen => paren_depth = paren_depth.saturating_sub(1),
                TokenKind::LBracket => bracket_depth += 1,
                TokenKind::RBracket => bracket_depth = bracket_depth.saturating_sub(1),
                _ if paren_depth > 0 || bracket_depth > 0 => {}
                _ if found(kind) => return true,
                TokenKind::Semicolon
                | TokenKind::KwThen
                | TokenKind::KwDo
                | TokenKind::KwOf
                | TokenKind::KwElse
                | TokenKind::KwElsif
                | TokenKind::KwUntil => return false,
                _ if stop.contains(kind) => return false,
                _ => {}
            }
        }

        false
    }
}
