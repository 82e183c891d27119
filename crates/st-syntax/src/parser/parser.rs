//! Parser state: markers, token consumption and recovery helpers.

use drop_bomb::DropBomb;
use text_size::{TextRange, TextSize};

use crate::config::{ParserConfig, MAX_MAX_DEPTH, MIN_MAX_DEPTH};
use crate::grammar::Grammar;
use crate::lexer::{Token, TokenKind};
use crate::parser::event::Event;
use crate::parser::source::Source;
use crate::parser::ParseError;
use crate::syntax::SyntaxKind;

/// The parser state.
pub(crate) struct Parser<'a, 'src> {
    pub(crate) grammar: &'a Grammar,
    pub(crate) source: Source<'a, 'src>,
    pub(crate) events: Vec<Event>,
    errors: Vec<ParseError>,
    /// Nodes started but not yet completed, including enclosing nodes of
    /// the entry point.
    pub(crate) open_nodes: usize,
    max_depth: usize,
    /// Offset the sink will have reached when the next node is started.
    insertion_point: TextSize,
}

pub(crate) struct Marker {
    pos: usize,
    bomb: DropBomb,
}

impl Marker {
    pub(crate) fn complete(mut self, parser: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();
        match parser.events.get_mut(self.pos) {
            Some(Event::Placeholder) => {
                parser.events[self.pos] = Event::start(kind);
            }
            Some(Event::Start {
                kind: existing_kind,
                ..
            }) => {
                *existing_kind = kind;
            }
            _ => {}
        }
        parser.events.push(Event::Finish);
        parser.open_nodes -= 1;
        CompletedMarker { pos: self.pos }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct CompletedMarker {
    pub(crate) pos: usize,
}

impl CompletedMarker {
    pub(crate) fn precede(self, parser: &mut Parser<'_, '_>) -> Marker {
        let new_pos = parser.events.len();
        parser.events.push(Event::Placeholder);
        set_forward_parent(&mut parser.events, self.pos, new_pos);
        parser.open_nodes += 1;
        Marker {
            pos: new_pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }
}

fn set_forward_parent(events: &mut [Event], from: usize, to: usize) {
    let mut current = from;
    loop {
        match &mut events[current] {
            Event::Start {
                forward_parent: Some(fp),
                ..
            } => {
                current += *fp as usize;
            }
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some((to - current) as u32);
                break;
            }
            _ => break,
        }
    }
}

impl<'a, 'src> Parser<'a, 'src> {
    /// Creates a parser over `tokens`, which end at `end`, with `depth`
    /// enclosing nodes already open.
    pub(crate) fn new(
        tokens: &'a [Token<'src>],
        end: TextSize,
        grammar: &'a Grammar,
        config: &ParserConfig,
        depth: usize,
    ) -> Self {
        let insertion_point = tokens.first().map_or(end, |token| token.range.start());
        Self {
            grammar,
            source: Source::new(tokens, end),
            events: Vec::new(),
            errors: Vec::new(),
            open_nodes: depth,
            max_depth: config.max_depth.clamp(MIN_MAX_DEPTH, MAX_MAX_DEPTH),
            insertion_point,
        }
    }

    pub(crate) fn finish(self) -> (Vec<Event>, Vec<ParseError>) {
        (self.events, self.errors)
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    pub(crate) fn current(&self) -> TokenKind {
        self.source.current()
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.source.current() == kind
    }

    pub(crate) fn at_end(&self) -> bool {
        self.source.at_end()
    }

    pub(crate) fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.source.peek_kind_n(n)
    }

    pub(crate) fn bump(&mut self) {
        let Some(token) = self.source.current_token() else {
            return;
        };
        self.insertion_point = token.range.end();
        self.events.push(Event::token(SyntaxKind::from(token.kind)));
        self.source.bump();
    }

    /// Consumes `kind` if it is the current token.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        self.insertion_point = self.source.current_start();
        self.open_nodes += 1;
        Marker {
            pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }

    /// Returns `true` once the configured nesting limit is reached.
    pub(crate) fn too_deep(&self) -> bool {
        self.open_nodes >= self.max_depth
    }

    /// How many more nodes may be opened before the limit.
    pub(crate) fn depth_left(&self) -> usize {
        self.max_depth.saturating_sub(self.open_nodes)
    }

    pub(crate) fn error_at(&mut self, message: impl Into<String>, range: TextRange) {
        self.errors.push(ParseError {
            message: message.into(),
            range,
        });
    }

    /// Inserts a zero-width `MISSING` node and reports what was expected.
    pub(crate) fn missing(&mut self, expected: impl std::fmt::Display) {
        let at = self.insertion_point;
        self.error_at(format!("expected {expected}"), TextRange::empty(at));
        self.events.push(Event::Missing);
    }

    /// Consumes `kind` or inserts a `MISSING` node in its place.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.missing(SyntaxKind::from(kind).describe());
        false
    }

    /// Wraps the current lexical error token in an `ERROR` node. The lexer
    /// pass has already reported it.
    pub(crate) fn lexical_error(&mut self) {
        let m = self.start();
        self.bump();
        m.complete(self, SyntaxKind::Error);
    }

    /// Wraps a run of unexpected tokens in an `ERROR` node.
    ///
    /// The current token is always consumed. The run then extends until
    /// `stop` holds, and also ends right after a `;`.
    pub(crate) fn error_run(&mut self, message: impl Into<String>, stop: impl Fn(&Self) -> bool) {
        let Some(first) = self.source.current_token().map(|t| t.range) else {
            return;
        };
        let m = self.start();
        let mut last = first;
        loop {
            let kind = self.current();
            if let Some(token) = self.source.current_token() {
                last = token.range;
            }
            self.bump();
            if kind == TokenKind::Semicolon || self.at_end() || stop(self) {
                break;
            }
        }
        m.complete(self, SyntaxKind::Error);
        self.error_at(message, first.cover(last));
    }

    /// Skips a balanced construct when the nesting limit is reached.
    ///
    /// The skipped tokens become one `ERROR` node. Block keywords and
    /// brackets are tracked so the run never swallows an enclosing closer.
    /// A statement run ends after its closer or `;`; an expression run ends
    /// before the first token that cannot continue an expression.
    pub(crate) fn skip_too_deep(&mut self, expression: bool) -> Option<CompletedMarker> {
        let first = self.source.current_token().map(|t| t.range)?;
        let m = self.start();
        let mut last = first;
        let mut depth = 0usize;
        let mut consumed = false;
        while let Some(token) = self.source.current_token() {
            let kind = token.kind;
            let range = token.range;
            let opens = self.grammar.opens_block(kind)
                || matches!(kind, TokenKind::LParen | TokenKind::LBracket);
            let closes = self.grammar.closes_block(kind)
                || matches!(kind, TokenKind::RParen | TokenKind::RBracket);
            if consumed {
                if depth == 0 && closes {
                    break;
                }
                if expression
                    && (kind == TokenKind::Semicolon
                        || self.grammar.is_sync(kind)
                        || (depth == 0 && !self.continues_expression(kind)))
                {
                    break;
                }
            }
            last = range;
            self.bump();
            consumed = true;
            if opens {
                depth += 1;
            } else if closes {
                depth = depth.saturating_sub(1);
            }
            if !expression && depth == 0 && (closes || kind == TokenKind::Semicolon) {
                break;
            }
        }
        let skipped = m.complete(self, SyntaxKind::Error);
        self.error_at("nesting too deep", first.cover(last));
        Some(skipped)
    }

    pub(crate) fn continues_expression(&self, kind: TokenKind) -> bool {
        kind.can_start_expr()
            || self.grammar.infix_operator(kind).is_some()
            || matches!(
                kind,
                TokenKind::Dot | TokenKind::Caret | TokenKind::LBracket | TokenKind::LParen
            )
    }
}
