//! Sink for converting parser events into a syntax tree.
//!
//! The sink takes the flat event stream and builds a `rowan` green tree.
//! Trivia is attached as late as possible: before the next token or node
//! start, so every node except the root begins and ends with a significant
//! token. The root additionally receives whatever tokens remain when it is
//! closed, which makes it cover the whole input.

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax::SyntaxKind;

/// Builds a syntax tree from parser events.
pub(crate) struct Sink<'t, 'src> {
    tokens: &'t [Token<'src>],
    events: Vec<Event>,
    cursor: usize,
    depth: usize,
    builder: rowan::GreenNodeBuilder<'static>,
}

impl<'t, 'src> Sink<'t, 'src> {
    /// Creates a new sink.
    pub(crate) fn new(tokens: &'t [Token<'src>], events: Vec<Event>) -> Self {
        Self {
            tokens,
            events,
            cursor: 0,
            depth: 0,
            builder: rowan::GreenNodeBuilder::new(),
        }
    }

    /// Consumes the sink and returns the green tree.
    pub(crate) fn finish(mut self) -> rowan::GreenNode {
        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    let mut kinds = vec![kind];
                    let mut idx = i;
                    let mut fp = forward_parent;

                    while let Some(fp_idx) = fp {
                        idx += fp_idx as usize;
                        if let Event::Start {
                            kind,
                            forward_parent,
                        } = std::mem::replace(&mut self.events[idx], Event::Placeholder)
                        {
                            kinds.push(kind);
                            fp = forward_parent;
                        } else {
                            break;
                        }
                    }

                    for kind in kinds.into_iter().rev() {
                        if self.depth > 0 {
                            self.eat_trivia();
                        }
                        self.builder.start_node(kind.into());
                        self.depth += 1;
                    }
                }
                Event::Token { kind, n_tokens } => {
                    self.eat_trivia();
                    for _ in 0..n_tokens {
                        self.token(kind);
                    }
                }
                Event::Missing => {
                    self.builder.start_node(SyntaxKind::Missing.into());
                    self.builder.finish_node();
                }
                Event::Finish => {
                    if self.depth == 1 {
                        while let Some(token) = self.tokens.get(self.cursor) {
                            self.token(SyntaxKind::from(token.kind));
                        }
                    }
                    self.builder.finish_node();
                    self.depth = self.depth.saturating_sub(1);
                }
                Event::Placeholder => {}
            }
        }

        self.builder.finish()
    }

    /// Adds trivia (whitespace, comments) to the tree.
    fn eat_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            if !token.kind.is_trivia() {
                break;
            }
            self.token(SyntaxKind::from(token.kind));
        }
    }

    /// Adds the next token to the tree.
    fn token(&mut self, kind: SyntaxKind) {
        if let Some(token) = self.tokens.get(self.cursor) {
            self.builder.token(kind.into(), token.text);
            self.cursor += 1;
        }
    }
}
