//! Parser for IEC 61131-3 Structured Text.
//!
//! The parser is driven by the grammar table: declarations and statements
//! are expanded top-down from their alternatives, expressions are parsed by
//! precedence climbing over the table's operator levels. It builds a
//! lossless concrete syntax tree using the `rowan` library.
//!
//! # Design
//!
//! The parser is designed for IDE use:
//!
//! - **Error-tolerant**: Never fails; unexpected tokens become `ERROR`
//!   nodes and absent ones zero-width `MISSING` nodes
//! - **Lossless**: Preserves all source text including whitespace and comments
//! - **Bounded**: Nesting deeper than `ParserConfig::max_depth` is skipped
//!   instead of recursed into
//!
//! # Architecture
//!
//! The parser uses a three-phase approach:
//!
//! 1. **Lexing**: Tokenize source text (see `lexer` module)
//! 2. **Parsing**: Build a flat stream of events (start node, add token, finish node)
//! 3. **Tree Building**: Convert events into a `rowan` green tree

#![allow(clippy::module_inception)]

mod engine;
pub mod event;
mod expressions;
mod parser;
mod sink;
mod source;

pub(crate) use engine::Entry;

use text_size::{TextRange, TextSize};

use crate::config::ParserConfig;
use crate::grammar::{self, Grammar};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::tree::SyntaxTree;

use parser::Parser;
use sink::Sink;

/// A syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The byte range where the error occurred. Empty for something that
    /// is missing.
    pub range: TextRange,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

impl std::error::Error for ParseError {}

/// Parses `text` with the built-in grammar and default configuration.
#[must_use]
pub fn parse(text: &str) -> SyntaxTree {
    parse_with(text, grammar::grammar(), &ParserConfig::default())
}

/// Parses `text` with an explicit grammar and configuration.
#[must_use]
pub fn parse_with(text: &str, grammar: &Grammar, config: &ParserConfig) -> SyntaxTree {
    let _span = tracing::trace_span!("parse", len = text.len()).entered();
    let tokens: Vec<_> = Lexer::new(text).collect();
    parse_tokens(&tokens, grammar, config)
}

/// Parses an already lexed token stream. The tokens must cover the source
/// without gaps.
#[must_use]
pub fn parse_tokens(tokens: &[Token<'_>], grammar: &Grammar, config: &ParserConfig) -> SyntaxTree {
    let (green, errors) = run(tokens, grammar, config, 0, Entry::File);
    SyntaxTree::new(green, errors)
}

/// Runs the parser from `entry` with `depth` enclosing nodes assumed open.
pub(crate) fn run(
    tokens: &[Token<'_>],
    grammar: &Grammar,
    config: &ParserConfig,
    depth: usize,
    entry: Entry,
) -> (rowan::GreenNode, Vec<ParseError>) {
    let end = tokens
        .last()
        .map_or(TextSize::from(0), |token| token.range.end());

    let mut parser = Parser::new(tokens, end, grammar, config, depth);
    parser.parse_entry(entry);
    let (events, syntax_errors) = parser.finish();
    let green = Sink::new(tokens, events).finish();

    let mut errors = lexical_errors(tokens);
    errors.extend(syntax_errors);
    errors.sort_by_key(|error| (error.range.start(), error.range.end()));
    (green, errors)
}

fn lexical_errors(tokens: &[Token<'_>]) -> Vec<ParseError> {
    tokens
        .iter()
        .filter(|token| token.kind.is_error())
        .map(|token| ParseError {
            message: lexical_message(token),
            range: token.range,
        })
        .collect()
}

fn lexical_message(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::UnterminatedComment => "unterminated comment".to_string(),
        TokenKind::UnterminatedString => "unterminated string literal".to_string(),
        TokenKind::UnterminatedBasedLiteral => "based literal without digits".to_string(),
        TokenKind::UnterminatedPragma => "unterminated pragma".to_string(),
        _ if token.text.starts_with(['\'', '"']) => {
            "invalid escape sequence in string literal".to_string()
        }
        _ => format!("unexpected character '{}'", token.text),
    }
}
