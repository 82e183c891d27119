//! Table-driven rule expansion.
//!
//! Declarations and statements are parsed top-down by interpreting the
//! grammar table: the engine picks the first alternative whose FIRST set
//! holds the current token and whose lookahead condition holds, then walks
//! its symbols. Expressions are handed to precedence climbing.

use crate::grammar::{Alternative, Hook, Lookahead, Production, Symbol};
use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

use super::parser::Parser;

/// Where a parse starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    /// A whole file.
    File,
    /// One derivation of a production.
    Rule(Production),
    /// One expression.
    Expression,
    /// One statement of a case branch body.
    CaseStatement,
}

impl Parser<'_, '_> {
    /// Parses the whole input as the root production.
    fn source_file(&mut self) {
        let m = self.start();
        let root = self.grammar.alternatives(Production::SourceFile).first();
        if let Some(alt) = root {
            self.symbols(alt.symbols);
        }
        if !self.at_end() {
            self.error_run("expected end of input", |_| false);
        }
        m.complete(self, root.and_then(|alt| alt.node).unwrap_or(SyntaxKind::SourceFile));
    }

    /// Parses from `entry`. Anything but a whole file is wrapped in a
    /// placeholder root so the result is always a single tree.
    pub(crate) fn parse_entry(&mut self, entry: Entry) {
        match entry {
            Entry::File => self.source_file(),
            Entry::Rule(production) => self.wrapped(|p| {
                p.production(production);
            }),
            Entry::Expression => self.wrapped(|p| {
                p.expr();
            }),
            Entry::CaseStatement => self.wrapped(|p| {
                if !p.at_case_label() {
                    p.production(Production::Statement);
                }
            }),
        }
    }

    fn wrapped(&mut self, parse: impl FnOnce(&mut Self)) {
        let m = self.start();
        parse(self);
        m.complete(self, SyntaxKind::SourceFile);
    }

    /// Parses `production` if one of its alternatives applies. Returns
    /// `false` without consuming anything when none does.
    pub(crate) fn production(&mut self, production: Production) -> bool {
        if production == Production::Expression {
            return self.expr();
        }
        let Some(alt) = self.select(production) else {
            return false;
        };
        if self.too_deep() {
            self.skip_too_deep(false);
            return true;
        }
        match alt.node {
            Some(kind) => {
                let m = self.start();
                self.symbols(alt.symbols);
                m.complete(self, kind);
            }
            None => self.symbols(alt.symbols),
        }
        true
    }

    fn select(&self, production: Production) -> Option<&'static Alternative> {
        let current = self.current();
        self.grammar
            .alternatives(production)
            .iter()
            .enumerate()
            .find(|(idx, alt)| {
                alt.prec.is_none()
                    && self.grammar.alternative_first(production, *idx).contains(current)
                    && self.lookahead_holds(alt.lookahead)
            })
            .map(|(_, alt)| alt)
    }

    fn lookahead_holds(&self, lookahead: Lookahead) -> bool {
        match lookahead {
            Lookahead::First => true,
            Lookahead::Label => self.peek_kind_n(1) == TokenKind::Colon,
            Lookahead::Assignment => self.source.has_assign_ahead(self.grammar.sync_set()),
            Lookahead::CaseLabel => self.source.has_case_label_ahead(self.grammar.sync_set()),
            Lookahead::NamedArg => matches!(
                self.peek_kind_n(1),
                TokenKind::Assign | TokenKind::Arrow
            ),
            Lookahead::NegatedOutput => {
                self.peek_kind_n(1).is_name() && self.peek_kind_n(2) == TokenKind::Arrow
            }
            Lookahead::TypedEnum => {
                let mut n = 1;
                while self.peek_kind_n(n) == TokenKind::Dot && self.peek_kind_n(n + 1).is_name() {
                    n += 2;
                }
                self.peek_kind_n(n) == TokenKind::LParen
                    && self.peek_kind_n(n + 1).is_name()
                    && matches!(
                        self.peek_kind_n(n + 2),
                        TokenKind::Comma | TokenKind::Assign | TokenKind::RParen
                    )
            }
            Lookahead::FieldInitList => {
                self.peek_kind_n(1).is_name() && self.peek_kind_n(2) == TokenKind::Assign
            }
        }
    }

    fn symbols(&mut self, symbols: &'static [Symbol]) {
        for symbol in symbols {
            self.symbol(symbol);
        }
    }

    fn symbol(&mut self, symbol: &'static Symbol) {
        match *symbol {
            Symbol::Token(kind) | Symbol::Close(kind) => {
                self.expect(kind);
            }
            Symbol::OneOf(kinds) => {
                if kinds.contains(&self.current()) {
                    self.bump();
                } else {
                    self.missing(describe_one_of(kinds));
                }
            }
            Symbol::Rule(production) => self.rule(production),
            Symbol::Opt(group) => {
                if self.starts(group) {
                    self.symbols(group);
                }
            }
            Symbol::Many(group) => {
                while self.starts(group) {
                    let before = self.source.position();
                    self.symbols(group);
                    if self.source.position() == before {
                        break;
                    }
                }
            }
            Symbol::Sep(production, separator) => {
                self.rule(production);
                while self.eat(separator) {
                    self.rule(production);
                }
            }
            Symbol::Expr => {
                if !self.expr() {
                    self.missing("expression");
                }
            }
            Symbol::Block(until) => self.stmt_list(until, false),
            Symbol::CaseBlock(until) => self.stmt_list(until, true),
            Symbol::Items(production, until) => self.items(production, until),
            Symbol::Semi => self.expect_semicolon(),
            Symbol::Hook(Hook::Primary) => {
                if self.primary().is_none() {
                    self.missing("expression");
                }
            }
        }
    }

    fn rule(&mut self, production: Production) {
        if !self.production(production) {
            self.missing(production.describe());
        }
    }

    /// Returns `true` if the group's first symbol can start here.
    fn starts(&self, group: &[Symbol]) -> bool {
        let current = self.current();
        match group.first() {
            Some(Symbol::Token(kind) | Symbol::Close(kind)) => current == *kind,
            Some(Symbol::OneOf(kinds)) => kinds.contains(&current),
            Some(Symbol::Rule(production) | Symbol::Sep(production, _)) => {
                if *production == Production::Expression {
                    self.grammar.first(Production::Expression).contains(current)
                } else {
                    self.select(*production).is_some()
                }
            }
            Some(Symbol::Expr) => self.grammar.first(Production::Expression).contains(current),
            Some(Symbol::Semi) => current == TokenKind::Semicolon,
            Some(Symbol::Hook(hook)) => hook.first().contains(current),
            Some(
                Symbol::Opt(_)
                | Symbol::Many(_)
                | Symbol::Block(_)
                | Symbol::CaseBlock(_)
                | Symbol::Items(..),
            )
            | None => false,
        }
    }

    /// Repeats `item` until a terminator. Tokens that cannot start an item
    /// are wrapped in error nodes; a statement-boundary keyword that belongs
    /// to an enclosing construct ends the loop instead.
    fn items(&mut self, item: Production, until: &'static [TokenKind]) {
        loop {
            let current = self.current();
            if self.at_end() || until.contains(&current) {
                break;
            }
            if current.is_error() {
                self.lexical_error();
                continue;
            }
            if self.production(item) {
                continue;
            }
            if !until.is_empty() && self.grammar.is_sync(current) {
                break;
            }
            self.error_run(format!("expected {}", item.describe()), |p| {
                let current = p.current();
                until.contains(&current)
                    || current.is_error()
                    || p.grammar.is_sync(current)
                    || p.select(item).is_some()
            });
        }
    }

    fn stmt_list(&mut self, until: &'static [TokenKind], case_labels: bool) {
        let m = self.start();
        loop {
            let current = self.current();
            if self.at_end() || until.contains(&current) || (case_labels && self.at_case_label()) {
                break;
            }
            if current.is_error() {
                self.lexical_error();
                continue;
            }
            if self.production(Production::Statement) {
                continue;
            }
            if self.grammar.is_sync(current) {
                break;
            }
            self.error_run("expected statement", |p| {
                let current = p.current();
                until.contains(&current)
                    || current.is_error()
                    || p.grammar.is_sync(current)
                    || p.can_start_statement()
                    || (case_labels && p.at_case_label())
            });
        }
        m.complete(self, SyntaxKind::StmtList);
    }

    fn can_start_statement(&self) -> bool {
        self.grammar
            .first(Production::Statement)
            .contains(self.current())
    }

    pub(crate) fn at_case_label(&self) -> bool {
        self.grammar
            .first(Production::Expression)
            .contains(self.current())
            && self.source.has_case_label_ahead(self.grammar.sync_set())
    }

    /// Consume a statement terminator, or insert it when unambiguous.
    fn expect_semicolon(&mut self) {
        if self.eat(TokenKind::Semicolon) {
            return;
        }

        if self.at_semicolon_insertion_point() {
            self.missing("';'");
            return;
        }

        self.error_run("expected ';'", Self::at_semicolon_insertion_point);
    }

    fn at_semicolon_insertion_point(&self) -> bool {
        if self.at_end() {
            return true;
        }

        if self.grammar.is_sync(self.current()) || self.can_start_statement() {
            return true;
        }

        if matches!(
            self.current(),
            TokenKind::KwElse | TokenKind::KwElsif | TokenKind::KwUntil
        ) {
            return true;
        }

        self.at_case_label()
    }
}

fn describe_one_of(kinds: &[TokenKind]) -> String {
    if !kinds.is_empty() && kinds.iter().all(|kind| kind.is_name()) {
        return "identifier".to_string();
    }
    let names: Vec<_> = kinds
        .iter()
        .map(|kind| SyntaxKind::from(*kind).describe())
        .collect();
    match names.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {last}", rest.join(", ")),
        None => "token".to_string(),
    }
}
