//! Grammar construction: derived tables and integrity checks.

use rustc_hash::FxHashMap;

use super::{
    Alternative, BlockForm, Fixity, Grammar, GrammarError, Operator, Production, Symbol, TokenSet,
};
use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

type Table = Vec<Option<&'static [Alternative]>>;

pub(super) fn build(
    definitions: &[(Production, &'static [Alternative])],
) -> Result<Grammar, GrammarError> {
    let mut table: Table = vec![None; Production::ALL.len()];
    for &(production, alternatives) in definitions {
        if table[production as usize].replace(alternatives).is_some() {
            return Err(GrammarError::DuplicateProduction(production));
        }
    }

    check_references(&table)?;
    let (prefix, infix) = collect_operators(&table)?;
    check_productive(&table)?;
    check_left_recursion(&table)?;

    let first = first_sets(&table);
    let alternative_first = table
        .iter()
        .map(|alternatives| {
            alternatives
                .unwrap_or(&[])
                .iter()
                .map(|alt| match alt.symbols.first() {
                    Some(symbol) if !is_infix(alt) => symbol_first(symbol, &first),
                    _ => TokenSet::EMPTY,
                })
                .collect()
        })
        .collect();
    check_lookaheads(&table, &first)?;

    let blocks = block_forms(&table)?;
    let mut sync = TokenSet::EMPTY;
    for form in &blocks {
        sync = sync.union(form.open);
        sync.insert(form.close);
    }

    Ok(Grammar {
        productions: table.iter().map(|alts| alts.unwrap_or(&[])).collect(),
        first,
        alternative_first,
        prefix,
        infix,
        blocks,
        sync,
    })
}

/// Productions a symbol parses through.
fn referenced(symbol: &Symbol, out: &mut Vec<Production>) {
    match *symbol {
        Symbol::Rule(p) | Symbol::Sep(p, _) | Symbol::Items(p, _) => out.push(p),
        Symbol::Expr => out.push(Production::Expression),
        Symbol::Block(_) | Symbol::CaseBlock(_) => out.push(Production::Statement),
        Symbol::Hook(hook) => out.extend_from_slice(hook.uses()),
        Symbol::Opt(group) | Symbol::Many(group) => {
            for symbol in group {
                referenced(symbol, out);
            }
        }
        Symbol::Token(_) | Symbol::OneOf(_) | Symbol::Semi | Symbol::Close(_) => {}
    }
}

fn check_references(table: &Table) -> Result<(), GrammarError> {
    if table[Production::SourceFile as usize].is_none() {
        return Err(GrammarError::MissingRoot);
    }
    let mut uses = Vec::new();
    for &production in Production::ALL {
        let Some(alternatives) = table[production as usize] else {
            continue;
        };
        for alt in alternatives {
            uses.clear();
            for symbol in alt.symbols {
                referenced(symbol, &mut uses);
            }
            if let Some(&missing) = uses.iter().find(|p| table[**p as usize].is_none()) {
                return Err(GrammarError::MissingProduction {
                    missing,
                    referenced_by: production,
                });
            }
        }
    }
    Ok(())
}

fn is_infix(alt: &Alternative) -> bool {
    alt.prec.is_some() && matches!(alt.symbols.first(), Some(Symbol::Expr))
}

fn operator_tokens(symbol: &'static Symbol) -> Option<&'static [TokenKind]> {
    match symbol {
        Symbol::Token(kind) => Some(std::slice::from_ref(kind)),
        Symbol::OneOf(kinds) => Some(kinds),
        _ => None,
    }
}

type OperatorMap = FxHashMap<TokenKind, Operator>;

fn collect_operators(table: &Table) -> Result<(OperatorMap, OperatorMap), GrammarError> {
    let mut prefix = OperatorMap::default();
    let mut infix = OperatorMap::default();

    for &production in Production::ALL {
        let Some(alternatives) = table[production as usize] else {
            continue;
        };
        for (index, alt) in alternatives.iter().enumerate() {
            let Some(prec) = alt.prec else { continue };
            let malformed = GrammarError::MalformedOperator {
                production,
                alternative: index,
            };
            let (Some(node), Production::Expression) = (alt.node, production) else {
                return Err(malformed);
            };
            let (fixity, tokens, map) = match alt.symbols {
                [Symbol::Expr, op, Symbol::Expr] => (Fixity::Infix, operator_tokens(op), &mut infix),
                [op, Symbol::Expr] => (Fixity::Prefix, operator_tokens(op), &mut prefix),
                _ => return Err(malformed),
            };
            let Some(tokens) = tokens.filter(|tokens| !tokens.is_empty()) else {
                return Err(malformed);
            };
            for &token in tokens {
                let operator = Operator {
                    token,
                    fixity,
                    prec,
                    node,
                };
                if map.insert(token, operator).is_some() {
                    return Err(GrammarError::DuplicateOperator {
                        token: SyntaxKind::from(token),
                        fixity,
                    });
                }
            }
        }
    }
    Ok((prefix, infix))
}

fn check_productive(table: &Table) -> Result<(), GrammarError> {
    let mut productive = vec![false; table.len()];
    let mut changed = true;
    while changed {
        changed = false;
        for &production in Production::ALL {
            let idx = production as usize;
            if productive[idx] {
                continue;
            }
            let Some(alternatives) = table[idx] else {
                continue;
            };
            if alternatives
                .iter()
                .any(|alt| alt.symbols.iter().all(|s| symbol_productive(s, &productive)))
            {
                productive[idx] = true;
                changed = true;
            }
        }
    }

    match Production::ALL
        .iter()
        .find(|p| table[**p as usize].is_some() && !productive[**p as usize])
    {
        Some(&production) => Err(GrammarError::Unproductive(production)),
        None => Ok(()),
    }
}

fn symbol_productive(symbol: &Symbol, productive: &[bool]) -> bool {
    match *symbol {
        Symbol::Token(_) | Symbol::Semi | Symbol::Close(_) | Symbol::Hook(_) => true,
        Symbol::OneOf(kinds) => !kinds.is_empty(),
        Symbol::Rule(p) | Symbol::Sep(p, _) => productive[p as usize],
        Symbol::Expr => productive[Production::Expression as usize],
        Symbol::Opt(_)
        | Symbol::Many(_)
        | Symbol::Block(_)
        | Symbol::CaseBlock(_)
        | Symbol::Items(..) => true,
    }
}

/// Production entered before any token is consumed, if any.
fn leading_production(alt: &Alternative) -> Option<Production> {
    if alt.prec.is_some() {
        return None;
    }
    match alt.symbols.first()? {
        Symbol::Rule(p) | Symbol::Sep(p, _) | Symbol::Items(p, _) => Some(*p),
        Symbol::Expr => Some(Production::Expression),
        Symbol::Block(_) | Symbol::CaseBlock(_) => Some(Production::Statement),
        _ => None,
    }
}

fn check_left_recursion(table: &Table) -> Result<(), GrammarError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        Active,
        Done,
    }

    fn visit(table: &Table, marks: &mut [Mark], production: Production) -> Result<(), GrammarError> {
        match marks[production as usize] {
            Mark::Done => return Ok(()),
            Mark::Active => return Err(GrammarError::LeftRecursion(production)),
            Mark::Unvisited => {}
        }
        marks[production as usize] = Mark::Active;
        for alt in table[production as usize].unwrap_or(&[]) {
            if let Some(next) = leading_production(alt) {
                visit(table, marks, next)?;
            }
        }
        marks[production as usize] = Mark::Done;
        Ok(())
    }

    let mut marks = vec![Mark::Unvisited; table.len()];
    for &production in Production::ALL {
        visit(table, &mut marks, production)?;
    }
    Ok(())
}

fn symbol_first(symbol: &Symbol, first: &[TokenSet]) -> TokenSet {
    match *symbol {
        Symbol::Token(kind) | Symbol::Close(kind) => TokenSet::new(&[kind]),
        Symbol::OneOf(kinds) => TokenSet::new(kinds),
        Symbol::Rule(p) | Symbol::Sep(p, _) | Symbol::Items(p, _) => first[p as usize],
        Symbol::Expr => first[Production::Expression as usize],
        Symbol::Block(_) | Symbol::CaseBlock(_) => first[Production::Statement as usize],
        Symbol::Semi => TokenSet::new(&[TokenKind::Semicolon]),
        Symbol::Hook(hook) => hook.first(),
        Symbol::Opt(group) | Symbol::Many(group) => group
            .first()
            .map_or(TokenSet::EMPTY, |symbol| symbol_first(symbol, first)),
    }
}

fn first_sets(table: &Table) -> Vec<TokenSet> {
    let mut first = vec![TokenSet::EMPTY; table.len()];
    let mut changed = true;
    while changed {
        changed = false;
        for &production in Production::ALL {
            let mut set = first[production as usize];
            for alt in table[production as usize].unwrap_or(&[]) {
                if is_infix(alt) {
                    continue;
                }
                if let Some(symbol) = alt.symbols.first() {
                    set = set.union(symbol_first(symbol, &first));
                }
            }
            if set != first[production as usize] {
                first[production as usize] = set;
                changed = true;
            }
        }
    }
    first
}

fn is_nullable(symbol: &Symbol) -> bool {
    matches!(
        symbol,
        Symbol::Opt(_) | Symbol::Many(_) | Symbol::Block(_) | Symbol::CaseBlock(_) | Symbol::Items(..)
    )
}

fn check_group(symbols: &[Symbol], first: &[TokenSet]) -> Result<(), &'static str> {
    let Some(head) = symbols.first() else {
        return Err("a group is empty");
    };
    if is_nullable(head) {
        return Err("a group can start without consuming a token");
    }
    if symbol_first(head, first).is_empty() {
        return Err("a group can never start");
    }
    for symbol in symbols {
        if let Symbol::Opt(group) | Symbol::Many(group) = symbol {
            check_group(group, first)?;
        }
    }
    Ok(())
}

fn check_lookaheads(table: &Table, first: &[TokenSet]) -> Result<(), GrammarError> {
    let expression_first = first[Production::Expression as usize];
    for &production in Production::ALL {
        for (index, alt) in table[production as usize].unwrap_or(&[]).iter().enumerate() {
            if is_infix(alt) {
                continue;
            }
            let mismatch = |reason| GrammarError::LookaheadMismatch {
                production,
                alternative: index,
                reason,
            };
            // The root is entered unconditionally, so only its groups matter.
            let result = if production == Production::SourceFile {
                alt.symbols.iter().try_for_each(|symbol| match symbol {
                    Symbol::Opt(group) | Symbol::Many(group) => check_group(group, first),
                    _ => Ok(()),
                })
            } else {
                check_group(alt.symbols, first)
            };
            result.map_err(mismatch)?;

            if let Some(base) = alt.lookahead.base(expression_first) {
                let starts = alt
                    .symbols
                    .first()
                    .map_or(TokenSet::EMPTY, |symbol| symbol_first(symbol, first));
                if !starts.intersects(&base) {
                    return Err(mismatch("the lookahead condition can never hold"));
                }
            }
        }
    }
    Ok(())
}

fn block_forms(table: &Table) -> Result<Vec<BlockForm>, GrammarError> {
    let mut forms: Vec<BlockForm> = Vec::new();
    for &production in Production::ALL {
        for alt in table[production as usize].unwrap_or(&[]) {
            let Some(node) = alt.node else { continue };
            let open = match alt.symbols.first() {
                Some(Symbol::Token(kind)) if kind.is_keyword() => TokenSet::new(&[*kind]),
                Some(Symbol::OneOf(kinds)) if kinds.iter().all(|k| k.is_keyword()) => {
                    TokenSet::new(kinds)
                }
                _ => continue,
            };
            for symbol in alt.symbols {
                let Symbol::Close(close) = *symbol else {
                    continue;
                };
                if !close.is_keyword() {
                    continue;
                }
                if let Some(existing) = forms.iter().find(|form| form.close == close) {
                    return Err(GrammarError::DuplicateClose {
                        close: SyntaxKind::from(close),
                        first: existing.node,
                        second: node,
                    });
                }
                forms.push(BlockForm { open, close, node });
            }
        }
    }
    Ok(forms)
}

#[cfg(test)]
mod tests {
    use super::super::{Alternative as A, Assoc, Hook, Lookahead, Production as P, Symbol as S};
    use super::*;
    use crate::lexer::TokenKind as T;
    use crate::syntax::SyntaxKind as K;

    const ROOT: &[A] = &[A::node(K::SourceFile, &[S::Items(P::Statement, &[])])];
    const EMPTY_STATEMENT: &[A] = &[A::node(K::EmptyStmt, &[S::Token(T::Semicolon)])];
    const PRIMARY_ONLY: &[A] = &[A::inline(&[S::Hook(Hook::Primary)])];
    const ARG_LIST: &[A] = &[A::node(
        K::ArgList,
        &[S::Token(T::LParen), S::Close(T::RParen)],
    )];

    #[test]
    fn rejects_missing_root() {
        assert_eq!(
            Grammar::new(&[(P::Statement, EMPTY_STATEMENT)]).unwrap_err(),
            GrammarError::MissingRoot
        );
    }

    #[test]
    fn rejects_undefined_reference() {
        const STATEMENT: &[A] = &[A::node(K::ExprStmt, &[S::Expr, S::Semi])];
        let err = Grammar::new(&[(P::SourceFile, ROOT), (P::Statement, STATEMENT)]).unwrap_err();
        assert_eq!(
            err,
            GrammarError::MissingProduction {
                missing: P::Expression,
                referenced_by: P::Statement,
            }
        );
        assert_eq!(
            err.to_string(),
            "production `expression` is used by `statement` but never defined"
        );
    }

    #[test]
    fn rejects_duplicate_definition() {
        let err = Grammar::new(&[
            (P::SourceFile, ROOT),
            (P::Statement, EMPTY_STATEMENT),
            (P::Statement, EMPTY_STATEMENT),
        ])
        .unwrap_err();
        assert_eq!(err, GrammarError::DuplicateProduction(P::Statement));
    }

    #[test]
    fn rejects_left_recursion() {
        const STATEMENT: &[A] = &[
            A::node(K::ExprStmt, &[S::Rule(P::Statement), S::Token(T::Semicolon)]),
            A::node(K::EmptyStmt, &[S::Token(T::Semicolon)]),
        ];
        let err = Grammar::new(&[(P::SourceFile, ROOT), (P::Statement, STATEMENT)]).unwrap_err();
        assert_eq!(err, GrammarError::LeftRecursion(P::Statement));
    }

    #[test]
    fn rejects_unproductive_production() {
        const STATEMENT: &[A] = &[A::node(
            K::IfStmt,
            &[S::Token(T::KwIf), S::Rule(P::Statement)],
        )];
        let err = Grammar::new(&[(P::SourceFile, ROOT), (P::Statement, STATEMENT)]).unwrap_err();
        assert_eq!(err, GrammarError::Unproductive(P::Statement));
    }

    #[test]
    fn rejects_lookahead_that_never_holds() {
        const STATEMENT: &[A] = &[
            A::node(K::EmptyStmt, &[S::Token(T::Semicolon)]).when(Lookahead::Label),
        ];
        let err = Grammar::new(&[(P::SourceFile, ROOT), (P::Statement, STATEMENT)]).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::LookaheadMismatch {
                production: P::Statement,
                alternative: 0,
                ..
            }
        ));
    }

    #[test]
    fn rejects_alternative_starting_with_optional_group() {
        const STATEMENT: &[A] = &[A::node(
            K::ReturnStmt,
            &[S::Opt(&[S::Token(T::KwReturn)]), S::Semi],
        )];
        let err = Grammar::new(&[(P::SourceFile, ROOT), (P::Statement, STATEMENT)]).unwrap_err();
        assert!(matches!(err, GrammarError::LookaheadMismatch { .. }));
    }

    #[test]
    fn rejects_duplicate_operator() {
        const STATEMENT: &[A] = &[A::node(K::ExprStmt, &[S::Expr, S::Semi])];
        const EXPRESSION: &[A] = &[
            A::node(K::BinaryExpr, &[S::Expr, S::Token(T::Plus), S::Expr]).prec(1, Assoc::Left),
            A::node(K::BinaryExpr, &[S::Expr, S::OneOf(&[T::Minus, T::Plus]), S::Expr])
                .prec(2, Assoc::Left),
            A::inline(&[S::Hook(Hook::Primary)]),
        ];
        let err = Grammar::new(&[
            (P::SourceFile, ROOT),
            (P::Statement, STATEMENT),
            (P::Expression, EXPRESSION),
            (P::ArgList, ARG_LIST),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GrammarError::DuplicateOperator {
                token: K::Plus,
                fixity: Fixity::Infix,
            }
        );
    }

    #[test]
    fn prefix_and_infix_may_share_a_token() {
        const STATEMENT: &[A] = &[A::node(K::ExprStmt, &[S::Expr, S::Semi])];
        const EXPRESSION: &[A] = &[
            A::node(K::BinaryExpr, &[S::Expr, S::Token(T::Minus), S::Expr]).prec(1, Assoc::Left),
            A::node(K::UnaryExpr, &[S::Token(T::Minus), S::Expr]).prec(2, Assoc::Left),
            A::inline(&[S::Hook(Hook::Primary)]),
        ];
        let grammar = Grammar::new(&[
            (P::SourceFile, ROOT),
            (P::Statement, STATEMENT),
            (P::Expression, EXPRESSION),
            (P::ArgList, ARG_LIST),
        ])
        .unwrap();
        assert!(grammar.prefix_operator(T::Minus).is_some());
        assert!(grammar.infix_operator(T::Minus).is_some());
        assert!(grammar.first(P::Expression).contains(T::Minus));
    }

    #[test]
    fn rejects_malformed_operator() {
        const STATEMENT: &[A] = &[A::node(K::ExprStmt, &[S::Expr, S::Semi])];
        const EXPRESSION: &[A] = &[
            A::node(K::BinaryExpr, &[S::Expr, S::Expr]).prec(1, Assoc::Left),
            A::inline(&[S::Hook(Hook::Primary)]),
        ];
        let err = Grammar::new(&[
            (P::SourceFile, ROOT),
            (P::Statement, STATEMENT),
            (P::Expression, EXPRESSION),
            (P::ArgList, ARG_LIST),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            GrammarError::MalformedOperator {
                production: P::Expression,
                alternative: 0,
            }
        );
    }

    #[test]
    fn rejects_shared_closing_keyword() {
        const STATEMENT: &[A] = &[
            A::node(K::IfStmt, &[S::Token(T::KwIf), S::Close(T::KwEndIf)]),
            A::node(K::WhileStmt, &[S::Token(T::KwWhile), S::Close(T::KwEndIf)]),
        ];
        let err = Grammar::new(&[(P::SourceFile, ROOT), (P::Statement, STATEMENT)]).unwrap_err();
        assert_eq!(
            err,
            GrammarError::DuplicateClose {
                close: K::KwEndIf,
                first: K::IfStmt,
                second: K::WhileStmt,
            }
        );
    }

    #[test]
    fn minimal_grammar_derives_sync_set() {
        const STATEMENT: &[A] = &[
            A::node(
                K::WhileStmt,
                &[
                    S::Token(T::KwWhile),
                    S::Block(&[T::KwEndWhile]),
                    S::Close(T::KwEndWhile),
                ],
            ),
            A::node(K::EmptyStmt, &[S::Token(T::Semicolon)]),
        ];
        let grammar = Grammar::new(&[(P::SourceFile, ROOT), (P::Statement, STATEMENT)]).unwrap();
        assert!(grammar.is_sync(T::KwWhile));
        assert!(grammar.is_sync(T::KwEndWhile));
        assert!(!grammar.is_sync(T::Semicolon));
        assert_eq!(grammar.block_forms().len(), 1);
    }
}
