mod common;
use common::*;

use st_syntax::grammar::{Alternative, Fixity, Symbol, STRUCTURED_TEXT};
use st_syntax::{Grammar, GrammarError, ParserConfig, Production, TokenKind};

#[test]
fn empty_table_has_no_root() {
    assert_eq!(Grammar::new(&[]).unwrap_err(), GrammarError::MissingRoot);
}

#[test]
fn built_in_table_is_valid() {
    let grammar = Grammar::structured_text().unwrap();
    assert_eq!(grammar.version(), st_syntax::grammar::GRAMMAR_VERSION);
    for &production in Production::ALL {
        assert!(
            !grammar.alternatives(production).is_empty(),
            "{production} has no alternatives"
        );
    }
    assert!(grammar.first(Production::Statement).contains(TokenKind::KwIf));
    assert!(grammar.first(Production::Statement).contains(TokenKind::Ident));
    assert!(grammar.first(Production::Unit).contains(TokenKind::KwFunctionBlock));
}

#[test]
fn duplicate_definition_is_rejected() {
    let mut definitions = STRUCTURED_TEXT.to_vec();
    definitions.push(STRUCTURED_TEXT[0]);
    assert_eq!(
        Grammar::new(&definitions).unwrap_err(),
        GrammarError::DuplicateProduction(Production::SourceFile)
    );
}

#[test]
fn separately_built_grammar_parses_the_same() {
    let grammar = Grammar::new(STRUCTURED_TEXT).unwrap();
    let text = "PROGRAM p\nVAR a : INT; END_VAR\na := a ** 2 MOD 3;\nEND_PROGRAM\n";
    let tree = st_syntax::parse_with(text, &grammar, &ParserConfig::default());
    assert_eq!(tree, parse(text));
}

#[test]
fn operator_table_is_ordered() {
    let operators = st_syntax::grammar().operators();
    let prefix: Vec<_> = operators
        .iter()
        .filter(|op| op.fixity == Fixity::Prefix)
        .map(|op| op.token)
        .collect();
    assert_eq!(prefix.len(), 3);
    assert!(prefix.contains(&TokenKind::KwNot));

    let levels: Vec<_> = operators
        .iter()
        .filter(|op| op.fixity == Fixity::Infix)
        .map(|op| op.prec.level)
        .collect();
    assert!(levels.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(levels.first(), Some(&1));
    assert_eq!(levels.last(), Some(&8));

    let power = st_syntax::grammar().infix_operator(TokenKind::Power).unwrap();
    let (left, right) = power.binding_power();
    assert!(left > right);
    let minus = st_syntax::grammar().infix_operator(TokenKind::Minus).unwrap();
    let (left, right) = minus.binding_power();
    assert!(left < right);
}

#[test]
fn sync_set_holds_block_keywords() {
    let grammar = st_syntax::grammar();
    for kind in [
        TokenKind::KwIf,
        TokenKind::KwEndIf,
        TokenKind::KwProgram,
        TokenKind::KwEndProgram,
        TokenKind::KwVar,
        TokenKind::KwEndVar,
    ] {
        assert!(grammar.is_sync(kind), "{kind:?}");
    }
    assert!(!grammar.is_sync(TokenKind::KwThen));
    assert!(!grammar.is_sync(TokenKind::Ident));
    assert!(!grammar.is_sync(TokenKind::Semicolon));
}

#[test]
fn tiny_grammar_drives_the_engine() {
    const ROOT: &[Alternative] = &[Alternative::node(
        SyntaxKind::SourceFile,
        &[Symbol::Items(Production::Statement, &[])],
    )];
    const STATEMENT: &[Alternative] = &[Alternative::node(
        SyntaxKind::EmptyStmt,
        &[Symbol::Token(TokenKind::Semicolon)],
    )];
    let grammar =
        Grammar::new(&[(Production::SourceFile, ROOT), (Production::Statement, STATEMENT)]).unwrap();

    let tree = st_syntax::parse_with(";;", &grammar, &ParserConfig::default());
    assert!(tree.ok());
    assert_eq!(
        child_kinds(&tree.root()),
        vec![SyntaxKind::EmptyStmt, SyntaxKind::EmptyStmt]
    );

    let text = "; x y;";
    let tree = st_syntax::parse_with(text, &grammar, &ParserConfig::default());
    assert_eq!(tree.text(), text);
    assert_eq!(
        child_kinds(&tree.root()),
        vec![SyntaxKind::EmptyStmt, SyntaxKind::Error, SyntaxKind::EmptyStmt]
    );
    assert_eq!(tree.errors().len(), 1);
    assert_eq!(tree.errors()[0].message, "expected statement");
    assert_eq!(tree.errors()[0].range, range(2, 5));
}
