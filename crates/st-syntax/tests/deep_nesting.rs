mod common;
use common::*;

use st_syntax::{parse_with, ParserConfig};

fn nested_parens(depth: usize) -> String {
    format!("x := {}1{};\ny := 2;\n", "(".repeat(depth), ")".repeat(depth))
}

fn nested_ifs(depth: usize) -> String {
    format!(
        "{}x := 1;\n{}",
        "IF a THEN\n".repeat(depth),
        "END_IF\n".repeat(depth)
    )
}

fn too_deep(tree: &SyntaxTree) -> usize {
    tree.errors()
        .iter()
        .filter(|error| error.message == "nesting too deep")
        .count()
}

#[test]
fn parentheses_beyond_the_limit() {
    let config = ParserConfig::default().with_max_depth(16);
    let text = nested_parens(100);
    let tree = parse_with(&text, st_syntax::grammar(), &config);
    assert_eq!(tree.text(), text);
    assert_eq!(too_deep(&tree), 1);

    // The skipped run never swallows the next statement.
    let last = tree.root().children().last().unwrap();
    assert_eq!(last.kind(), SyntaxKind::AssignStmt);
    assert_eq!(last.text(), "y := 2;");
    assert!(!last.has_errors());
}

#[test]
fn nesting_within_the_limit_is_not_an_error() {
    let config = ParserConfig::default().with_max_depth(64);
    let tree = parse_with(&nested_parens(20), st_syntax::grammar(), &config);
    assert!(tree.ok(), "{:?}", tree.errors());
    assert_eq!(tree.nodes_of_kind(SyntaxKind::ParenExpr).count(), 20);
}

#[test]
fn statements_beyond_the_limit() {
    let config = ParserConfig::default().with_max_depth(32);
    let text = nested_ifs(1000);
    let tree = parse_with(&text, st_syntax::grammar(), &config);
    assert_eq!(tree.text(), text);
    assert!(too_deep(&tree) >= 1);
    assert!(tree.nodes_of_kind(SyntaxKind::IfStmt).count() < 32);
    // Every END_IF is accounted for, so nothing else is reported.
    assert_eq!(too_deep(&tree), tree.errors().len());
}

#[test]
fn default_limit_bounds_recursion() {
    // Runs on a thread with the usual main-thread stack so the default limit,
    // not the test harness, decides how deep the parser goes.
    let handle = std::thread::Builder::new()
        .stack_size(8 << 20)
        .spawn(|| {
            let text = format!("{}{}", nested_ifs(5_000), nested_parens(20_000));
            let tree = parse(&text);
            assert_eq!(tree.text(), text);
            assert!(too_deep(&tree) >= 2);
            assert_eq!(too_deep(&tree), tree.errors().len());
        })
        .unwrap();
    handle.join().unwrap();
}

#[test]
fn reparse_inside_deep_tree() {
    let config = ParserConfig::default().with_max_depth(32);
    let text = nested_ifs(10);
    let old = parse_with(&text, st_syntax::grammar(), &config);
    assert!(old.ok(), "{:?}", old.errors());
    let at = text.find("1;").unwrap() as u32;
    let (new_text, edit) = apply(&text, range(at, at + 1), "2");
    let (new, stats) = old.reparse_with(&new_text, &[edit], st_syntax::grammar(), &config);
    assert_eq!(new, parse_with(&new_text, st_syntax::grammar(), &config));
    assert!(stats.reused(), "{stats:?}");
}

#[test]
fn out_of_range_limits_are_clamped() {
    let handle = std::thread::Builder::new()
        .stack_size(8 << 20)
        .spawn(|| {
            let config = ParserConfig::default().with_max_depth(usize::MAX);
            let text = format!("{}{}", nested_ifs(200_000), nested_parens(200_000));
            let tree = parse_with(&text, st_syntax::grammar(), &config);
            assert_eq!(tree.text(), text);
            assert!(too_deep(&tree) >= 2);
        })
        .unwrap();
    handle.join().unwrap();

    // A limit below the minimum still leaves room for ordinary code.
    let config = ParserConfig::default().with_max_depth(0);
    let tree = parse_with(&nested_parens(3), st_syntax::grammar(), &config);
    assert!(tree.ok(), "{:?}", tree.errors());
}
