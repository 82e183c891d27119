//! Shared helpers for parser and re-parser tests.
#![allow(dead_code, unused_imports)]

pub use st_syntax::edit::{apply, Edit};
pub use st_syntax::{parse, SyntaxKind, SyntaxNode, SyntaxNodeExt, SyntaxTree};
pub use text_size::{TextRange, TextSize};

/// Routes parser logs to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

/// Kinds of every node in preorder.
pub fn kinds(tree: &SyntaxTree) -> Vec<SyntaxKind> {
    tree.root().descendants().map(|node| node.kind()).collect()
}

/// The only node of `kind`.
pub fn single(tree: &SyntaxTree, kind: SyntaxKind) -> SyntaxNode {
    let mut nodes = tree.nodes_of_kind(kind);
    let node = nodes.next().unwrap_or_else(|| panic!("no {kind:?} in\n{}", tree.debug_dump()));
    assert!(nodes.next().is_none(), "more than one {kind:?} in\n{}", tree.debug_dump());
    node
}

/// Child node kinds of `node`.
pub fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.children().map(|child| child.kind()).collect()
}

/// Parses `text`, re-parses it after replacing `at` with `replacement` and
/// checks the result against a fresh parse of the new text.
pub fn check_reparse(text: &str, at: TextRange, replacement: &str) -> st_syntax::ReparseStats {
    init_tracing();
    let old = parse(text);
    let (new_text, edit) = apply(text, at, replacement);
    let (tree, stats) = old.reparse_with(
        &new_text,
        &[edit],
        st_syntax::grammar(),
        &st_syntax::ParserConfig::default(),
    );
    let fresh = parse(&new_text);
    assert_eq!(
        tree.debug_dump(),
        fresh.debug_dump(),
        "re-parse of {text:?} with {at:?} -> {replacement:?} diverged ({stats:?})"
    );
    assert_eq!(tree, fresh);
    stats
}

/// Byte offsets of every character boundary of `text`, end included.
pub fn boundaries(text: &str) -> Vec<u32> {
    text.char_indices()
        .map(|(idx, _)| idx as u32)
        .chain(std::iter::once(text.len() as u32))
        .collect()
}
