//! Parsed syntax trees.
//!
//! A `SyntaxTree` is an immutable snapshot: the `rowan` green tree plus the
//! errors found while building it. Cloning is cheap and trees built by
//! re-parsing share every untouched green subtree with their predecessor.

use std::fmt::Write;

use rowan::{GreenNode, NodeOrToken, TokenAtOffset};
use text_size::{TextRange, TextSize};

use crate::config::ParserConfig;
use crate::edit::Edit;
use crate::grammar::Grammar;
use crate::incremental::{self, ReparseStats};
use crate::parser::ParseError;
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

/// An immutable concrete syntax tree with its syntax errors.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    green: GreenNode,
    errors: Vec<ParseError>,
}

impl SyntaxTree {
    pub(crate) fn new(green: GreenNode, errors: Vec<ParseError>) -> Self {
        Self { green, errors }
    }

    /// Parses `text` with the built-in grammar.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        crate::parser::parse(text)
    }

    /// Returns the root syntax node.
    #[must_use]
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Returns the green root, shared with trees derived from this one.
    #[must_use]
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Returns the lexical and syntax errors, ordered by position.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns `true` if the source had no errors.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `true` if any error was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Length of the source text.
    #[must_use]
    pub fn len(&self) -> TextSize {
        self.green.text_len()
    }

    /// Returns `true` for an empty source.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == TextSize::from(0)
    }

    /// Reconstructs the source text.
    #[must_use]
    pub fn text(&self) -> String {
        self.root().text().to_string()
    }

    /// The innermost node whose range contains `offset`. At the end of the
    /// text this is the root.
    #[must_use]
    pub fn node_at_offset(&self, offset: TextSize) -> Option<SyntaxNode> {
        let root = self.root();
        if offset > self.len() {
            return None;
        }
        if offset == self.len() {
            return Some(root);
        }
        let mut node = root;
        loop {
            let child = node.children().find(|child| {
                let range = child.text_range();
                range.start() <= offset && offset < range.end()
            });
            match child {
                Some(child) => node = child,
                None => return Some(node),
            }
        }
    }

    /// The token covering `offset`. Between two tokens the right one wins.
    #[must_use]
    pub fn token_at_offset(&self, offset: TextSize) -> Option<SyntaxToken> {
        if offset > self.len() {
            return None;
        }
        match self.root().token_at_offset(offset) {
            TokenAtOffset::None => None,
            TokenAtOffset::Single(token) => Some(token),
            TokenAtOffset::Between(_, right) => Some(right),
        }
    }

    /// All nodes of `kind`, in document order.
    pub fn nodes_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = SyntaxNode> {
        self.root()
            .descendants()
            .filter(move |node| node.kind() == kind)
    }

    /// Re-parses after `edits` turned this tree's text into `new_text`.
    ///
    /// The edits are applied one after the other, each in the coordinates
    /// left by the previous one. The result equals a fresh parse of
    /// `new_text`.
    #[must_use]
    pub fn reparse(&self, new_text: &str, edits: &[Edit]) -> Self {
        self.reparse_with(
            new_text,
            edits,
            crate::grammar::grammar(),
            &ParserConfig::default(),
        )
        .0
    }

    /// Like [`SyntaxTree::reparse`], with an explicit grammar and
    /// configuration, also reporting how much of the tree was reused.
    #[must_use]
    pub fn reparse_with(
        &self,
        new_text: &str,
        edits: &[Edit],
        grammar: &Grammar,
        config: &ParserConfig,
    ) -> (Self, ReparseStats) {
        incremental::reparse(self, new_text, edits, grammar, config)
    }

    /// Indented dump of every node and significant token, followed by the
    /// errors.
    #[must_use]
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        dump_node(&self.root(), &mut out, 0);
        if !self.errors.is_empty() {
            out.push_str("---\n");
            for error in &self.errors {
                let _ = writeln!(out, "{error}");
            }
        }
        out
    }
}

/// Trees are equal when their green trees and errors are equal, whether or
/// not they share storage.
impl PartialEq for SyntaxTree {
    fn eq(&self, other: &Self) -> bool {
        self.green == other.green && self.errors == other.errors
    }
}

impl Eq for SyntaxTree {}

fn dump_node(node: &SyntaxNode, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{indent}{:?}@{:?}", node.kind(), node.text_range());
    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(child) => dump_node(&child, out, depth + 1),
            NodeOrToken::Token(token) => {
                if !token.kind().is_trivia() {
                    let _ = writeln!(
                        out,
                        "{indent}  {:?}@{:?} {:?}",
                        token.kind(),
                        token.text_range(),
                        token.text()
                    );
                }
            }
        }
    }
}

/// Error and missing markers on syntax nodes.
pub trait SyntaxNodeExt {
    /// `ERROR` node.
    fn is_error(&self) -> bool;
    /// Zero-width `MISSING` node.
    fn is_missing(&self) -> bool;
    /// Returns `true` if this node or a descendant is an error or missing
    /// node.
    fn has_errors(&self) -> bool;
}

impl SyntaxNodeExt for SyntaxNode {
    fn is_error(&self) -> bool {
        self.kind() == SyntaxKind::Error
    }

    fn is_missing(&self) -> bool {
        self.kind() == SyntaxKind::Missing
    }

    fn has_errors(&self) -> bool {
        self.descendants()
            .any(|node| node.is_error() || node.is_missing())
            || self
                .descendants_with_tokens()
                .any(|element| element.kind().is_lexical_error())
    }
}

/// Ranges of all nodes in `tree` in preorder, paired with their kinds.
/// Two trees with the same shape give the same list.
#[must_use]
pub fn node_ranges(tree: &SyntaxTree) -> Vec<(SyntaxKind, TextRange)> {
    tree.root()
        .descendants()
        .map(|node| (node.kind(), node.text_range()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_covers_whole_text() {
        for text in ["", "   ", "(* only a comment *)", "x := 1;\n\n"] {
            let tree = SyntaxTree::parse(text);
            assert_eq!(tree.root().text_range(), TextRange::up_to(tree.len()));
            assert_eq!(tree.text(), text);
        }
    }

    #[test]
    fn offset_lookups() {
        let tree = SyntaxTree::parse("x := 1 + y;");
        let node = tree.node_at_offset(9.into()).unwrap();
        assert_eq!(node.kind(), SyntaxKind::NameRef);
        let token = tree.token_at_offset(9.into()).unwrap();
        assert_eq!(token.text(), "y");
        // Between `x` and the space the token to the right is taken.
        let token = tree.token_at_offset(1.into()).unwrap();
        assert_eq!(token.kind(), SyntaxKind::Whitespace);
        assert_eq!(tree.node_at_offset(11.into()).unwrap().kind(), SyntaxKind::SourceFile);
        assert!(tree.node_at_offset(12.into()).is_none());
    }

    #[test]
    fn error_markers() {
        let tree = SyntaxTree::parse("x := ;");
        assert!(tree.has_errors());
        assert!(tree.root().has_errors());
        assert_eq!(
            tree.root().descendants().filter(SyntaxNodeExt::is_missing).count(),
            1
        );
        assert!(!SyntaxTree::parse("x := 1;").root().has_errors());
    }

    #[test]
    fn equality_is_structural() {
        let text = "IF a THEN b := 1; END_IF";
        assert_eq!(SyntaxTree::parse(text), SyntaxTree::parse(text));
        assert_ne!(SyntaxTree::parse(text), SyntaxTree::parse("IF a THEN b := 2; END_IF"));
    }
}
