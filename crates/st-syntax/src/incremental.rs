//! Incremental re-parsing.
//!
//! After an edit the re-parser looks for the innermost node that contains
//! the whole change and can be parsed on its own: an expression directly
//! under a statement, a statement, a variable declaration or block, or a
//! top-level item. The node's region is lexed again from its start, parsed
//! from the same entry point the full parser would use there, and the
//! resulting green node is spliced into the old tree. Every other green
//! subtree is shared with the old tree.
//!
//! A candidate is only used when the splice provably gives the same tree
//! as a full parse. Whenever a check fails the next enclosing candidate is
//! tried, and when none is left the whole text is parsed again.

use rowan::NodeOrToken;
use text_size::{TextRange, TextSize};

use crate::config::ParserConfig;
use crate::edit::{self, ChangedRange, Edit};
use crate::grammar::{Grammar, Production};
use crate::lexer::{LineCol, Lexer, TokenKind};
use crate::parser::{self, Entry, ParseError};
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
use crate::tree::SyntaxTree;

/// How much of the old tree a re-parse kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReuseKind {
    /// The text did not change; the old tree was returned.
    Unchanged,
    /// One node of this kind was parsed again and spliced in.
    Subtree(SyntaxKind),
    /// The whole text was parsed again.
    FullParse,
}

/// Outcome of a re-parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReparseStats {
    /// What was reused.
    pub reuse: ReuseKind,
    /// Range of the new text that was parsed again.
    pub reparsed: TextRange,
    /// Number of tokens lexed again.
    pub relexed_tokens: usize,
}

impl ReparseStats {
    /// Returns `true` unless the whole text had to be parsed again.
    #[must_use]
    pub fn reused(&self) -> bool {
        self.reuse != ReuseKind::FullParse
    }
}

type Reparsed = (SyntaxTree, ReparseStats);

pub(crate) fn reparse(
    old: &SyntaxTree,
    new_text: &str,
    edits: &[Edit],
    grammar: &Grammar,
    config: &ParserConfig,
) -> Reparsed {
    let _span = tracing::debug_span!("reparse", edits = edits.len(), len = new_text.len()).entered();
    match try_reparse(old, new_text, edits, grammar, config) {
        Ok(reparsed) => reparsed,
        Err(reason) => {
            tracing::debug!(reason, "falling back to a full parse");
            full_parse(new_text, grammar, config)
        }
    }
}

fn full_parse(text: &str, grammar: &Grammar, config: &ParserConfig) -> Reparsed {
    let tokens: Vec<_> = Lexer::new(text).collect();
    let tree = parser::parse_tokens(&tokens, grammar, config);
    let stats = ReparseStats {
        reuse: ReuseKind::FullParse,
        reparsed: TextRange::up_to(tree.len()),
        relexed_tokens: tokens.len(),
    };
    (tree, stats)
}

fn try_reparse(
    old: &SyntaxTree,
    new_text: &str,
    edits: &[Edit],
    grammar: &Grammar,
    config: &ParserConfig,
) -> Result<Reparsed, &'static str> {
    if !config.incremental {
        return Err("incremental re-parsing is disabled");
    }

    let old_text = old.text();
    if edits.is_empty() {
        if old_text != new_text {
            return Err("text changed without an edit");
        }
        let stats = ReparseStats {
            reuse: ReuseKind::Unchanged,
            reparsed: TextRange::empty(TextSize::from(0)),
            relexed_tokens: 0,
        };
        return Ok((old.clone(), stats));
    }

    let change = edit::fold(edits).ok_or("malformed edit")?;
    check_change(&old_text, new_text, &change)?;

    let root = old.root();
    let innermost = match root.covering_element(change.old_range()) {
        NodeOrToken::Node(node) => node,
        NodeOrToken::Token(token) => token.parent().ok_or("edit outside the tree")?,
    };

    for node in innermost.ancestors() {
        let Some(entry) = entry_for(&node) else {
            continue;
        };
        match reparse_node(old, &node, entry, new_text, &change, grammar, config) {
            Ok(reparsed) => {
                tracing::debug!(kind = ?node.kind(), "re-parsed one node");
                return Ok(reparsed);
            }
            Err(reason) => tracing::trace!(kind = ?node.kind(), reason, "candidate rejected"),
        }
    }

    Err("no enclosing node can be re-parsed on its own")
}

/// Checks that the change describes how `old_text` became `new_text`.
fn check_change(old_text: &str, new_text: &str, change: &ChangedRange) -> Result<(), &'static str> {
    let old = old_text.as_bytes();
    let new = new_text.as_bytes();
    let start = usize::from(change.start);
    let old_end = usize::from(change.old_end);
    let new_end = usize::from(change.new_end);

    if old_end > old.len() || new_end > new.len() {
        return Err("edit out of bounds");
    }
    if old.len() as i64 + change.delta() != new.len() as i64 {
        return Err("edit does not match the new text length");
    }
    if old[..start] != new[..start] || old[old_end..] != new[new_end..] {
        return Err("text outside the edit changed");
    }
    Ok(())
}

/// Where the full parser enters `node`, if it can be parsed on its own.
fn entry_for(node: &SyntaxNode) -> Option<Entry> {
    let parent = node.parent()?;
    let kind = node.kind();
    let top_level = kind.is_unit()
        || kind.is_statement()
        || matches!(kind, SyntaxKind::TypeDecl | SyntaxKind::VarBlock);

    let entry = match parent.kind() {
        SyntaxKind::SourceFile if parent.parent().is_none() && top_level => {
            Entry::Rule(Production::TopItem)
        }
        SyntaxKind::Namespace if !kind.is_statement() && top_level => Entry::Rule(Production::Unit),
        SyntaxKind::StmtList if kind.is_statement() => {
            let in_case_branch = parent
                .parent()
                .is_some_and(|branch| branch.kind() == SyntaxKind::CaseBranch);
            if in_case_branch {
                Entry::CaseStatement
            } else {
                Entry::Rule(Production::Statement)
            }
        }
        parent_kind if parent_kind.is_statement() && kind.is_expression() => Entry::Expression,
        _ => match kind {
            SyntaxKind::VarDecl => Entry::Rule(Production::VarDecl),
            SyntaxKind::VarBlock => Entry::Rule(Production::VarBlock),
            _ => return None,
        },
    };
    Some(entry)
}

fn reparse_node(
    old: &SyntaxTree,
    node: &SyntaxNode,
    entry: Entry,
    new_text: &str,
    change: &ChangedRange,
    grammar: &Grammar,
    config: &ParserConfig,
) -> Result<Reparsed, &'static str> {
    let range = node.text_range();
    if change.start < range.start() || range.end() < change.old_end {
        return Err("edit is not inside the node");
    }

    let first = node.first_token().ok_or("empty node")?;
    let previous = first.prev_token();
    if !safe_boundary(previous.as_ref(), change.start > range.start()) {
        return Err("node does not start at a stable token boundary");
    }

    // Recovery before the node may have looked at its tokens, so errors
    // from the previous significant token on disqualify it.
    let guard_start = previous_significant(&first).map_or(TextSize::from(0), |t| t.text_range().start());
    let touches_error = old
        .errors()
        .iter()
        .any(|error| error.range.end() >= guard_start && error.range.start() <= range.end());
    if touches_error {
        return Err("node is next to a syntax error");
    }

    let start = range.start();
    let end = change.shift(range.end());
    let pos = LineCol::of_offset(new_text, start);
    let mut tokens = Vec::new();
    for token in Lexer::starting_at(new_text, start, pos) {
        if token.range.end() > end {
            return Err("re-lexed token crosses the node end");
        }
        let reached = token.range.end() == end;
        tokens.push(token);
        if reached {
            break;
        }
    }

    let (Some(new_first), Some(new_last)) = (tokens.first(), tokens.last()) else {
        return Err("node became empty");
    };
    if new_last.range.end() != end {
        return Err("re-lex did not reach the node end");
    }
    if new_first.kind.is_trivia() || new_last.kind.is_trivia() {
        return Err("node would start or end with trivia");
    }
    if SyntaxKind::from(new_first.kind) != first.kind() {
        return Err("first token changed kind");
    }
    if entry != Entry::Expression && !closes_node(grammar, new_last.kind) {
        return Err("node no longer ends with a terminator");
    }

    let depth = node.ancestors().skip(1).count().saturating_sub(1);
    let (green, errors) = parser::run(&tokens, grammar, config, depth, entry);
    if !errors.is_empty() {
        return Err("re-parsed node has errors");
    }

    let fragment = SyntaxNode::new_root(green);
    let mut children = fragment.children_with_tokens();
    let new_node = match (children.next(), children.next()) {
        (Some(NodeOrToken::Node(new_node)), None) => new_node,
        _ => return Err("re-parse did not give a single node"),
    };
    if new_node.kind() != node.kind() {
        return Err("node changed kind");
    }

    let green = node.replace_with(new_node.green().into_owned());
    let errors = shift_errors(old.errors(), range.end(), change);
    let stats = ReparseStats {
        reuse: ReuseKind::Subtree(node.kind()),
        reparsed: TextRange::new(start, end),
        relexed_tokens: tokens.len(),
    };
    Ok((SyntaxTree::new(green, errors), stats))
}

/// Lexing the new text gives a token boundary at the node start when the
/// token before it cannot absorb what follows.
fn safe_boundary(previous: Option<&SyntaxToken>, start_unchanged: bool) -> bool {
    match previous.map(SyntaxToken::kind) {
        None => true,
        Some(SyntaxKind::Semicolon | SyntaxKind::BlockComment | SyntaxKind::Pragma) => true,
        Some(SyntaxKind::Whitespace | SyntaxKind::LineComment) => start_unchanged,
        Some(_) => false,
    }
}

fn previous_significant(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut current = token.prev_token();
    while let Some(token) = current {
        if !token.kind().is_trivia() {
            return Some(token);
        }
        current = token.prev_token();
    }
    None
}

/// Tokens after which no parsing decision looks further ahead.
fn closes_node(grammar: &Grammar, kind: TokenKind) -> bool {
    kind == TokenKind::Semicolon || grammar.closes_block(kind)
}

fn shift_errors(errors: &[ParseError], node_end: TextSize, change: &ChangedRange) -> Vec<ParseError> {
    errors
        .iter()
        .map(|error| {
            if error.range.start() < node_end {
                return error.clone();
            }
            ParseError {
                message: error.message.clone(),
                range: TextRange::new(change.shift(error.range.start()), change.shift(error.range.end())),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::apply;
    use crate::grammar::grammar;

    fn reparse_replacing(text: &str, range: (u32, u32), with: &str) -> (SyntaxTree, SyntaxTree, ReparseStats) {
        let old = SyntaxTree::parse(text);
        let range = TextRange::new(range.0.into(), range.1.into());
        let (new_text, edit) = apply(text, range, with);
        let (tree, stats) = old.reparse_with(&new_text, &[edit], grammar(), &ParserConfig::default());
        assert_eq!(tree, SyntaxTree::parse(&new_text), "re-parse of {new_text:?}");
        (old, tree, stats)
    }

    #[test]
    fn expression_edit_reparses_only_the_expression() {
        let text = "a := 1;\nb := 2 + 3;\nc := 4;\n";
        let (old, new, stats) = reparse_replacing(text, (17, 18), "30");
        assert_eq!(stats.reuse, ReuseKind::Subtree(SyntaxKind::BinaryExpr));
        assert_eq!(stats.reparsed, TextRange::new(13.into(), 19.into()));

        let old_first = old.root().first_child().unwrap();
        let new_first = new.root().first_child().unwrap();
        assert!(std::ptr::eq(&*old_first.green(), &*new_first.green()));
    }

    #[test]
    fn edit_at_statement_start_uses_enclosing_block() {
        let text = "IF a THEN b := 1; END_IF\n";
        let (_, _, stats) = reparse_replacing(text, (10, 17), "b := 1; c := 2;");
        assert_eq!(stats.reuse, ReuseKind::Subtree(SyntaxKind::IfStmt));
    }

    #[test]
    fn kind_change_falls_back() {
        let text = "a := 1;\nb := 2;\n";
        let (_, _, stats) = reparse_replacing(text, (9, 14), "(x)");
        assert_eq!(stats.reuse, ReuseKind::FullParse);
    }

    #[test]
    fn errors_after_the_node_shift() {
        let text = "x := 1;\ny := ;\n";
        let (_, tree, stats) = reparse_replacing(text, (5, 6), "100");
        assert!(stats.reused());
        assert_eq!(tree.errors().len(), 1);
        assert_eq!(tree.errors()[0].range, TextRange::empty(14.into()));
    }

    #[test]
    fn unchanged_text_returns_old_tree() {
        let old = SyntaxTree::parse("x := 1;");
        let (tree, stats) = old.reparse_with("x := 1;", &[], grammar(), &ParserConfig::default());
        assert_eq!(stats.reuse, ReuseKind::Unchanged);
        assert_eq!(tree, old);
    }

    #[test]
    fn disabled_reuse_parses_everything() {
        let text = "x := 1;";
        let old = SyntaxTree::parse(text);
        let (new_text, edit) = apply(text, TextRange::new(5.into(), 6.into()), "2");
        let config = ParserConfig {
            incremental: false,
            ..ParserConfig::default()
        };
        let (tree, stats) = old.reparse_with(&new_text, &[edit], grammar(), &config);
        assert_eq!(stats.reuse, ReuseKind::FullParse);
        assert_eq!(tree, SyntaxTree::parse(&new_text));
    }

    #[test]
    fn lying_edit_falls_back() {
        let old = SyntaxTree::parse("x := 1;");
        let edit = Edit::replace("x := 1;", TextRange::new(5.into(), 6.into()), "2");
        let (tree, stats) = old.reparse_with("y := 2;", &[edit], grammar(), &ParserConfig::default());
        assert_eq!(stats.reuse, ReuseKind::FullParse);
        assert_eq!(tree, SyntaxTree::parse("y := 2;"));
    }
}
