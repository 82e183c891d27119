//! Host-language adapter for the Structured Text parser.
//!
//! Hosts load the grammar once, parse documents into tree handles and feed
//! edits back as replacements. Everything crossing the boundary as text is
//! JSON.

#![forbid(unsafe_code)]
#![allow(missing_docs)]

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use st_syntax::edit::{self, Edit};
use st_syntax::{Grammar, GrammarError, ParserConfig, ReparseStats, ReuseKind, SyntaxNode, SyntaxTree};
use text_size::{TextRange, TextSize};
use thiserror::Error;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
use wasm_bindgen::prelude::wasm_bindgen;

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("grammar failed to load: {0}")]
    Grammar(#[from] GrammarError),
    #[error("edit {index} is out of bounds: {start}..{end} in a text of length {len}")]
    EditOutOfBounds {
        index: usize,
        start: u32,
        end: u32,
        len: u32,
    },
    #[error("edit {index} does not fall on character boundaries")]
    EditNotOnCharBoundary { index: usize },
    #[error("invalid {what} json: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type BindingResult<T> = Result<T, BindingError>;

/// A validated grammar, shared by every tree parsed with it.
#[derive(Debug, Clone)]
pub struct GrammarHandle {
    grammar: Arc<Grammar>,
    config: ParserConfig,
}

impl GrammarHandle {
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn version(&self) -> u32 {
        self.grammar.version()
    }
}

/// Builds and validates the Structured Text grammar table.
pub fn load_grammar() -> BindingResult<GrammarHandle> {
    let grammar = Grammar::structured_text()?;
    Ok(GrammarHandle {
        grammar: Arc::new(grammar),
        config: ParserConfig::default(),
    })
}

/// Parses `text` into a tree handle.
pub fn parse(grammar: &GrammarHandle, text: &str) -> TreeHandle {
    let tree = st_syntax::parse_with(text, &grammar.grammar, &grammar.config);
    TreeHandle {
        grammar: grammar.clone(),
        text: text.to_string(),
        tree,
    }
}

/// A parsed document together with its current text.
#[derive(Debug, Clone)]
pub struct TreeHandle {
    grammar: GrammarHandle,
    text: String,
    tree: SyntaxTree,
}

impl TreeHandle {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// Re-parses after `edits` turned the current text into `new_text`.
    pub fn edit(&mut self, new_text: &str, edits: &[Edit]) -> ReparseStats {
        let (tree, stats) =
            self.tree
                .reparse_with(new_text, edits, &self.grammar.grammar, &self.grammar.config);
        self.tree = tree;
        self.text = new_text.to_string();
        stats
    }

    /// Applies replacements one after the other, each in the coordinates
    /// left by the previous one, then re-parses.
    pub fn replace(&mut self, replacements: &[Replacement]) -> BindingResult<ReparseStats> {
        let mut text = self.text.clone();
        let mut edits = Vec::with_capacity(replacements.len());
        for (index, replacement) in replacements.iter().enumerate() {
            let range = replacement.range(index, &text)?;
            let (next, edit) = edit::apply(&text, range, &replacement.text);
            text = next;
            edits.push(edit);
        }
        Ok(self.edit(&text, &edits))
    }

    pub fn to_json(&self) -> BindingResult<String> {
        let document = DocumentJson {
            root: node_json(&self.tree.root()),
            errors: self
                .tree
                .errors()
                .iter()
                .map(|error| ErrorJson {
                    message: error.message.clone(),
                    start: error.range.start().into(),
                    end: error.range.end().into(),
                })
                .collect(),
        };
        serde_json::to_string(&document).map_err(|source| BindingError::Json {
            what: "tree",
            source,
        })
    }
}

/// One replacement sent by a host: bytes `start..end` become `text`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Replacement {
    pub start: u32,
    pub end: u32,
    pub text: String,
}

impl Replacement {
    fn range(&self, index: usize, text: &str) -> BindingResult<TextRange> {
        let len = u32::try_from(text.len()).unwrap_or(u32::MAX);
        if self.start > self.end || self.end > len {
            return Err(BindingError::EditOutOfBounds {
                index,
                start: self.start,
                end: self.end,
                len,
            });
        }
        if !text.is_char_boundary(self.start as usize) || !text.is_char_boundary(self.end as usize) {
            return Err(BindingError::EditNotOnCharBoundary { index });
        }
        Ok(TextRange::new(
            TextSize::from(self.start),
            TextSize::from(self.end),
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeJson {
    pub kind: String,
    pub start: u32,
    pub end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<NodeJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorJson {
    pub message: String,
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentJson {
    pub root: NodeJson,
    pub errors: Vec<ErrorJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditResultJson {
    pub reused: bool,
    pub reuse: String,
    pub reparsed_start: u32,
    pub reparsed_end: u32,
}

impl From<ReparseStats> for EditResultJson {
    fn from(stats: ReparseStats) -> Self {
        let reuse = match stats.reuse {
            ReuseKind::Unchanged => "unchanged".to_string(),
            ReuseKind::Subtree(kind) => kind.name().to_string(),
            ReuseKind::FullParse => "full_parse".to_string(),
        };
        Self {
            reused: stats.reused(),
            reuse,
            reparsed_start: stats.reparsed.start().into(),
            reparsed_end: stats.reparsed.end().into(),
        }
    }
}

fn node_json(node: &SyntaxNode) -> NodeJson {
    let range = node.text_range();
    let children = node
        .children_with_tokens()
        .map(|child| match child {
            rowan::NodeOrToken::Node(child) => node_json(&child),
            rowan::NodeOrToken::Token(token) => NodeJson {
                kind: token.kind().name().to_string(),
                start: token.text_range().start().into(),
                end: token.text_range().end().into(),
                text: Some(token.text().to_string()),
                children: Vec::new(),
            },
        })
        .collect();
    NodeJson {
        kind: node.kind().name().to_string(),
        start: range.start().into(),
        end: range.end().into(),
        text: None,
        children,
    }
}

#[cfg_attr(all(target_arch = "wasm32", feature = "wasm"), wasm_bindgen)]
pub struct WasmParser {
    tree: TreeHandle,
}

#[cfg_attr(all(target_arch = "wasm32", feature = "wasm"), wasm_bindgen)]
impl WasmParser {
    #[cfg_attr(
        all(target_arch = "wasm32", feature = "wasm"),
        wasm_bindgen(constructor)
    )]
    pub fn new(text: &str) -> Result<WasmParser, String> {
        let grammar = load_grammar()?;
        Ok(Self {
            tree: parse(&grammar, text),
        })
    }

    #[cfg_attr(
        all(target_arch = "wasm32", feature = "wasm"),
        wasm_bindgen(js_name = treeJson)
    )]
    pub fn tree_json(&self) -> Result<String, String> {
        Ok(self.tree.to_json()?)
    }

    #[cfg_attr(
        all(target_arch = "wasm32", feature = "wasm"),
        wasm_bindgen(js_name = applyEditsJson)
    )]
    pub fn apply_edits_json(&mut self, edits_json: &str) -> Result<String, String> {
        let replacements: Vec<Replacement> =
            serde_json::from_str(edits_json).map_err(|source| BindingError::Json {
                what: "edits",
                source,
            })?;
        let stats = self.tree.replace(&replacements)?;
        json_string(&EditResultJson::from(stats))
    }

    pub fn text(&self) -> String {
        self.tree.text().to_string()
    }
}

impl From<BindingError> for String {
    fn from(value: BindingError) -> Self {
        value.to_string()
    }
}

fn json_string<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|err| format!("json serialization failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacements_are_sequential() {
        let grammar = load_grammar().expect("grammar");
        let mut tree = parse(&grammar, "x := 1;");
        tree.replace(&[
            Replacement {
                start: 5,
                end: 6,
                text: "10".to_string(),
            },
            Replacement {
                start: 7,
                end: 8,
                text: " y := 2;".to_string(),
            },
        ])
        .expect("replace");
        assert_eq!(tree.text(), "x := 10; y := 2;");
        assert_eq!(tree.tree(), &st_syntax::parse("x := 10; y := 2;"));
    }

    #[test]
    fn out_of_bounds_replacement_is_rejected() {
        let grammar = load_grammar().expect("grammar");
        let mut tree = parse(&grammar, "x := 1;");
        let err = tree
            .replace(&[Replacement {
                start: 3,
                end: 40,
                text: String::new(),
            }])
            .unwrap_err();
        assert!(matches!(err, BindingError::EditOutOfBounds { index: 0, .. }));
        assert_eq!(tree.text(), "x := 1;");
    }

    #[test]
    fn tree_json_names_kinds() {
        let parser = WasmParser::new("x := ;").expect("parser");
        let json: DocumentJson = serde_json::from_str(&parser.tree_json().expect("json")).expect("decode");
        assert_eq!(json.root.kind, "source_file");
        assert_eq!(json.root.end, 6);
        assert_eq!(json.errors.len(), 1);
    }
}
