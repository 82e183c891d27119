//! `st-syntax` - Lexer, grammar table, incremental parser and concrete syntax
//! tree for IEC 61131-3 Structured Text.
//!
//! - **Lexer**: Tokenizes source text into a restartable stream of tokens
//! - **Grammar**: Declarative, validated table of productions and operator levels
//! - **Parser**: Interprets the table into a lossless concrete syntax tree (CST)
//! - **Incremental re-parsing**: Re-derives only the edited part of a tree
//!
//! # Design Principles
//!
//! The syntax tree uses the `rowan` library, as in `rust-analyzer`:
//!
//! - **Lossless**: All source text is preserved, including whitespace and comments
//! - **Error-tolerant**: Parsing never fails and always covers the whole input
//! - **Shared**: Trees are immutable; re-parsing shares unchanged subtrees
//!
//! # Example
//!
//! ```
//! use st_syntax::edit::apply;
//! use st_syntax::{parse, SyntaxKind};
//! use text_size::TextRange;
//!
//! let text = "x := 1 + 2 * 3;";
//! let tree = parse(text);
//! assert!(tree.ok());
//! assert_eq!(tree.nodes_of_kind(SyntaxKind::BinaryExpr).count(), 2);
//!
//! let (new_text, edit) = apply(text, TextRange::new(14.into(), 15.into()), "4");
//! let new_tree = tree.reparse(&new_text, &[edit]);
//! assert_eq!(new_tree, parse(&new_text));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod edit;
pub mod grammar;
mod incremental;
pub mod lexer;
pub mod parser;
pub mod syntax;
mod token_kinds;
pub mod tree;

pub use config::{ConfigError, ParserConfig};
pub use edit::{Edit, Point};
pub use grammar::{grammar, Grammar, GrammarError, Production};
pub use incremental::{ReparseStats, ReuseKind};
pub use lexer::{lex, Lexer, LineCol, Token, TokenKind};
pub use parser::{parse, parse_with, ParseError};
pub use syntax::{StLanguage, SyntaxKind, SyntaxNode, SyntaxToken};
pub use tree::{SyntaxNodeExt, SyntaxTree};
