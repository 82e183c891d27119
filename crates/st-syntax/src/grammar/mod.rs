//! Grammar table for Structured Text.
//!
//! The grammar is plain data: every nonterminal is a [`Production`] with an
//! ordered list of [`Alternative`]s, and every alternative is a sequence of
//! [`Symbol`]s. The parser engine interprets this table; nothing about the
//! language is hard-coded in the engine except the operand parser behind
//! [`Hook::Primary`].
//!
//! A [`Grammar`] is immutable once built. Construction derives the operator
//! table, the FIRST sets used for alternative selection, the block forms and
//! the recovery set, and rejects self-contradictory tables with a
//! [`GrammarError`]. The Structured Text table is built once per process and
//! shared through [`grammar`].

mod check;
mod rules;
mod token_set;

pub use rules::STRUCTURED_TEXT;
pub use token_set::TokenSet;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::lexer::TokenKind;
use crate::syntax::SyntaxKind;

/// Version of the Structured Text grammar table.
///
/// Bumped whenever a change to the table can change the shape of trees.
pub const GRAMMAR_VERSION: u32 = 1;

macro_rules! productions {
    ($($(#[$meta:meta])* $variant:ident => $name:literal, $describe:literal;)*) => {
        /// Nonterminals of the grammar table.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Production {
            $($(#[$meta])* $variant,)*
        }

        impl Production {
            /// Every production, in declaration order.
            pub const ALL: &'static [Production] = &[$(Production::$variant,)*];

            /// Stable snake_case id.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Phrase used in "expected ..." diagnostics.
            #[must_use]
            pub fn describe(self) -> &'static str {
                match self {
                    $(Self::$variant => $describe,)*
                }
            }
        }
    };
}

productions! {
    /// Root of a file.
    SourceFile => "source_file", "declaration or statement";
    /// Unit or bare statement at file level.
    TopItem => "top_item", "declaration or statement";
    /// Program organisation unit or other file-level declaration.
    Unit => "unit", "declaration";
    Program => "program", "PROGRAM";
    Function => "function", "FUNCTION";
    FunctionBlock => "function_block", "FUNCTION_BLOCK";
    Class => "class", "CLASS";
    Interface => "interface", "INTERFACE";
    /// Variable block, method, property or action inside a unit.
    Member => "member", "member declaration";
    Method => "method", "METHOD";
    Property => "property", "PROPERTY";
    PropertyAccessor => "property_accessor", "GET or SET";
    Action => "action", "ACTION";
    Namespace => "namespace", "NAMESPACE";
    Using => "using", "USING";
    Configuration => "configuration", "CONFIGURATION";
    ConfigItem => "config_item", "configuration element";
    Resource => "resource", "RESOURCE";
    TaskConfig => "task_config", "TASK";
    ProgramConfig => "program_config", "program configuration";
    Extends => "extends", "EXTENDS";
    Implements => "implements", "IMPLEMENTS";
    Name => "name", "name";
    QualifiedName => "qualified_name", "name";
    /// Elementary type keyword or (qualified) type name.
    TypeName => "type_name", "type name";
    VarBlock => "var_block", "VAR block";
    VarDecl => "var_decl", "variable declaration";
    Initializer => "initializer", "initial value";
    FieldInit => "field_init", "field initializer";
    TypeDecl => "type_decl", "TYPE";
    TypeDef => "type_def", "type definition";
    /// Right-hand side of a type definition.
    TypeSpec => "type_spec", "type";
    EnumValue => "enum_value", "enumeration value";
    TypeRef => "type_ref", "type";
    Subrange => "subrange", "subrange";
    Statement => "statement", "statement";
    ElsifBranch => "elsif_branch", "ELSIF";
    ElseBranch => "else_branch", "ELSE";
    CaseBranch => "case_branch", "case branch";
    CaseLabel => "case_label", "case label";
    CaseElse => "case_else", "ELSE";
    /// Operator alternatives plus the operand hook.
    Expression => "expression", "expression";
    ArgList => "arg_list", "argument list";
    Arg => "arg", "argument";
}

impl std::fmt::Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One element of an alternative's right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Exactly this token.
    Token(TokenKind),
    /// Any one of these tokens.
    OneOf(&'static [TokenKind]),
    /// A nonterminal.
    Rule(Production),
    /// The group, when its first symbol matches.
    Opt(&'static [Symbol]),
    /// The group, repeated while its first symbol matches.
    Many(&'static [Symbol]),
    /// One or more of the production separated by the token.
    Sep(Production, TokenKind),
    /// A full expression, by precedence climbing over the operator table.
    Expr,
    /// Statement list wrapped in a `StmtList` node, ending before any of
    /// the terminators.
    Block(&'static [TokenKind]),
    /// Like `Block`, but also ends before a case label.
    CaseBlock(&'static [TokenKind]),
    /// Repeated production with recovery, ending before any of the
    /// terminators. An empty terminator list runs to end of input.
    Items(Production, &'static [TokenKind]),
    /// Statement terminator, inserted when it is unambiguously missing.
    Semi,
    /// Closing keyword of a block form.
    Close(TokenKind),
    /// Hand-written sub-grammar.
    Hook(Hook),
}

/// Hand-written sub-grammars the table delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Operand with postfix selectors: names, literals, parentheses,
    /// calls, indexing, field access and dereference.
    Primary,
}

impl Hook {
    /// Tokens the hook can start with.
    #[must_use]
    pub fn first(self) -> TokenSet {
        match self {
            Self::Primary => PRIMARY_FIRST,
        }
    }

    /// Productions the hook parses through.
    pub(crate) fn uses(self) -> &'static [Production] {
        match self {
            Self::Primary => &[Production::Expression, Production::ArgList],
        }
    }
}

const PRIMARY_FIRST: TokenSet = TokenSet::new(&[
    TokenKind::IntLiteral,
    TokenKind::RealLiteral,
    TokenKind::StringLiteral,
    TokenKind::WideStringLiteral,
    TokenKind::TimeLiteral,
    TokenKind::DateLiteral,
    TokenKind::TimeOfDayLiteral,
    TokenKind::DateAndTimeLiteral,
    TokenKind::KwTrue,
    TokenKind::KwFalse,
    TokenKind::KwNull,
    TokenKind::TypedLiteralPrefix,
    TokenKind::Ident,
    TokenKind::KwEn,
    TokenKind::KwEno,
    TokenKind::DirectAddress,
    TokenKind::LParen,
    TokenKind::KwThis,
    TokenKind::KwSuper,
    TokenKind::KwAdr,
    TokenKind::KwRef,
    TokenKind::KwSizeOf,
    TokenKind::KwNew,
    TokenKind::KwNewDunder,
    TokenKind::KwDeleteDunder,
]);

/// Extra condition an alternative needs besides its first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lookahead {
    /// The first token alone decides.
    First,
    /// `name :` (a jump label).
    Label,
    /// `:=` or `?=` at nesting level zero before the statement ends.
    Assignment,
    /// `:` at nesting level zero before the statement ends.
    CaseLabel,
    /// `name :=` or `name =>`.
    NamedArg,
    /// `NOT name =>`.
    NegatedOutput,
    /// `type (name ,` / `type (name :=` / `type (name )`.
    TypedEnum,
    /// `( name :=`.
    FieldInitList,
}

impl Lookahead {
    /// Tokens the predicate can hold on. An alternative whose FIRST set
    /// shares none of them can never be chosen.
    pub(crate) fn base(self, expression_first: TokenSet) -> Option<TokenSet> {
        const NAMES: TokenSet =
            TokenSet::new(&[TokenKind::Ident, TokenKind::KwEn, TokenKind::KwEno]);
        match self {
            Self::First => None,
            Self::Label | Self::NamedArg => Some(NAMES),
            Self::Assignment | Self::CaseLabel => Some(expression_first),
            Self::NegatedOutput => Some(TokenSet::new(&[TokenKind::KwNot])),
            Self::TypedEnum => Some(NAMES.union(rules::TYPE_KEYWORD_SET)),
            Self::FieldInitList => Some(TokenSet::new(&[TokenKind::LParen])),
        }
    }
}

/// Associativity of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assoc {
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a ** b ** c` is `a ** (b ** c)`.
    Right,
}

/// Precedence of an operator alternative. Higher levels bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precedence {
    /// Binding level.
    pub level: u8,
    /// Associativity among operators of the same level.
    pub assoc: Assoc,
}

/// One way to derive a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternative {
    /// Node wrapping the derivation, or `None` to splice it into the caller.
    pub node: Option<SyntaxKind>,
    /// Condition checked after the first token matches.
    pub lookahead: Lookahead,
    /// Right-hand side.
    pub symbols: &'static [Symbol],
    /// Operator precedence, for operator alternatives of `Expression`.
    pub prec: Option<Precedence>,
}

impl Alternative {
    /// Alternative producing a `kind` node.
    #[must_use]
    pub const fn node(kind: SyntaxKind, symbols: &'static [Symbol]) -> Self {
        Self {
            node: Some(kind),
            lookahead: Lookahead::First,
            symbols,
            prec: None,
        }
    }

    /// Alternative spliced into the enclosing node.
    #[must_use]
    pub const fn inline(symbols: &'static [Symbol]) -> Self {
        Self {
            node: None,
            lookahead: Lookahead::First,
            symbols,
            prec: None,
        }
    }

    /// Adds a lookahead condition.
    #[must_use]
    pub const fn when(self, lookahead: Lookahead) -> Self {
        Self { lookahead, ..self }
    }

    /// Marks an operator alternative.
    #[must_use]
    pub const fn prec(self, level: u8, assoc: Assoc) -> Self {
        Self {
            prec: Some(Precedence { level, assoc }),
            ..self
        }
    }
}

/// Whether an operator goes before or between its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// `NOT x`, `-x`.
    Prefix,
    /// `a + b`.
    Infix,
}

/// Entry of the operator table derived from `Expression`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    /// Operator token.
    pub token: TokenKind,
    /// Prefix or infix.
    pub fixity: Fixity,
    /// Precedence and associativity.
    pub prec: Precedence,
    /// Node produced.
    pub node: SyntaxKind,
}

impl Operator {
    /// Left and right binding power for precedence climbing.
    ///
    /// Prefix operators only use the right power.
    #[must_use]
    pub fn binding_power(&self) -> (u8, u8) {
        let base = self.prec.level * 2;
        match (self.fixity, self.prec.assoc) {
            (Fixity::Prefix, _) => (0, base),
            (Fixity::Infix, Assoc::Left) => (base, base + 1),
            (Fixity::Infix, Assoc::Right) => (base + 1, base),
        }
    }
}

/// An opener/closer pair such as `IF ... END_IF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockForm {
    /// Tokens opening the block.
    pub open: TokenSet,
    /// Keyword closing it.
    pub close: TokenKind,
    /// Node produced.
    pub node: SyntaxKind,
}

/// A grammar table that contradicts itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("production `{0}` is defined twice")]
    DuplicateProduction(Production),
    #[error("the grammar has no `source_file` production")]
    MissingRoot,
    #[error("production `{missing}` is used by `{referenced_by}` but never defined")]
    MissingProduction {
        missing: Production,
        referenced_by: Production,
    },
    #[error("production `{0}` cannot derive any finite token sequence")]
    Unproductive(Production),
    #[error("production `{0}` is left-recursive")]
    LeftRecursion(Production),
    #[error("alternative {alternative} of `{production}`: {reason}")]
    LookaheadMismatch {
        production: Production,
        alternative: usize,
        reason: &'static str,
    },
    #[error("alternative {alternative} of `{production}` has a precedence but is not an operator")]
    MalformedOperator {
        production: Production,
        alternative: usize,
    },
    #[error("{fixity:?} operator {token} is declared twice")]
    DuplicateOperator { token: SyntaxKind, fixity: Fixity },
    #[error("{close} closes both `{first}` and `{second}`")]
    DuplicateClose {
        close: SyntaxKind,
        first: SyntaxKind,
        second: SyntaxKind,
    },
}

/// An immutable, validated grammar table.
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<&'static [Alternative]>,
    first: Vec<TokenSet>,
    alternative_first: Vec<Vec<TokenSet>>,
    prefix: FxHashMap<TokenKind, Operator>,
    infix: FxHashMap<TokenKind, Operator>,
    blocks: Vec<BlockForm>,
    sync: TokenSet,
}

impl Grammar {
    /// Builds the Structured Text grammar.
    pub fn structured_text() -> Result<Self, GrammarError> {
        Self::new(STRUCTURED_TEXT)
    }

    /// Builds and validates a grammar from production definitions.
    pub fn new(definitions: &[(Production, &'static [Alternative])]) -> Result<Self, GrammarError> {
        check::build(definitions)
    }

    /// Version of the table layout this grammar was built from.
    #[must_use]
    pub fn version(&self) -> u32 {
        GRAMMAR_VERSION
    }

    /// Alternatives of `production` in priority order.
    #[must_use]
    pub fn alternatives(&self, production: Production) -> &'static [Alternative] {
        self.productions[production as usize]
    }

    /// Tokens that can start `production`.
    #[must_use]
    pub fn first(&self, production: Production) -> &TokenSet {
        &self.first[production as usize]
    }

    /// Tokens that can start one alternative of `production`.
    #[must_use]
    pub fn alternative_first(&self, production: Production, index: usize) -> &TokenSet {
        &self.alternative_first[production as usize][index]
    }

    /// Prefix operator starting with `token`.
    #[must_use]
    pub fn prefix_operator(&self, token: TokenKind) -> Option<&Operator> {
        self.prefix.get(&token)
    }

    /// Infix operator spelled `token`.
    #[must_use]
    pub fn infix_operator(&self, token: TokenKind) -> Option<&Operator> {
        self.infix.get(&token)
    }

    /// All operators, prefix first, each group ordered by precedence.
    #[must_use]
    pub fn operators(&self) -> Vec<Operator> {
        let mut prefix: Vec<_> = self.prefix.values().copied().collect();
        let mut infix: Vec<_> = self.infix.values().copied().collect();
        prefix.sort_by_key(|op| (op.prec.level, op.token));
        infix.sort_by_key(|op| (op.prec.level, op.token));
        prefix.extend(infix);
        prefix
    }

    /// Opener/closer pairs.
    #[must_use]
    pub fn block_forms(&self) -> &[BlockForm] {
        &self.blocks
    }

    /// Returns `true` if `token` opens a block form.
    #[must_use]
    pub fn opens_block(&self, token: TokenKind) -> bool {
        self.blocks.iter().any(|form| form.open.contains(token))
    }

    /// Returns `true` if `token` closes a block form.
    #[must_use]
    pub fn closes_block(&self, token: TokenKind) -> bool {
        self.blocks.iter().any(|form| form.close == token)
    }

    /// Statement-boundary tokens used to resynchronise after an error.
    #[must_use]
    pub fn sync_set(&self) -> &TokenSet {
        &self.sync
    }

    /// Returns `true` if `token` is a resynchronisation point.
    #[must_use]
    pub fn is_sync(&self, token: TokenKind) -> bool {
        self.sync.contains(token)
    }
}

static STRUCTURED_TEXT_GRAMMAR: Lazy<Grammar> = Lazy::new(|| match Grammar::structured_text() {
    Ok(grammar) => grammar,
    Err(err) => panic!("the Structured Text grammar table is invalid: {err}"),
});

/// The process-wide Structured Text grammar.
///
/// # Panics
///
/// Panics on first use if the built-in table fails validation; no parser
/// can exist without a valid table.
#[must_use]
pub fn grammar() -> &'static Grammar {
    &STRUCTURED_TEXT_GRAMMAR
}
