//! Syntax tree types for IEC 61131-3 Structured Text.
//!
//! This module provides the `rowan`-based syntax tree implementation,
//! including the `SyntaxKind` enum that covers both tokens and composite nodes.

use crate::lexer::TokenKind;
use crate::token_kinds::for_each_token_kind;

macro_rules! define_syntax_kind {
    (
        @tokens [$($token:ident => $token_name:literal),*]
        @nodes [$($(#[$meta:meta])* $node:ident => $node_name:literal),* $(,)?]
    ) => {
        /// All syntax node and token kinds in IEC 61131-3 Structured Text.
        ///
        /// Token kinds come first and share their discriminants with
        /// `TokenKind`; composite node kinds follow.
        #[allow(missing_docs)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum SyntaxKind {
            $($token,)*
            $($(#[$meta])* $node,)*
        }

        const SYNTAX_KINDS: &[SyntaxKind] = &[
            $(SyntaxKind::$token,)*
            $(SyntaxKind::$node,)*
        ];

        impl SyntaxKind {
            /// Stable, human-readable identifier of this kind.
            ///
            /// Keywords and punctuation are named by their source text, every
            /// other kind by a snake_case id. Error and missing nodes are
            /// `ERROR` and `MISSING`.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$token => $token_name,)*
                    $(Self::$node => $node_name,)*
                }
            }
        }

        impl From<TokenKind> for SyntaxKind {
            fn from(kind: TokenKind) -> Self {
                match kind {
                    $(TokenKind::$token => SyntaxKind::$token,)*
                }
            }
        }
    };
    ($($token:ident => $token_name:literal),* $(,)?) => {
        define_syntax_kind! {
            @tokens [$($token => $token_name),*]
            @nodes [
                /// Root node of a source file
                SourceFile => "source_file",
                /// `PROGRAM name ... END_PROGRAM`
                Program => "program",
                /// `FUNCTION name : type ... END_FUNCTION`
                Function => "function",
                /// `FUNCTION_BLOCK name ... END_FUNCTION_BLOCK`
                FunctionBlock => "function_block",
                /// `CLASS name ... END_CLASS`
                Class => "class",
                /// `INTERFACE name ... END_INTERFACE`
                Interface => "interface",
                /// `METHOD name ... END_METHOD`
                Method => "method",
                /// `PROPERTY name : type ... END_PROPERTY`
                Property => "property",
                /// `GET ... END_GET`
                PropertyGet => "property_get",
                /// `SET ... END_SET`
                PropertySet => "property_set",
                /// `ACTION name ... END_ACTION`
                Action => "action",
                /// `NAMESPACE name ... END_NAMESPACE`
                Namespace => "namespace",
                /// `USING A.B;`
                UsingDirective => "using_directive",
                /// `CONFIGURATION name ... END_CONFIGURATION`
                Configuration => "configuration",
                /// `RESOURCE name ON cpu ... END_RESOURCE`
                Resource => "resource",
                /// `TASK name (INTERVAL := T#10ms);`
                TaskConfig => "task_config",
                /// `PROGRAM inst WITH task : Type;` inside a configuration
                ProgramConfig => "program_config",
                /// `EXTENDS Base`
                ExtendsClause => "extends_clause",
                /// `IMPLEMENTS I_A, I_B`
                ImplementsClause => "implements_clause",
                /// A declared name
                Name => "name",
                /// `A.B.C`
                QualifiedName => "qualified_name",

                /// `VAR ... END_VAR` and its storage-class variants
                VarBlock => "var_block",
                /// `a, b AT %IX0.0 : type := init;`
                VarDecl => "var_decl",
                /// `(a := 1, b := 2)`
                InitializerList => "initializer_list",
                /// `a := 1` inside an initializer list
                FieldInit => "field_init",
                /// `[1, 2, 3]`
                ArrayInitializer => "array_initializer",

                /// `TYPE ... END_TYPE`
                TypeDecl => "type_decl",
                /// `name : spec;` inside a type block
                TypeDef => "type_def",
                StructDef => "struct_def",
                UnionDef => "union_def",
                /// `(a, b := 2)` or `INT (a := 1)`
                EnumDef => "enum_def",
                EnumValue => "enum_value",
                /// `ARRAY[1..10] OF type`
                ArrayType => "array_type",
                /// `lo..hi`
                Subrange => "subrange",
                PointerType => "pointer_type",
                ReferenceType => "reference_type",
                /// `STRING[80]`
                StringType => "string_type",
                /// Elementary or named type, optionally constrained by a subrange
                TypeRef => "type_ref",

                /// Statement list of a body or branch
                StmtList => "stmt_list",
                AssignStmt => "assign_stmt",
                IfStmt => "if_stmt",
                ElsifBranch => "elsif_branch",
                ElseBranch => "else_branch",
                CaseStmt => "case_stmt",
                /// `1, 2..5: statements`
                CaseBranch => "case_branch",
                CaseLabel => "case_label",
                ForStmt => "for_stmt",
                WhileStmt => "while_stmt",
                RepeatStmt => "repeat_stmt",
                ReturnStmt => "return_stmt",
                ExitStmt => "exit_stmt",
                ContinueStmt => "continue_stmt",
                JmpStmt => "jmp_stmt",
                /// `label: statement`
                LabelStmt => "label_stmt",
                EmptyStmt => "empty_stmt",
                /// Invocation or other expression used as a statement
                ExprStmt => "expr_stmt",

                BinaryExpr => "binary_expr",
                UnaryExpr => "unary_expr",
                ParenExpr => "paren_expr",
                CallExpr => "call_expr",
                /// `(a, b := 1, q => out)`
                ArgList => "arg_list",
                Arg => "arg",
                IndexExpr => "index_expr",
                FieldExpr => "field_expr",
                DerefExpr => "deref_expr",
                /// `ADR(x)` or `REF(x)`
                AddrExpr => "addr_expr",
                SizeOfExpr => "sizeof_expr",
                NameRef => "name_ref",
                Literal => "literal",
                ThisExpr => "this_expr",
                SuperExpr => "super_expr",

                /// Run of tokens the grammar could not place
                Error => "ERROR",
                /// Zero-width stand-in for an expected construct
                Missing => "MISSING",
            ]
        }
    };
}

for_each_token_kind!(define_syntax_kind);

impl SyntaxKind {
    /// Returns `true` if this is a trivia kind.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment | Self::Pragma
        )
    }

    /// Returns `true` if this is a token kind (not a composite node).
    #[must_use]
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::Eof as u16)
    }

    /// Returns `true` if this is a composite node kind.
    #[must_use]
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Lexical error tokens: unterminated literals and invalid input.
    #[must_use]
    pub fn is_lexical_error(self) -> bool {
        matches!(
            self,
            Self::Invalid
                | Self::UnterminatedComment
                | Self::UnterminatedString
                | Self::UnterminatedBasedLiteral
                | Self::UnterminatedPragma
        )
    }

    /// Statement node kinds.
    #[must_use]
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            Self::AssignStmt
                | Self::IfStmt
                | Self::CaseStmt
                | Self::ForStmt
                | Self::WhileStmt
                | Self::RepeatStmt
                | Self::ReturnStmt
                | Self::ExitStmt
                | Self::ContinueStmt
                | Self::JmpStmt
                | Self::LabelStmt
                | Self::EmptyStmt
                | Self::ExprStmt
        )
    }

    /// Expression node kinds.
    #[must_use]
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            Self::BinaryExpr
                | Self::UnaryExpr
                | Self::ParenExpr
                | Self::CallExpr
                | Self::IndexExpr
                | Self::FieldExpr
                | Self::DerefExpr
                | Self::AddrExpr
                | Self::SizeOfExpr
                | Self::NameRef
                | Self::Literal
                | Self::ThisExpr
                | Self::SuperExpr
        )
    }

    /// Top-level program organisation units.
    #[must_use]
    pub fn is_unit(self) -> bool {
        matches!(
            self,
            Self::Program
                | Self::Function
                | Self::FunctionBlock
                | Self::Class
                | Self::Interface
                | Self::Namespace
                | Self::Configuration
                | Self::Method
                | Self::Property
                | Self::Action
                | Self::UsingDirective
        )
    }

    /// Description used in diagnostics: punctuation is quoted, keywords and
    /// named kinds are used as they are.
    #[must_use]
    pub fn describe(self) -> String {
        let name = self.name();
        if name.bytes().any(|b| b.is_ascii_alphabetic()) {
            name.to_string()
        } else {
            format!("'{name}'")
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// The language type for Structured Text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StLanguage {}

impl rowan::Language for StLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SYNTAX_KINDS
            .get(raw.0 as usize)
            .copied()
            .unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A syntax node in the ST syntax tree.
pub type SyntaxNode = rowan::SyntaxNode<StLanguage>;

/// A syntax token in the ST syntax tree.
pub type SyntaxToken = rowan::SyntaxToken<StLanguage>;

/// A syntax element (either node or token) in the ST syntax tree.
pub type SyntaxElement = rowan::SyntaxElement<StLanguage>;
