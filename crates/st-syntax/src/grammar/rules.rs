//! The Structured Text rule table.
//!
//! Alternatives are tried in order; the first whose FIRST set holds the
//! current token and whose lookahead condition holds wins. Operator
//! alternatives of `expression` are not tried this way: they feed the
//! operator table used by precedence climbing.

use super::{Alternative as A, Assoc, Hook, Lookahead, Production as P, Symbol as S, TokenSet};
use crate::lexer::TokenKind as T;
use crate::syntax::SyntaxKind as K;

const NAMES: &[T] = &[T::Ident, T::KwEn, T::KwEno];

const VAR_KEYWORDS: &[T] = &[
    T::KwVar,
    T::KwVarInput,
    T::KwVarOutput,
    T::KwVarInOut,
    T::KwVarTemp,
    T::KwVarGlobal,
    T::KwVarExternal,
    T::KwVarStat,
];

const VAR_QUALIFIERS: &[T] = &[T::KwConstant, T::KwRetain, T::KwNonRetain, T::KwPersistent];

const MODIFIERS: &[T] = &[
    T::KwPublic,
    T::KwPrivate,
    T::KwProtected,
    T::KwInternal,
    T::KwFinal,
    T::KwAbstract,
    T::KwOverride,
];

const TYPE_KEYWORDS: &[T] = &[
    T::KwBool,
    T::KwSInt,
    T::KwInt,
    T::KwDInt,
    T::KwLInt,
    T::KwUSInt,
    T::KwUInt,
    T::KwUDInt,
    T::KwULInt,
    T::KwReal,
    T::KwLReal,
    T::KwByte,
    T::KwWord,
    T::KwDWord,
    T::KwLWord,
    T::KwTime,
    T::KwLTime,
    T::KwDate,
    T::KwLDate,
    T::KwTimeOfDay,
    T::KwLTimeOfDay,
    T::KwDateAndTime,
    T::KwLDateAndTime,
    T::KwChar,
    T::KwWChar,
    T::KwAny,
    T::KwAnyDerived,
    T::KwAnyElementary,
    T::KwAnyMagnitude,
    T::KwAnyInt,
    T::KwAnyUnsigned,
    T::KwAnySigned,
    T::KwAnyReal,
    T::KwAnyNum,
    T::KwAnyDuration,
    T::KwAnyBit,
    T::KwAnyChars,
    T::KwAnyString,
    T::KwAnyChar,
    T::KwAnyDate,
];

pub(crate) const TYPE_KEYWORD_SET: TokenSet = TokenSet::new(TYPE_KEYWORDS);

// Files and units

const SOURCE_FILE: &[A] = &[A::node(K::SourceFile, &[S::Items(P::TopItem, &[])])];

const TOP_ITEM: &[A] = &[
    A::inline(&[S::Rule(P::Unit)]),
    A::inline(&[S::Rule(P::Statement)]),
];

const UNIT: &[A] = &[
    A::inline(&[S::Rule(P::Program)]),
    A::inline(&[S::Rule(P::Function)]),
    A::inline(&[S::Rule(P::FunctionBlock)]),
    A::inline(&[S::Rule(P::Class)]),
    A::inline(&[S::Rule(P::Interface)]),
    A::inline(&[S::Rule(P::Namespace)]),
    A::inline(&[S::Rule(P::Using)]),
    A::inline(&[S::Rule(P::Configuration)]),
    A::inline(&[S::Rule(P::Method)]),
    A::inline(&[S::Rule(P::Property)]),
    A::inline(&[S::Rule(P::Action)]),
    A::inline(&[S::Rule(P::TypeDecl)]),
    A::inline(&[S::Rule(P::VarBlock)]),
];

const PROGRAM: &[A] = &[A::node(
    K::Program,
    &[
        S::Token(T::KwProgram),
        S::Rule(P::Name),
        S::Many(&[S::Rule(P::Member)]),
        S::Block(&[T::KwEndProgram]),
        S::Many(&[S::Rule(P::Member)]),
        S::Close(T::KwEndProgram),
    ],
)];

const FUNCTION: &[A] = &[A::node(
    K::Function,
    &[
        S::Token(T::KwFunction),
        S::Rule(P::Name),
        S::Opt(&[S::Token(T::Colon), S::Rule(P::TypeRef)]),
        S::Many(&[S::Rule(P::Member)]),
        S::Block(&[T::KwEndFunction]),
        S::Close(T::KwEndFunction),
    ],
)];

const FUNCTION_BLOCK: &[A] = &[A::node(
    K::FunctionBlock,
    &[
        S::Token(T::KwFunctionBlock),
        S::Many(&[S::OneOf(MODIFIERS)]),
        S::Rule(P::Name),
        S::Opt(&[S::Rule(P::Extends)]),
        S::Opt(&[S::Rule(P::Implements)]),
        S::Many(&[S::Rule(P::Member)]),
        S::Block(&[T::KwEndFunctionBlock]),
        S::Many(&[S::Rule(P::Member)]),
        S::Close(T::KwEndFunctionBlock),
    ],
)];

const CLASS: &[A] = &[A::node(
    K::Class,
    &[
        S::Token(T::KwClass),
        S::Many(&[S::OneOf(MODIFIERS)]),
        S::Rule(P::Name),
        S::Opt(&[S::Rule(P::Extends)]),
        S::Opt(&[S::Rule(P::Implements)]),
        S::Many(&[S::Rule(P::Member)]),
        S::Close(T::KwEndClass),
    ],
)];

const INTERFACE: &[A] = &[A::node(
    K::Interface,
    &[
        S::Token(T::KwInterface),
        S::Rule(P::Name),
        S::Opt(&[S::Rule(P::Extends)]),
        S::Many(&[S::Rule(P::Member)]),
        S::Close(T::KwEndInterface),
    ],
)];

const MEMBER: &[A] = &[
    A::inline(&[S::Rule(P::VarBlock)]),
    A::inline(&[S::Rule(P::Method)]),
    A::inline(&[S::Rule(P::Property)]),
    A::inline(&[S::Rule(P::Action)]),
];

const METHOD: &[A] = &[A::node(
    K::Method,
    &[
        S::Token(T::KwMethod),
        S::Many(&[S::OneOf(MODIFIERS)]),
        S::Rule(P::Name),
        S::Opt(&[S::Token(T::Colon), S::Rule(P::TypeRef)]),
        S::Many(&[S::Rule(P::VarBlock)]),
        S::Block(&[T::KwEndMethod]),
        S::Close(T::KwEndMethod),
    ],
)];

const PROPERTY: &[A] = &[A::node(
    K::Property,
    &[
        S::Token(T::KwProperty),
        S::Many(&[S::OneOf(MODIFIERS)]),
        S::Rule(P::Name),
        S::Token(T::Colon),
        S::Rule(P::TypeRef),
        S::Many(&[S::Rule(P::PropertyAccessor)]),
        S::Close(T::KwEndProperty),
    ],
)];

const PROPERTY_ACCESSOR: &[A] = &[
    A::node(
        K::PropertyGet,
        &[
            S::Token(T::KwGet),
            S::Many(&[S::Rule(P::VarBlock)]),
            S::Block(&[T::KwEndGet]),
            S::Close(T::KwEndGet),
        ],
    ),
    A::node(
        K::PropertySet,
        &[
            S::Token(T::KwSet),
            S::Many(&[S::Rule(P::VarBlock)]),
            S::Block(&[T::KwEndSet]),
            S::Close(T::KwEndSet),
        ],
    ),
];

const ACTION: &[A] = &[A::node(
    K::Action,
    &[
        S::Token(T::KwAction),
        S::Rule(P::Name),
        S::Opt(&[S::Token(T::Colon)]),
        S::Block(&[T::KwEndAction]),
        S::Close(T::KwEndAction),
    ],
)];

const NAMESPACE: &[A] = &[A::node(
    K::Namespace,
    &[
        S::Token(T::KwNamespace),
        S::Rule(P::QualifiedName),
        S::Items(P::Unit, &[T::KwEndNamespace]),
        S::Close(T::KwEndNamespace),
    ],
)];

const USING: &[A] = &[A::node(
    K::UsingDirective,
    &[
        S::Token(T::KwUsing),
        S::Sep(P::QualifiedName, T::Comma),
        S::Semi,
    ],
)];

const CONFIGURATION: &[A] = &[A::node(
    K::Configuration,
    &[
        S::Token(T::KwConfiguration),
        S::Rule(P::Name),
        S::Items(P::ConfigItem, &[T::KwEndConfiguration]),
        S::Close(T::KwEndConfiguration),
    ],
)];

const CONFIG_ITEM: &[A] = &[
    A::inline(&[S::Rule(P::Resource)]),
    A::inline(&[S::Rule(P::VarBlock)]),
    A::inline(&[S::Rule(P::TaskConfig)]),
    A::inline(&[S::Rule(P::ProgramConfig)]),
];

const RESOURCE: &[A] = &[A::node(
    K::Resource,
    &[
        S::Token(T::KwResource),
        S::Rule(P::Name),
        S::Token(T::KwOn),
        S::Rule(P::QualifiedName),
        S::Items(P::ConfigItem, &[T::KwEndResource]),
        S::Close(T::KwEndResource),
    ],
)];

const TASK_CONFIG: &[A] = &[A::node(
    K::TaskConfig,
    &[
        S::Token(T::KwTask),
        S::Rule(P::Name),
        S::Opt(&[S::Rule(P::ArgList)]),
        S::Semi,
    ],
)];

const PROGRAM_CONFIG: &[A] = &[A::node(
    K::ProgramConfig,
    &[
        S::Token(T::KwProgram),
        S::Many(&[S::OneOf(VAR_QUALIFIERS)]),
        S::Rule(P::Name),
        S::Opt(&[S::Token(T::KwWith), S::Rule(P::QualifiedName)]),
        S::Token(T::Colon),
        S::Rule(P::QualifiedName),
        S::Opt(&[S::Rule(P::ArgList)]),
        S::Semi,
    ],
)];

const EXTENDS: &[A] = &[A::node(
    K::ExtendsClause,
    &[S::Token(T::KwExtends), S::Sep(P::QualifiedName, T::Comma)],
)];

const IMPLEMENTS: &[A] = &[A::node(
    K::ImplementsClause,
    &[S::Token(T::KwImplements), S::Sep(P::QualifiedName, T::Comma)],
)];

const NAME: &[A] = &[A::node(K::Name, &[S::OneOf(NAMES)])];

const QUALIFIED_NAME: &[A] = &[A::node(
    K::QualifiedName,
    &[
        S::OneOf(NAMES),
        S::Many(&[S::Token(T::Dot), S::OneOf(NAMES)]),
    ],
)];

const TYPE_NAME: &[A] = &[
    A::inline(&[S::OneOf(TYPE_KEYWORDS)]),
    A::inline(&[S::Rule(P::QualifiedName)]),
];

// Declarations

const VAR_BLOCK: &[A] = &[A::node(
    K::VarBlock,
    &[
        S::OneOf(VAR_KEYWORDS),
        S::Many(&[S::OneOf(VAR_QUALIFIERS)]),
        S::Items(P::VarDecl, &[T::KwEndVar]),
        S::Close(T::KwEndVar),
    ],
)];

const VAR_DECL: &[A] = &[
    A::node(
        K::VarDecl,
        &[
            S::Sep(P::Name, T::Comma),
            S::Opt(&[S::Token(T::KwAt), S::Token(T::DirectAddress)]),
            S::Token(T::Colon),
            S::Rule(P::TypeRef),
            S::Opt(&[S::OneOf(&[T::KwREdge, T::KwFEdge])]),
            S::Opt(&[S::Token(T::Assign), S::Rule(P::Initializer)]),
            S::Semi,
        ],
    ),
    A::node(
        K::VarDecl,
        &[
            S::Token(T::KwAt),
            S::Token(T::DirectAddress),
            S::Token(T::Colon),
            S::Rule(P::TypeRef),
            S::Opt(&[S::Token(T::Assign), S::Rule(P::Initializer)]),
            S::Semi,
        ],
    ),
];

const INITIALIZER: &[A] = &[
    A::node(
        K::ArrayInitializer,
        &[
            S::Token(T::LBracket),
            S::Opt(&[S::Sep(P::Initializer, T::Comma)]),
            S::Close(T::RBracket),
        ],
    ),
    A::node(
        K::InitializerList,
        &[
            S::Token(T::LParen),
            S::Sep(P::FieldInit, T::Comma),
            S::Close(T::RParen),
        ],
    )
    .when(Lookahead::FieldInitList),
    A::inline(&[S::Expr]),
];

const FIELD_INIT: &[A] = &[A::node(
    K::FieldInit,
    &[
        S::Rule(P::Name),
        S::Token(T::Assign),
        S::Rule(P::Initializer),
    ],
)];

const TYPE_DECL: &[A] = &[A::node(
    K::TypeDecl,
    &[
        S::Token(T::KwType),
        S::Items(P::TypeDef, &[T::KwEndType]),
        S::Close(T::KwEndType),
    ],
)];

const TYPE_DEF: &[A] = &[A::node(
    K::TypeDef,
    &[
        S::Rule(P::Name),
        S::Opt(&[S::Rule(P::Extends)]),
        S::Token(T::Colon),
        S::Rule(P::TypeSpec),
        S::Opt(&[S::Token(T::Assign), S::Rule(P::Initializer)]),
        S::Opt(&[S::Token(T::Semicolon)]),
    ],
)];

const TYPE_SPEC: &[A] = &[
    A::node(
        K::StructDef,
        &[
            S::Token(T::KwStruct),
            S::Items(P::VarDecl, &[T::KwEndStruct]),
            S::Close(T::KwEndStruct),
        ],
    ),
    A::node(
        K::UnionDef,
        &[
            S::Token(T::KwUnion),
            S::Items(P::VarDecl, &[T::KwEndUnion]),
            S::Close(T::KwEndUnion),
        ],
    ),
    A::node(
        K::EnumDef,
        &[
            S::Token(T::LParen),
            S::Sep(P::EnumValue, T::Comma),
            S::Close(T::RParen),
        ],
    ),
    A::node(
        K::EnumDef,
        &[
            S::Rule(P::TypeName),
            S::Token(T::LParen),
            S::Sep(P::EnumValue, T::Comma),
            S::Close(T::RParen),
        ],
    )
    .when(Lookahead::TypedEnum),
    A::inline(&[S::Rule(P::TypeRef)]),
];

const ENUM_VALUE: &[A] = &[A::node(
    K::EnumValue,
    &[
        S::Rule(P::Name),
        S::Opt(&[S::Token(T::Assign), S::Expr]),
    ],
)];

const TYPE_REF: &[A] = &[
    A::node(
        K::ArrayType,
        &[
            S::Token(T::KwArray),
            S::Token(T::LBracket),
            S::Sep(P::Subrange, T::Comma),
            S::Close(T::RBracket),
            S::Token(T::KwOf),
            S::Rule(P::TypeRef),
        ],
    ),
    A::node(
        K::PointerType,
        &[
            S::Token(T::KwPointer),
            S::Token(T::KwTo),
            S::Rule(P::TypeRef),
        ],
    ),
    A::node(
        K::ReferenceType,
        &[S::Token(T::KwRefTo), S::Rule(P::TypeRef)],
    ),
    A::node(
        K::StringType,
        &[
            S::OneOf(&[T::KwString, T::KwWString]),
            S::Opt(&[S::Token(T::LBracket), S::Expr, S::Close(T::RBracket)]),
            S::Opt(&[S::Token(T::LParen), S::Expr, S::Close(T::RParen)]),
        ],
    ),
    A::node(
        K::TypeRef,
        &[
            S::Rule(P::TypeName),
            S::Opt(&[
                S::Token(T::LParen),
                S::Rule(P::Subrange),
                S::Close(T::RParen),
            ]),
        ],
    ),
];

const SUBRANGE: &[A] = &[
    A::node(K::Subrange, &[S::Expr, S::Token(T::DotDot), S::Expr]),
    A::node(K::Subrange, &[S::Token(T::Star)]),
];

// Statements

const STATEMENT: &[A] = &[
    A::node(
        K::IfStmt,
        &[
            S::Token(T::KwIf),
            S::Expr,
            S::Token(T::KwThen),
            S::Block(&[T::KwElsif, T::KwElse, T::KwEndIf]),
            S::Many(&[S::Rule(P::ElsifBranch)]),
            S::Opt(&[S::Rule(P::ElseBranch)]),
            S::Close(T::KwEndIf),
        ],
    ),
    A::node(
        K::CaseStmt,
        &[
            S::Token(T::KwCase),
            S::Expr,
            S::Token(T::KwOf),
            S::Many(&[S::Rule(P::CaseBranch)]),
            S::Opt(&[S::Rule(P::CaseElse)]),
            S::Close(T::KwEndCase),
        ],
    ),
    A::node(
        K::ForStmt,
        &[
            S::Token(T::KwFor),
            S::Expr,
            S::Token(T::Assign),
            S::Expr,
            S::Token(T::KwTo),
            S::Expr,
            S::Opt(&[S::Token(T::KwBy), S::Expr]),
            S::Token(T::KwDo),
            S::Block(&[T::KwEndFor]),
            S::Close(T::KwEndFor),
        ],
    ),
    A::node(
        K::WhileStmt,
        &[
            S::Token(T::KwWhile),
            S::Expr,
            S::Token(T::KwDo),
            S::Block(&[T::KwEndWhile]),
            S::Close(T::KwEndWhile),
        ],
    ),
    A::node(
        K::RepeatStmt,
        &[
            S::Token(T::KwRepeat),
            S::Block(&[T::KwUntil, T::KwEndRepeat]),
            S::Token(T::KwUntil),
            S::Expr,
            S::Close(T::KwEndRepeat),
        ],
    ),
    A::node(
        K::ReturnStmt,
        &[S::Token(T::KwReturn), S::Opt(&[S::Expr]), S::Semi],
    ),
    A::node(K::ExitStmt, &[S::Token(T::KwExit), S::Semi]),
    A::node(K::ContinueStmt, &[S::Token(T::KwContinue), S::Semi]),
    A::node(
        K::JmpStmt,
        &[S::Token(T::KwJmp), S::OneOf(NAMES), S::Semi],
    ),
    A::node(K::EmptyStmt, &[S::Token(T::Semicolon)]),
    A::node(
        K::LabelStmt,
        &[
            S::Rule(P::Name),
            S::Token(T::Colon),
            S::Opt(&[S::Rule(P::Statement)]),
        ],
    )
    .when(Lookahead::Label),
    A::node(
        K::AssignStmt,
        &[
            S::Expr,
            S::OneOf(&[T::Assign, T::RefAssign]),
            S::Expr,
            S::Semi,
        ],
    )
    .when(Lookahead::Assignment),
    A::node(K::ExprStmt, &[S::Expr, S::Semi]),
];

const ELSIF_BRANCH: &[A] = &[A::node(
    K::ElsifBranch,
    &[
        S::Token(T::KwElsif),
        S::Expr,
        S::Token(T::KwThen),
        S::Block(&[T::KwElsif, T::KwElse, T::KwEndIf]),
    ],
)];

const ELSE_BRANCH: &[A] = &[A::node(
    K::ElseBranch,
    &[S::Token(T::KwElse), S::Block(&[T::KwEndIf])],
)];

const CASE_BRANCH: &[A] = &[A::node(
    K::CaseBranch,
    &[
        S::Sep(P::CaseLabel, T::Comma),
        S::Token(T::Colon),
        S::CaseBlock(&[T::KwElse, T::KwEndCase]),
    ],
)
.when(Lookahead::CaseLabel)];

const CASE_LABEL: &[A] = &[A::node(
    K::CaseLabel,
    &[S::Expr, S::Opt(&[S::Token(T::DotDot), S::Expr])],
)];

const CASE_ELSE: &[A] = &[A::node(
    K::ElseBranch,
    &[S::Token(T::KwElse), S::Block(&[T::KwEndCase])],
)];

// Expressions

const EXPRESSION: &[A] = &[
    A::node(K::BinaryExpr, &[S::Expr, S::Token(T::KwOr), S::Expr]).prec(1, Assoc::Left),
    A::node(K::BinaryExpr, &[S::Expr, S::Token(T::KwXor), S::Expr]).prec(2, Assoc::Left),
    A::node(
        K::BinaryExpr,
        &[S::Expr, S::OneOf(&[T::KwAnd, T::Ampersand]), S::Expr],
    )
    .prec(3, Assoc::Left),
    A::node(K::BinaryExpr, &[S::Expr, S::OneOf(&[T::Eq, T::Neq]), S::Expr])
        .prec(4, Assoc::Left),
    A::node(
        K::BinaryExpr,
        &[
            S::Expr,
            S::OneOf(&[T::Lt, T::LtEq, T::Gt, T::GtEq]),
            S::Expr,
        ],
    )
    .prec(5, Assoc::Left),
    A::node(
        K::BinaryExpr,
        &[S::Expr, S::OneOf(&[T::Plus, T::Minus]), S::Expr],
    )
    .prec(6, Assoc::Left),
    A::node(
        K::BinaryExpr,
        &[S::Expr, S::OneOf(&[T::Star, T::Slash, T::KwMod]), S::Expr],
    )
    .prec(7, Assoc::Left),
    A::node(K::BinaryExpr, &[S::Expr, S::Token(T::Power), S::Expr]).prec(8, Assoc::Right),
    A::node(
        K::UnaryExpr,
        &[S::OneOf(&[T::KwNot, T::Minus, T::Plus]), S::Expr],
    )
    .prec(9, Assoc::Left),
    A::inline(&[S::Hook(Hook::Primary)]),
];

const ARG_LIST: &[A] = &[A::node(
    K::ArgList,
    &[
        S::Token(T::LParen),
        S::Opt(&[S::Sep(P::Arg, T::Comma)]),
        S::Close(T::RParen),
    ],
)];

const ARG: &[A] = &[
    A::node(
        K::Arg,
        &[
            S::Rule(P::Name),
            S::OneOf(&[T::Assign, T::Arrow]),
            S::Expr,
        ],
    )
    .when(Lookahead::NamedArg),
    A::node(
        K::Arg,
        &[
            S::Token(T::KwNot),
            S::Rule(P::Name),
            S::Token(T::Arrow),
            S::Expr,
        ],
    )
    .when(Lookahead::NegatedOutput),
    A::node(K::Arg, &[S::Expr]),
];

/// Definitions of every Structured Text production.
pub const STRUCTURED_TEXT: &[(P, &[A])] = &[
    (P::SourceFile, SOURCE_FILE),
    (P::TopItem, TOP_ITEM),
    (P::Unit, UNIT),
    (P::Program, PROGRAM),
    (P::Function, FUNCTION),
    (P::FunctionBlock, FUNCTION_BLOCK),
    (P::Class, CLASS),
    (P::Interface, INTERFACE),
    (P::Member, MEMBER),
    (P::Method, METHOD),
    (P::Property, PROPERTY),
    (P::PropertyAccessor, PROPERTY_ACCESSOR),
    (P::Action, ACTION),
    (P::Namespace, NAMESPACE),
    (P::Using, USING),
    (P::Configuration, CONFIGURATION),
    (P::ConfigItem, CONFIG_ITEM),
    (P::Resource, RESOURCE),
    (P::TaskConfig, TASK_CONFIG),
    (P::ProgramConfig, PROGRAM_CONFIG),
    (P::Extends, EXTENDS),
    (P::Implements, IMPLEMENTS),
    (P::Name, NAME),
    (P::QualifiedName, QUALIFIED_NAME),
    (P::TypeName, TYPE_NAME),
    (P::VarBlock, VAR_BLOCK),
    (P::VarDecl, VAR_DECL),
    (P::Initializer, INITIALIZER),
    (P::FieldInit, FIELD_INIT),
    (P::TypeDecl, TYPE_DECL),
    (P::TypeDef, TYPE_DEF),
    (P::TypeSpec, TYPE_SPEC),
    (P::EnumValue, ENUM_VALUE),
    (P::TypeRef, TYPE_REF),
    (P::Subrange, SUBRANGE),
    (P::Statement, STATEMENT),
    (P::ElsifBranch, ELSIF_BRANCH),
    (P::ElseBranch, ELSE_BRANCH),
    (P::CaseBranch, CASE_BRANCH),
    (P::CaseLabel, CASE_LABEL),
    (P::CaseElse, CASE_ELSE),
    (P::Expression, EXPRESSION),
    (P::ArgList, ARG_LIST),
    (P::Arg, ARG),
];
