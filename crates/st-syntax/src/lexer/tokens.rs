//! Token kinds for IEC 61131-3 Structured Text.
//!
//! `TokenKind` is generated by `logos`. Keywords are matched case-insensitively
//! and are laid out contiguously so the keyword classes below are range checks
//! instead of long `matches!` lists.

use logos::Logos;

use crate::syntax::SyntaxKind;

fn pascal_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    nested_comment(lex, b"(*", b"*)")
}

fn c_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    nested_comment(lex, b"/*", b"*/")
}

/// Consumes a block comment body, honouring nested openers.
///
/// Returns `false` when the input ends before the outermost comment closes;
/// the lexer then reports the whole remainder as an unterminated comment.
fn nested_comment(lex: &mut logos::Lexer<TokenKind>, open: &[u8], close: &[u8]) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0usize;

    while i + 1 < bytes.len() {
        let pair = &bytes[i..i + 2];
        if pair == open {
            depth += 1;
            i += 2;
        } else if pair == close {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return true;
            }
        } else {
            i += 1;
        }
    }

    lex.bump(bytes.len());
    false
}

/// Lexical categories of Structured Text.
#[allow(missing_docs)]
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u16)]
pub enum TokenKind {
    // Trivia
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,
    /// `(* ... *)` or `/* ... */`, nesting allowed.
    #[token("(*", pascal_comment)]
    #[token("/*", c_comment)]
    BlockComment,
    /// `{ ... }` pragma or attribute, opaque to the grammar.
    #[regex(r"\{[^}]*\}")]
    Pragma,

    // Punctuation
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("#")]
    Hash,
    #[token("^")]
    Caret,
    #[token("@")]
    At,

    // Operators
    #[token(":=")]
    Assign,
    #[token("=>")]
    Arrow,
    #[token("?=")]
    RefAssign,
    #[token("=")]
    Eq,
    #[token("<>")]
    Neq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("**")]
    Power,
    #[token("&")]
    Ampersand,

    // Program organisation units. `KwProgram` opens the keyword range.
    #[token("PROGRAM", ignore(case))]
    KwProgram,
    #[token("END_PROGRAM", ignore(case))]
    KwEndProgram,
    #[token("FUNCTION", ignore(case))]
    KwFunction,
    #[token("END_FUNCTION", ignore(case))]
    KwEndFunction,
    #[token("FUNCTION_BLOCK", ignore(case))]
    KwFunctionBlock,
    #[token("END_FUNCTION_BLOCK", ignore(case))]
    KwEndFunctionBlock,
    #[token("CLASS", ignore(case))]
    KwClass,
    #[token("END_CLASS", ignore(case))]
    KwEndClass,
    #[token("METHOD", ignore(case))]
    KwMethod,
    #[token("END_METHOD", ignore(case))]
    KwEndMethod,
    #[token("PROPERTY", ignore(case))]
    KwProperty,
    #[token("END_PROPERTY", ignore(case))]
    KwEndProperty,
    #[token("INTERFACE", ignore(case))]
    KwInterface,
    #[token("END_INTERFACE", ignore(case))]
    KwEndInterface,
    #[token("NAMESPACE", ignore(case))]
    KwNamespace,
    #[token("END_NAMESPACE", ignore(case))]
    KwEndNamespace,
    #[token("USING", ignore(case))]
    KwUsing,
    #[token("ACTION", ignore(case))]
    KwAction,
    #[token("END_ACTION", ignore(case))]
    KwEndAction,

    // Variable sections
    #[token("VAR", ignore(case))]
    KwVar,
    #[token("END_VAR", ignore(case))]
    KwEndVar,
    #[token("VAR_INPUT", ignore(case))]
    KwVarInput,
    #[token("VAR_OUTPUT", ignore(case))]
    KwVarOutput,
    #[token("VAR_IN_OUT", ignore(case))]
    KwVarInOut,
    #[token("VAR_TEMP", ignore(case))]
    KwVarTemp,
    #[token("VAR_GLOBAL", ignore(case))]
    KwVarGlobal,
    #[token("VAR_EXTERNAL", ignore(case))]
    KwVarExternal,
    #[token("VAR_STAT", ignore(case))]
    KwVarStat,

    // Storage classes and access qualifiers
    #[token("CONSTANT", ignore(case))]
    KwConstant,
    #[token("RETAIN", ignore(case))]
    KwRetain,
    #[token("NON_RETAIN", ignore(case))]
    KwNonRetain,
    #[token("PERSISTENT", ignore(case))]
    KwPersistent,
    #[token("PUBLIC", ignore(case))]
    KwPublic,
    #[token("PRIVATE", ignore(case))]
    KwPrivate,
    #[token("PROTECTED", ignore(case))]
    KwProtected,
    #[token("INTERNAL", ignore(case))]
    KwInternal,
    #[token("FINAL", ignore(case))]
    KwFinal,
    #[token("ABSTRACT", ignore(case))]
    KwAbstract,
    #[token("OVERRIDE", ignore(case))]
    KwOverride,

    // Type definitions
    #[token("TYPE", ignore(case))]
    KwType,
    #[token("END_TYPE", ignore(case))]
    KwEndType,
    #[token("STRUCT", ignore(case))]
    KwStruct,
    #[token("END_STRUCT", ignore(case))]
    KwEndStruct,
    #[token("UNION", ignore(case))]
    KwUnion,
    #[token("END_UNION", ignore(case))]
    KwEndUnion,
    #[token("ARRAY", ignore(case))]
    KwArray,
    #[token("OF", ignore(case))]
    KwOf,
    #[token("STRING", ignore(case))]
    KwString,
    #[token("WSTRING", ignore(case))]
    KwWString,
    #[token("POINTER", ignore(case))]
    KwPointer,
    #[token("REF", ignore(case))]
    KwRef,
    #[token("REF_TO", ignore(case))]
    KwRefTo,
    #[token("TO", ignore(case))]
    KwTo,

    // Object orientation
    #[token("EXTENDS", ignore(case))]
    KwExtends,
    #[token("IMPLEMENTS", ignore(case))]
    KwImplements,
    #[token("THIS", ignore(case))]
    KwThis,
    #[token("SUPER", ignore(case))]
    KwSuper,
    #[token("NEW", ignore(case))]
    KwNew,
    #[token("__NEW", ignore(case))]
    KwNewDunder,
    #[token("__DELETE", ignore(case))]
    KwDeleteDunder,

    // Control flow
    #[token("IF", ignore(case))]
    KwIf,
    #[token("THEN", ignore(case))]
    KwThen,
    #[token("ELSIF", ignore(case))]
    KwElsif,
    #[token("ELSE", ignore(case))]
    KwElse,
    #[token("END_IF", ignore(case))]
    KwEndIf,
    #[token("CASE", ignore(case))]
    KwCase,
    #[token("END_CASE", ignore(case))]
    KwEndCase,
    #[token("FOR", ignore(case))]
    KwFor,
    #[token("END_FOR", ignore(case))]
    KwEndFor,
    #[token("BY", ignore(case))]
    KwBy,
    #[token("DO", ignore(case))]
    KwDo,
    #[token("WHILE", ignore(case))]
    KwWhile,
    #[token("END_WHILE", ignore(case))]
    KwEndWhile,
    #[token("REPEAT", ignore(case))]
    KwRepeat,
    #[token("UNTIL", ignore(case))]
    KwUntil,
    #[token("END_REPEAT", ignore(case))]
    KwEndRepeat,
    #[token("RETURN", ignore(case))]
    KwReturn,
    #[token("EXIT", ignore(case))]
    KwExit,
    #[token("CONTINUE", ignore(case))]
    KwContinue,
    #[token("JMP", ignore(case))]
    KwJmp,

    // Word operators
    #[token("AND", ignore(case))]
    KwAnd,
    #[token("OR", ignore(case))]
    KwOr,
    #[token("XOR", ignore(case))]
    KwXor,
    #[token("NOT", ignore(case))]
    KwNot,
    #[token("MOD", ignore(case))]
    KwMod,

    // Elementary and generic types. `KwBool..=KwAnyDate` is the type range.
    #[token("BOOL", ignore(case))]
    KwBool,
    #[token("SINT", ignore(case))]
    KwSInt,
    #[token("INT", ignore(case))]
    KwInt,
    #[token("DINT", ignore(case))]
    KwDInt,
    #[token("LINT", ignore(case))]
    KwLInt,
    #[token("USINT", ignore(case))]
    KwUSInt,
    #[token("UINT", ignore(case))]
    KwUInt,
    #[token("UDINT", ignore(case))]
    KwUDInt,
    #[token("ULINT", ignore(case))]
    KwULInt,
    #[token("REAL", ignore(case))]
    KwReal,
    #[token("LREAL", ignore(case))]
    KwLReal,
    #[token("BYTE", ignore(case))]
    KwByte,
    #[token("WORD", ignore(case))]
    KwWord,
    #[token("DWORD", ignore(case))]
    KwDWord,
    #[token("LWORD", ignore(case))]
    KwLWord,
    #[token("TIME", ignore(case))]
    KwTime,
    #[token("LTIME", ignore(case))]
    KwLTime,
    #[token("DATE", ignore(case))]
    KwDate,
    #[token("LDATE", ignore(case))]
    KwLDate,
    #[token("TIME_OF_DAY", ignore(case))]
    #[token("TOD", ignore(case))]
    KwTimeOfDay,
    #[token("LTIME_OF_DAY", ignore(case))]
    #[token("LTOD", ignore(case))]
    KwLTimeOfDay,
    #[token("DATE_AND_TIME", ignore(case))]
    #[token("DT", ignore(case))]
    KwDateAndTime,
    #[token("LDATE_AND_TIME", ignore(case))]
    #[token("LDT", ignore(case))]
    KwLDateAndTime,
    #[token("CHAR", ignore(case))]
    KwChar,
    #[token("WCHAR", ignore(case))]
    KwWChar,
    #[token("ANY", ignore(case))]
    KwAny,
    #[token("ANY_DERIVED", ignore(case))]
    KwAnyDerived,
    #[token("ANY_ELEMENTARY", ignore(case))]
    KwAnyElementary,
    #[token("ANY_MAGNITUDE", ignore(case))]
    KwAnyMagnitude,
    #[token("ANY_INT", ignore(case))]
    KwAnyInt,
    #[token("ANY_UNSIGNED", ignore(case))]
    KwAnyUnsigned,
    #[token("ANY_SIGNED", ignore(case))]
    KwAnySigned,
    #[token("ANY_REAL", ignore(case))]
    KwAnyReal,
    #[token("ANY_NUM", ignore(case))]
    KwAnyNum,
    #[token("ANY_DURATION", ignore(case))]
    KwAnyDuration,
    #[token("ANY_BIT", ignore(case))]
    KwAnyBit,
    #[token("ANY_CHARS", ignore(case))]
    KwAnyChars,
    #[token("ANY_STRING", ignore(case))]
    KwAnyString,
    #[token("ANY_CHAR", ignore(case))]
    KwAnyChar,
    #[token("ANY_DATE", ignore(case))]
    KwAnyDate,

    // Literal keywords
    #[token("TRUE", ignore(case))]
    KwTrue,
    #[token("FALSE", ignore(case))]
    KwFalse,
    #[token("NULL", ignore(case))]
    KwNull,

    // Configuration
    #[token("CONFIGURATION", ignore(case))]
    KwConfiguration,
    #[token("END_CONFIGURATION", ignore(case))]
    KwEndConfiguration,
    #[token("RESOURCE", ignore(case))]
    KwResource,
    #[token("END_RESOURCE", ignore(case))]
    KwEndResource,
    #[token("ON", ignore(case))]
    KwOn,
    #[token("TASK", ignore(case))]
    KwTask,
    #[token("WITH", ignore(case))]
    KwWith,
    #[token("AT", ignore(case))]
    KwAt,

    // Contextual names that are still reserved
    #[token("EN", ignore(case))]
    KwEn,
    #[token("ENO", ignore(case))]
    KwEno,
    #[token("R_EDGE", ignore(case))]
    KwREdge,
    #[token("F_EDGE", ignore(case))]
    KwFEdge,
    #[token("ADR", ignore(case))]
    KwAdr,
    #[token("SIZEOF", ignore(case))]
    KwSizeOf,

    // Property accessors. `KwEndSet` closes the keyword range.
    #[token("GET", ignore(case))]
    KwGet,
    #[token("END_GET", ignore(case))]
    KwEndGet,
    #[token("SET", ignore(case))]
    KwSet,
    #[token("END_SET", ignore(case))]
    KwEndSet,

    // Literals
    /// Decimal or based integer: `42`, `1_000`, `2#1010`, `8#17`, `16#FF`.
    #[regex(r"[0-9]([0-9]|_[0-9])*")]
    #[regex(r"16#[0-9A-Fa-f]([0-9A-Fa-f]|_[0-9A-Fa-f])*")]
    #[regex(r"2#[01]([01]|_[01])*")]
    #[regex(r"8#[0-7]([0-7]|_[0-7])*")]
    IntLiteral,
    #[regex(r"[0-9]([0-9]|_[0-9])*\.[0-9]([0-9]|_[0-9])*([eE][+-]?[0-9]([0-9]|_[0-9])*)?")]
    RealLiteral,
    /// Duration: `T#5d4h3m2s1ms`, `LTIME#1.5s`.
    #[regex(
        r"(?:T|TIME|LT|LTIME)#[+-]?(?:[0-9]+(?:\.[0-9]+)?(?:ms|us|ns|d|h|m|s))(?:_?(?:[0-9]+(?:\.[0-9]+)?(?:ms|us|ns|d|h|m|s)))*",
        ignore(case)
    )]
    TimeLiteral,
    #[regex(r"(?:DATE|D|LDATE|LD)#[0-9]{4}-[0-9]{2}-[0-9]{2}", ignore(case))]
    DateLiteral,
    #[regex(
        r"(?:TOD|TIME_OF_DAY|LTOD|LTIME_OF_DAY)#[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9][0-9_]*)?",
        ignore(case)
    )]
    TimeOfDayLiteral,
    #[regex(
        r"(?:DT|DATE_AND_TIME|LDT|LDATE_AND_TIME)#[0-9]{4}-[0-9]{2}-[0-9]{2}-[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9][0-9_]*)?",
        ignore(case)
    )]
    DateAndTimeLiteral,
    #[regex(
        r"'([^$'\r\n]|\$\$|\$[LlNnPpRrTt]|\$'|\$[0-9A-Fa-f]{2})*'",
        priority = 2
    )]
    StringLiteral,
    #[regex(
        r#""([^$"\r\n]|\$\$|\$[LlNnPpRrTt]|\$"|\$[0-9A-Fa-f]{4})*""#,
        priority = 2
    )]
    WideStringLiteral,
    /// `INT#`, `BOOL#` and friends; the value follows as its own token.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*#")]
    TypedLiteralPrefix,
    /// Located variable: `%IX0.0`, `%QW10`, `%M*`.
    #[regex(r"%[IQM]\*")]
    #[regex(r"%[IQM][XBWDL]?[0-9]+(\.[0-9]+)*")]
    DirectAddress,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // Lexical errors
    /// Block comment still open at end of input. Produced by `Lexer`.
    UnterminatedComment,
    /// String literal cut short by a line break or end of input.
    #[regex(r"'[^'\r\n]*")]
    #[regex(r#""[^"\r\n]*"#)]
    UnterminatedString,
    /// Base prefix without digits: `16#`, `2#`, `8#`.
    #[regex(r"(?:2|8|16)#")]
    UnterminatedBasedLiteral,
    /// `{` pragma never closed; runs to end of input.
    #[regex(r"\{[^}]*")]
    UnterminatedPragma,
    /// Quoted text with an invalid escape, or any unrecognised character.
    #[regex(r"'[^'\r\n]*'", priority = 1)]
    #[regex(r#""[^"\r\n]*""#, priority = 1)]
    #[default]
    Invalid,

    Eof,
}

impl TokenKind {
    /// Whitespace, comments and pragmas.
    #[inline]
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment | Self::Pragma
        )
    }

    /// Any lexical error classification.
    #[inline]
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(
            self,
            Self::Invalid
                | Self::UnterminatedComment
                | Self::UnterminatedString
                | Self::UnterminatedBasedLiteral
                | Self::UnterminatedPragma
        )
    }

    /// Reserved words, matched case-insensitively.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        (Self::KwProgram as u16..=Self::KwEndSet as u16).contains(&(self as u16))
    }

    /// Elementary and generic data type keywords.
    #[must_use]
    pub fn is_type_keyword(self) -> bool {
        (Self::KwBool as u16..=Self::KwAnyDate as u16).contains(&(self as u16))
            || matches!(self, Self::KwString | Self::KwWString)
    }

    /// Keywords opening a `VAR ... END_VAR` section.
    #[must_use]
    pub fn is_var_keyword(self) -> bool {
        matches!(
            self,
            Self::KwVar
                | Self::KwVarInput
                | Self::KwVarOutput
                | Self::KwVarInOut
                | Self::KwVarTemp
                | Self::KwVarGlobal
                | Self::KwVarExternal
                | Self::KwVarStat
        )
    }

    /// Storage-class qualifiers allowed after a `VAR` keyword.
    #[must_use]
    pub fn is_var_qualifier(self) -> bool {
        matches!(
            self,
            Self::KwConstant | Self::KwRetain | Self::KwNonRetain | Self::KwPersistent
        )
    }

    /// `PUBLIC`, `PRIVATE`, `PROTECTED`, `INTERNAL`.
    #[must_use]
    pub fn is_access_modifier(self) -> bool {
        matches!(
            self,
            Self::KwPublic | Self::KwPrivate | Self::KwProtected | Self::KwInternal
        )
    }

    /// Literal tokens that stand on their own in an expression.
    #[must_use]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntLiteral
                | Self::RealLiteral
                | Self::StringLiteral
                | Self::WideStringLiteral
                | Self::TimeLiteral
                | Self::DateLiteral
                | Self::TimeOfDayLiteral
                | Self::DateAndTimeLiteral
                | Self::KwTrue
                | Self::KwFalse
                | Self::KwNull
        )
    }

    /// Identifiers, including the reserved-but-nameable `EN`/`ENO`.
    #[must_use]
    pub fn is_name(self) -> bool {
        matches!(self, Self::Ident | Self::KwEn | Self::KwEno)
    }

    /// Tokens that may begin an expression.
    #[must_use]
    pub fn can_start_expr(self) -> bool {
        self.is_literal()
            || self.is_name()
            || matches!(
                self,
                Self::KwNot
                    | Self::TypedLiteralPrefix
                    | Self::LParen
                    | Self::Minus
                    | Self::Plus
                    | Self::KwThis
                    | Self::KwSuper
                    | Self::KwNew
                    | Self::KwNewDunder
                    | Self::KwDeleteDunder
                    | Self::KwRef
                    | Self::KwAdr
                    | Self::KwSizeOf
                    | Self::DirectAddress
            )
    }
}

impl From<TokenKind> for rowan::SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        SyntaxKind::from(kind).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        TokenKind::lexer(input)
            .map(|tok| tok.unwrap_or(TokenKind::Invalid))
            .filter(|kind| !kind.is_trivia())
            .collect()
    }

    #[test]
    fn keywords_ignore_case() {
        let tokens = kinds("PROGRAM program Program PrOgRaM");
        assert_eq!(tokens, vec![TokenKind::KwProgram; 4]);
    }

    #[test]
    fn keyword_classes_are_ranges() {
        assert!(TokenKind::KwProgram.is_keyword());
        assert!(TokenKind::KwEndSet.is_keyword());
        assert!(TokenKind::KwMod.is_keyword());
        assert!(!TokenKind::Ident.is_keyword());
        assert!(!TokenKind::Ampersand.is_keyword());

        assert!(TokenKind::KwBool.is_type_keyword());
        assert!(TokenKind::KwAnyDate.is_type_keyword());
        assert!(TokenKind::KwWString.is_type_keyword());
        assert!(!TokenKind::KwTrue.is_type_keyword());
        assert!(!TokenKind::KwMod.is_type_keyword());
    }

    #[test]
    fn operators() {
        assert_eq!(
            kinds(":= = <> < <= > >= + - * / ** & => ?="),
            vec![
                TokenKind::Assign,
                TokenKind::Eq,
                TokenKind::Neq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Power,
                TokenKind::Ampersand,
                TokenKind::Arrow,
                TokenKind::RefAssign,
            ]
        );
    }

    #[test]
    fn integer_literals() {
        let tokens = kinds("123 16#FF 2#1010 8#77 1_000_000 16#dead_BEEF");
        assert!(tokens.iter().all(|k| *k == TokenKind::IntLiteral));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn real_literals() {
        let tokens = kinds("3.14 1.0E10 2.5e-3 1_000.000_1");
        assert_eq!(tokens, vec![TokenKind::RealLiteral; 4]);
    }

    #[test]
    fn based_prefix_without_digits() {
        assert_eq!(kinds("16#"), vec![TokenKind::UnterminatedBasedLiteral]);
        assert_eq!(
            kinds("2# x"),
            vec![TokenKind::UnterminatedBasedLiteral, TokenKind::Ident]
        );
    }

    #[test]
    fn time_literals() {
        let tokens = kinds("T#5d4h3m2s1ms TIME#5s t#100ms LT#14.7s LTIME#5m_30s_500ms_100.1us T#-14ms");
        assert_eq!(tokens, vec![TokenKind::TimeLiteral; 6]);
    }

    #[test]
    fn strings_and_escapes() {
        assert_eq!(
            kinds(r#"'hello' "world" '$N$L$$$'' "$00C4""#),
            vec![
                TokenKind::StringLiteral,
                TokenKind::WideStringLiteral,
                TokenKind::StringLiteral,
                TokenKind::WideStringLiteral,
            ]
        );
        assert_eq!(kinds("'$Q'"), vec![TokenKind::Invalid]);
    }

    #[test]
    fn unterminated_strings() {
        assert_eq!(kinds("'abc"), vec![TokenKind::UnterminatedString]);
        assert_eq!(
            kinds("\"abc\nx"),
            vec![TokenKind::UnterminatedString, TokenKind::Ident]
        );
    }

    #[test]
    fn nested_comments_are_one_token() {
        let tokens: Vec<_> = TokenKind::lexer("(* a (* b *) c *)x")
            .map(|tok| tok.unwrap_or(TokenKind::Invalid))
            .collect();
        assert_eq!(tokens, vec![TokenKind::BlockComment, TokenKind::Ident]);
    }

    #[test]
    fn pragmas_are_trivia() {
        let all: Vec<_> = TokenKind::lexer("{attribute 'hide'} x")
            .map(|tok| tok.unwrap_or(TokenKind::Invalid))
            .collect();
        assert_eq!(all[0], TokenKind::Pragma);
        assert_eq!(kinds("{attribute 'hide'} x"), vec![TokenKind::Ident]);
    }

    #[test]
    fn direct_addresses() {
        let tokens = kinds("%IX0.0 %QW10 %MD100 %IB5 %I* %Q* %M*");
        assert_eq!(tokens, vec![TokenKind::DirectAddress; 7]);
    }
}
