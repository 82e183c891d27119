//! The single list of lexical token kinds.
//!
//! `SyntaxKind` and its conversions are generated from this list so the token
//! part of `SyntaxKind` can never drift from `TokenKind`. Keywords and
//! punctuation are named by their source text; everything else by a
//! snake_case id.

macro_rules! for_each_token_kind {
    ($callback:ident) => {
        $callback! {
            Whitespace => "whitespace",
            LineComment => "line_comment",
            BlockComment => "block_comment",
            Pragma => "pragma",
            Semicolon => ";",
            Colon => ":",
            Comma => ",",
            Dot => ".",
            DotDot => "..",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            Hash => "#",
            Caret => "^",
            At => "@",
            Assign => ":=",
            Arrow => "=>",
            RefAssign => "?=",
            Eq => "=",
            Neq => "<>",
            Lt => "<",
            LtEq => "<=",
            Gt => ">",
            GtEq => ">=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Power => "**",
            Ampersand => "&",
            KwProgram => "PROGRAM",
            KwEndProgram => "END_PROGRAM",
            KwFunction => "FUNCTION",
            KwEndFunction => "END_FUNCTION",
            KwFunctionBlock => "FUNCTION_BLOCK",
            KwEndFunctionBlock => "END_FUNCTION_BLOCK",
            KwClass => "CLASS",
            KwEndClass => "END_CLASS",
            KwMethod => "METHOD",
            KwEndMethod => "END_METHOD",
            KwProperty => "PROPERTY",
            KwEndProperty => "END_PROPERTY",
            KwInterface => "INTERFACE",
            KwEndInterface => "END_INTERFACE",
            KwNamespace => "NAMESPACE",
            KwEndNamespace => "END_NAMESPACE",
            KwUsing => "USING",
            KwAction => "ACTION",
            KwEndAction => "END_ACTION",
            KwVar => "VAR",
            KwEndVar => "END_VAR",
            KwVarInput => "VAR_INPUT",
            KwVarOutput => "VAR_OUTPUT",
            KwVarInOut => "VAR_IN_OUT",
            KwVarTemp => "VAR_TEMP",
            KwVarGlobal => "VAR_GLOBAL",
            KwVarExternal => "VAR_EXTERNAL",
            KwVarStat => "VAR_STAT",
            KwConstant => "CONSTANT",
            KwRetain => "RETAIN",
            KwNonRetain => "NON_RETAIN",
            KwPersistent => "PERSISTENT",
            KwPublic => "PUBLIC",
            KwPrivate => "PRIVATE",
            KwProtected => "PROTECTED",
            KwInternal => "INTERNAL",
            KwFinal => "FINAL",
            KwAbstract => "ABSTRACT",
            KwOverride => "OVERRIDE",
            KwType => "TYPE",
            KwEndType => "END_TYPE",
            KwStruct => "STRUCT",
            KwEndStruct => "END_STRUCT",
            KwUnion => "UNION",
            KwEndUnion => "END_UNION",
            KwArray => "ARRAY",
            KwOf => "OF",
            KwString => "STRING",
            KwWString => "WSTRING",
            KwPointer => "POINTER",
            KwRef => "REF",
            KwRefTo => "REF_TO",
            KwTo => "TO",
            KwExtends => "EXTENDS",
            KwImplements => "IMPLEMENTS",
            KwThis => "THIS",
            KwSuper => "SUPER",
            KwNew => "NEW",
            KwNewDunder => "__NEW",
            KwDeleteDunder => "__DELETE",
            KwIf => "IF",
            KwThen => "THEN",
            KwElsif => "ELSIF",
            KwElse => "ELSE",
            KwEndIf => "END_IF",
            KwCase => "CASE",
            KwEndCase => "END_CASE",
            KwFor => "FOR",
            KwEndFor => "END_FOR",
            KwBy => "BY",
            KwDo => "DO",
            KwWhile => "WHILE",
            KwEndWhile => "END_WHILE",
            KwRepeat => "REPEAT",
            KwUntil => "UNTIL",
            KwEndRepeat => "END_REPEAT",
            KwReturn => "RETURN",
            KwExit => "EXIT",
            KwContinue => "CONTINUE",
            KwJmp => "JMP",
            KwAnd => "AND",
            KwOr => "OR",
            KwXor => "XOR",
            KwNot => "NOT",
            KwMod => "MOD",
            KwBool => "BOOL",
            KwSInt => "SINT",
            KwInt => "INT",
            KwDInt => "DINT",
            KwLInt => "LINT",
            KwUSInt => "USINT",
            KwUInt => "UINT",
            KwUDInt => "UDINT",
            KwULInt => "ULINT",
            KwReal => "REAL",
            KwLReal => "LREAL",
            KwByte => "BYTE",
            KwWord => "WORD",
            KwDWord => "DWORD",
            KwLWord => "LWORD",
            KwTime => "TIME",
            KwLTime => "LTIME",
            KwDate => "DATE",
            KwLDate => "LDATE",
            KwTimeOfDay => "TIME_OF_DAY",
            KwLTimeOfDay => "LTIME_OF_DAY",
            KwDateAndTime => "DATE_AND_TIME",
            KwLDateAndTime => "LDATE_AND_TIME",
            KwChar => "CHAR",
            KwWChar => "WCHAR",
            KwAny => "ANY",
            KwAnyDerived => "ANY_DERIVED",
            KwAnyElementary => "ANY_ELEMENTARY",
            KwAnyMagnitude => "ANY_MAGNITUDE",
            KwAnyInt => "ANY_INT",
            KwAnyUnsigned => "ANY_UNSIGNED",
            KwAnySigned => "ANY_SIGNED",
            KwAnyReal => "ANY_REAL",
            KwAnyNum => "ANY_NUM",
            KwAnyDuration => "ANY_DURATION",
            KwAnyBit => "ANY_BIT",
            KwAnyChars => "ANY_CHARS",
            KwAnyString => "ANY_STRING",
            KwAnyChar => "ANY_CHAR",
            KwAnyDate => "ANY_DATE",
            KwTrue => "TRUE",
            KwFalse => "FALSE",
            KwNull => "NULL",
            KwConfiguration => "CONFIGURATION",
            KwEndConfiguration => "END_CONFIGURATION",
            KwResource => "RESOURCE",
            KwEndResource => "END_RESOURCE",
            KwOn => "ON",
            KwTask => "TASK",
            KwWith => "WITH",
            KwAt => "AT",
            KwEn => "EN",
            KwEno => "ENO",
            KwREdge => "R_EDGE",
            KwFEdge => "F_EDGE",
            KwAdr => "ADR",
            KwSizeOf => "SIZEOF",
            KwGet => "GET",
            KwEndGet => "END_GET",
            KwSet => "SET",
            KwEndSet => "END_SET",
            IntLiteral => "int_literal",
            RealLiteral => "real_literal",
            TimeLiteral => "time_literal",
            DateLiteral => "date_literal",
            TimeOfDayLiteral => "time_of_day_literal",
            DateAndTimeLiteral => "date_and_time_literal",
            StringLiteral => "string_literal",
            WideStringLiteral => "wide_string_literal",
            TypedLiteralPrefix => "typed_literal_prefix",
            DirectAddress => "direct_address",
            Ident => "identifier",
            UnterminatedComment => "unterminated_comment",
            UnterminatedString => "unterminated_string",
            UnterminatedBasedLiteral => "unterminated_based_literal",
            UnterminatedPragma => "unterminated_pragma",
            Invalid => "invalid",
            Eof => "eof",
        }
    };
}

pub(crate) use for_each_token_kind;
