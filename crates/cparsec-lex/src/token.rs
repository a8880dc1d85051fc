use std::fmt;

/// Stable token discriminants.
///
/// `Eof` is 0. Single-byte punctuators use their ASCII value as the
/// discriminant, so the token type for `'+'` really is 43 — a caller that
/// serializes a token stream can rely on that. Multi-character operators,
/// literal kinds, and keywords get fresh discriminants starting at 256:
/// literal kinds first, then the longest-match multi-character operators,
/// then the type keywords in the order `void char short int long float
/// double signed unsigned`, then the remaining keywords alphabetically.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof = 0,

    // Single-byte punctuators: discriminant equals the ASCII byte value.
    Bang = 0x21,          // !
    Percent = 0x25,       // %
    Ampersand = 0x26,     // &
    LParen = 0x28,        // (
    RParen = 0x29,        // )
    Star = 0x2A,          // *
    Plus = 0x2B,          // +
    Comma = 0x2C,         // ,
    Minus = 0x2D,         // -
    Dot = 0x2E,           // .
    Slash = 0x2F,         // /
    Colon = 0x3A,         // :
    Semicolon = 0x3B,     // ;
    Less = 0x3C,          // <
    Equal = 0x3D,         // =
    Greater = 0x3E,       // >
    Question = 0x3F,      // ?
    LBracket = 0x5B,      // [
    RBracket = 0x5D,      // ]
    Caret = 0x5E,         // ^
    LBrace = 0x7B,        // {
    Pipe = 0x7C,          // |
    RBrace = 0x7D,        // }
    Tilde = 0x7E,         // ~

    // Identifiers and literals (256..)
    Identifier = 256,
    CharLiteral,
    StringLiteral,
    IntHexLiteral,
    IntBinLiteral,
    IntOctLiteral,
    IntULiteral,
    IntULLiteral,
    IntUllLiteral,
    IntLiteral,
    IntLLiteral,
    IntLllLiteral,
    FloatLiteral,
    DoubleLiteral,
    LongDoubleLiteral,

    // Multi-character operators, longest-match.
    Arrow,          // ->
    EqualEqual,     // ==
    LessEqual,      // <=
    GreaterEqual,   // >=
    /// Unused: a leftover discriminant from an earlier naming revision of
    /// the token table. The lexer never produces this kind; `!=` lexes as
    /// `NotEqual` below.
    LogicNotEqual,
    LogicOr,        // ||
    LogicAnd,       // &&
    BitshiftLeft,   // <<
    BitshiftRight,  // >>
    PlusEqual,      // +=
    MinusEqual,     // -=
    TimesEqual,     // *=
    DivEqual,       // /=
    ModEqual,       // %=
    AndEqual,       // &=
    OrEqual,        // |=
    XorEqual,       // ^=
    ShlEqual,       // <<=
    ShrEqual,       // >>=
    NotEqual,       // !=
    PlusPlus,       // ++
    MinusMinus,     // --

    // Type keywords, matching C's primitive type-specifier set.
    KeywordVoid,
    KeywordChar,
    KeywordShort,
    KeywordInt,
    KeywordLong,
    KeywordFloat,
    KeywordDouble,
    KeywordSigned,
    KeywordUnsigned,

    // Remaining keywords, alphabetical.
    KeywordAuto,
    KeywordBreak,
    KeywordCase,
    KeywordConst,
    KeywordContinue,
    KeywordDefault,
    KeywordDo,
    KeywordElse,
    KeywordEnum,
    KeywordExtern,
    KeywordFor,
    KeywordGoto,
    KeywordIf,
    KeywordInline,
    KeywordRegister,
    KeywordRestrict,
    KeywordReturn,
    KeywordSizeof,
    KeywordStatic,
    KeywordStruct,
    KeywordSwitch,
    KeywordTypedef,
    KeywordUnion,
    KeywordVolatile,
    KeywordWhile,

    /// A byte the lexer could not classify. Produced as a one-byte token
    /// whose spelling is that byte; `data` holds the single byte.
    Unknown,
}

impl TokenKind {
    /// True for any of the nine `INT_*`/`INT_*_LITERAL` integer kinds.
    pub fn is_int_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntHexLiteral
                | TokenKind::IntBinLiteral
                | TokenKind::IntOctLiteral
                | TokenKind::IntULiteral
                | TokenKind::IntULLiteral
                | TokenKind::IntUllLiteral
                | TokenKind::IntLiteral
                | TokenKind::IntLLiteral
                | TokenKind::IntLllLiteral
        )
    }

    pub fn is_float_literal(self) -> bool {
        matches!(
            self,
            TokenKind::FloatLiteral | TokenKind::DoubleLiteral | TokenKind::LongDoubleLiteral
        )
    }

    /// The keyword table, type keywords first. Used both by the lexer
    /// (to classify an identifier lexeme) and by anything that wants to
    /// enumerate the fixed keyword set.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        Some(match s {
            "void" => TokenKind::KeywordVoid,
            "char" => TokenKind::KeywordChar,
            "short" => TokenKind::KeywordShort,
            "int" => TokenKind::KeywordInt,
            "long" => TokenKind::KeywordLong,
            "float" => TokenKind::KeywordFloat,
            "double" => TokenKind::KeywordDouble,
            "signed" => TokenKind::KeywordSigned,
            "unsigned" => TokenKind::KeywordUnsigned,
            "auto" => TokenKind::KeywordAuto,
            "break" => TokenKind::KeywordBreak,
            "case" => TokenKind::KeywordCase,
            "const" => TokenKind::KeywordConst,
            "continue" => TokenKind::KeywordContinue,
            "default" => TokenKind::KeywordDefault,
            "do" => TokenKind::KeywordDo,
            "else" => TokenKind::KeywordElse,
            "enum" => TokenKind::KeywordEnum,
            "extern" => TokenKind::KeywordExtern,
            "for" => TokenKind::KeywordFor,
            "goto" => TokenKind::KeywordGoto,
            "if" => TokenKind::KeywordIf,
            "inline" => TokenKind::KeywordInline,
            "register" => TokenKind::KeywordRegister,
            "restrict" => TokenKind::KeywordRestrict,
            "return" => TokenKind::KeywordReturn,
            "sizeof" => TokenKind::KeywordSizeof,
            "static" => TokenKind::KeywordStatic,
            "struct" => TokenKind::KeywordStruct,
            "switch" => TokenKind::KeywordSwitch,
            "typedef" => TokenKind::KeywordTypedef,
            "union" => TokenKind::KeywordUnion,
            "volatile" => TokenKind::KeywordVolatile,
            "while" => TokenKind::KeywordWhile,
            _ => return None,
        })
    }

    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KeywordVoid
                | TokenKind::KeywordChar
                | TokenKind::KeywordShort
                | TokenKind::KeywordInt
                | TokenKind::KeywordLong
                | TokenKind::KeywordFloat
                | TokenKind::KeywordDouble
                | TokenKind::KeywordSigned
                | TokenKind::KeywordUnsigned
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spelling = match *self {
            TokenKind::Eof => "<eof>",
            TokenKind::Bang => "!",
            TokenKind::Percent => "%",
            TokenKind::Ampersand => "&",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Star => "*",
            TokenKind::Plus => "+",
            TokenKind::Comma => ",",
            TokenKind::Minus => "-",
            TokenKind::Dot => ".",
            TokenKind::Slash => "/",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Less => "<",
            TokenKind::Equal => "=",
            TokenKind::Greater => ">",
            TokenKind::Question => "?",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Caret => "^",
            TokenKind::LBrace => "{",
            TokenKind::Pipe => "|",
            TokenKind::RBrace => "}",
            TokenKind::Tilde => "~",
            TokenKind::Identifier => "identifier",
            TokenKind::CharLiteral => "character literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::IntHexLiteral => "hex integer literal",
            TokenKind::IntBinLiteral => "binary integer literal",
            TokenKind::IntOctLiteral => "octal integer literal",
            TokenKind::IntULiteral => "unsigned integer literal",
            TokenKind::IntULLiteral => "unsigned long integer literal",
            TokenKind::IntUllLiteral => "unsigned long long integer literal",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::IntLLiteral => "long integer literal",
            TokenKind::IntLllLiteral => "long long integer literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::DoubleLiteral => "double literal",
            TokenKind::LongDoubleLiteral => "long double literal",
            TokenKind::Arrow => "->",
            TokenKind::EqualEqual => "==",
            TokenKind::LessEqual => "<=",
            TokenKind::GreaterEqual => ">=",
            TokenKind::LogicNotEqual => "!=",
            TokenKind::LogicOr => "||",
            TokenKind::LogicAnd => "&&",
            TokenKind::BitshiftLeft => "<<",
            TokenKind::BitshiftRight => ">>",
            TokenKind::PlusEqual => "+=",
            TokenKind::MinusEqual => "-=",
            TokenKind::TimesEqual => "*=",
            TokenKind::DivEqual => "/=",
            TokenKind::ModEqual => "%=",
            TokenKind::AndEqual => "&=",
            TokenKind::OrEqual => "|=",
            TokenKind::XorEqual => "^=",
            TokenKind::ShlEqual => "<<=",
            TokenKind::ShrEqual => ">>=",
            TokenKind::NotEqual => "!=",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::KeywordVoid => "void",
            TokenKind::KeywordChar => "char",
            TokenKind::KeywordShort => "short",
            TokenKind::KeywordInt => "int",
            TokenKind::KeywordLong => "long",
            TokenKind::KeywordFloat => "float",
            TokenKind::KeywordDouble => "double",
            TokenKind::KeywordSigned => "signed",
            TokenKind::KeywordUnsigned => "unsigned",
            TokenKind::KeywordAuto => "auto",
            TokenKind::KeywordBreak => "break",
            TokenKind::KeywordCase => "case",
            TokenKind::KeywordConst => "const",
            TokenKind::KeywordContinue => "continue",
            TokenKind::KeywordDefault => "default",
            TokenKind::KeywordDo => "do",
            TokenKind::KeywordElse => "else",
            TokenKind::KeywordEnum => "enum",
            TokenKind::KeywordExtern => "extern",
            TokenKind::KeywordFor => "for",
            TokenKind::KeywordGoto => "goto",
            TokenKind::KeywordIf => "if",
            TokenKind::KeywordInline => "inline",
            TokenKind::KeywordRegister => "register",
            TokenKind::KeywordRestrict => "restrict",
            TokenKind::KeywordReturn => "return",
            TokenKind::KeywordSizeof => "sizeof",
            TokenKind::KeywordStatic => "static",
            TokenKind::KeywordStruct => "struct",
            TokenKind::KeywordSwitch => "switch",
            TokenKind::KeywordTypedef => "typedef",
            TokenKind::KeywordUnion => "union",
            TokenKind::KeywordVolatile => "volatile",
            TokenKind::KeywordWhile => "while",
            TokenKind::Unknown => "unknown byte",
        };
        f.write_str(spelling)
    }
}

/// Bitmask of per-token flags (`KEYWORD = 1`, `TYPE_KEYWORD = 2`,
/// `ASSIGNMENT_OPERATOR = 4`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenFlags(u8);

impl TokenFlags {
    pub const NONE: TokenFlags = TokenFlags(0);
    pub const KEYWORD: TokenFlags = TokenFlags(1 << 0);
    pub const TYPE_KEYWORD: TokenFlags = TokenFlags(1 << 1);
    pub const ASSIGNMENT_OPERATOR: TokenFlags = TokenFlags(1 << 2);

    pub fn contains(self, other: TokenFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for TokenFlags {
    type Output = TokenFlags;
    fn bitor(self, rhs: TokenFlags) -> TokenFlags {
        TokenFlags(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for TokenFlags {
    fn bitor_assign(&mut self, rhs: TokenFlags) {
        self.0 |= rhs.0;
    }
}

/// Returns true for any token flagged `ASSIGNMENT_OPERATOR`: `=`, `+=`,
/// `-=`, `*=`, `/=`, `%=`, `&=`, `|=`, `^=`, `<<=`, `>>=`.
pub fn is_assignment_operator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Equal
            | TokenKind::PlusEqual
            | TokenKind::MinusEqual
            | TokenKind::TimesEqual
            | TokenKind::DivEqual
            | TokenKind::ModEqual
            | TokenKind::AndEqual
            | TokenKind::OrEqual
            | TokenKind::XorEqual
            | TokenKind::ShlEqual
            | TokenKind::ShrEqual
    )
}

/// A single lexical token, borrowing its lexeme from the source buffer.
///
/// For string literals `data` includes the surrounding quotes, so
/// `data.len()` is the same count a caller would get scanning the source
/// text by hand. For character literals `data` is the inner text only,
/// excluding both quotes, per the source invariant that a char token's
/// slice never carries its delimiters. Every non-EOF token has a length
/// of at least 1, except `Eof` itself.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub pos: cparsec_util::Position,
    pub data: &'src [u8],
    pub flags: TokenFlags,
}

impl<'src> Token<'src> {
    pub fn length(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn text(&self) -> &'src str {
        std::str::from_utf8(self.data).unwrap_or("<invalid utf-8>")
    }

    pub fn is_keyword(&self) -> bool {
        self.flags.contains(TokenFlags::KEYWORD)
    }

    pub fn line(&self) -> u32 {
        self.pos.line
    }

    pub fn column(&self) -> u32 {
        self.pos.column
    }
}

impl<'src> fmt::Debug for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("line", &self.pos.line)
            .field("column", &self.pos.column)
            .field("text", &self.text())
            .finish()
    }
}
