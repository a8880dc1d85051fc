use crate::token::{Token, TokenFlags, TokenKind};

/// Scans a byte buffer into tokens.
///
/// The lexer never fails: a byte it cannot classify becomes a one-byte
/// `Unknown` token and scanning continues. Callers that want to reject
/// malformed input do so at the parser layer, where an `Unknown` token
/// simply never satisfies any grammar rule and surfaces as a syntax
/// error with useful position information already attached.
pub struct Lexer<'src> {
    src: &'src [u8],
    pos: usize,
    line: u32,
    column: u32,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src [u8]) -> Self {
        // Skip a UTF-8 BOM if present; leaving it in place would lex it
        // as three stray bytes, turning every file that starts with a
        // BOM into three broken tokens for no benefit.
        let src = if src.starts_with(&[0xEF, 0xBB, 0xBF]) {
            &src[3..]
        } else {
            src
        };
        Lexer {
            src,
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        *self.src.get(self.pos + offset).unwrap_or(&0)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn bump(&mut self) -> u8 {
        let b = self.src[self.pos];
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        b
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C => {
                    self.bump();
                }
                b'/' if self.peek_at(1) == b'/' => {
                    while !self.at_end() && self.peek() != b'\n' {
                        self.bump();
                    }
                }
                b'/' if self.peek_at(1) == b'*' => {
                    self.bump();
                    self.bump();
                    loop {
                        if self.at_end() {
                            // Unterminated block comment: stop at EOF,
                            // same as reaching the end of input anywhere
                            // else. The caller sees no trailing tokens.
                            break;
                        }
                        if self.peek() == b'*' && self.peek_at(1) == b'/' {
                            self.bump();
                            self.bump();
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn make(&self, kind: TokenKind, start_line: u32, start_column: u32, data: &'src [u8]) -> Token<'src> {
        let flags = classify_flags(kind);
        Token {
            kind,
            pos: cparsec_util::Position::new(start_line, start_column),
            data,
            flags,
        }
    }

    /// Scans and returns the next token. Returns an `Eof` token at and
    /// after the end of input; callers should stop once they see one.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_trivia();

        let start_line = self.line;
        let start_column = self.column;
        let start = self.pos;

        if self.at_end() {
            return self.make(TokenKind::Eof, start_line, start_column, &self.src[start..start]);
        }

        let c = self.peek();

        if is_ident_start(c) {
            return self.lex_identifier(start, start_line, start_column);
        }
        if c.is_ascii_digit() || (c == b'.' && self.peek_at(1).is_ascii_digit()) {
            return self.lex_number(start, start_line, start_column);
        }
        if c == b'\'' {
            return self.lex_char_literal(start_line, start_column);
        }
        if c == b'"' {
            return self.lex_string_literal(start_line, start_column);
        }

        self.lex_operator(start, start_line, start_column)
    }

    fn lex_identifier(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
        while is_ident_continue(self.peek()) {
            self.bump();
        }
        let data = &self.src[start..self.pos];
        let text = std::str::from_utf8(data).unwrap_or("");
        match TokenKind::keyword_from_str(text) {
            Some(kind) => self.make(kind, line, column, data),
            None => self.make(TokenKind::Identifier, line, column, data),
        }
    }

    fn lex_number(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
        let mut is_float = false;
        let mut base_kind = TokenKind::IntLiteral;

        if self.peek() == b'0' && (self.peek_at(1) == b'x' || self.peek_at(1) == b'X') {
            self.bump();
            self.bump();
            while self.peek().is_ascii_hexdigit() {
                self.bump();
            }
            base_kind = TokenKind::IntHexLiteral;
        } else if self.peek() == b'0' && (self.peek_at(1) == b'b' || self.peek_at(1) == b'B') {
            self.bump();
            self.bump();
            while self.peek() == b'0' || self.peek() == b'1' {
                self.bump();
            }
            base_kind = TokenKind::IntBinLiteral;
        } else if self.peek() == b'0' && self.peek_at(1).is_ascii_digit() {
            self.bump();
            while (b'0'..=b'7').contains(&self.peek()) {
                self.bump();
            }
            base_kind = TokenKind::IntOctLiteral;
        } else {
            while self.peek().is_ascii_digit() {
                self.bump();
            }
            if self.peek() == b'.' && base_kind != TokenKind::IntHexLiteral {
                is_float = true;
                self.bump();
                while self.peek().is_ascii_digit() {
                    self.bump();
                }
            }
            if matches!(self.peek(), b'e' | b'E') && !is_float_exponent_ambiguous(self) {
                is_float = true;
                self.bump();
                if matches!(self.peek(), b'+' | b'-') {
                    self.bump();
                }
                while self.peek().is_ascii_digit() {
                    self.bump();
                }
            }
        }

        if is_float {
            return self.finish_float_literal(start, line, column);
        }

        self.finish_int_literal(start, line, column, base_kind)
    }

    fn finish_int_literal(
        &mut self,
        start: usize,
        line: u32,
        column: u32,
        base_kind: TokenKind,
    ) -> Token<'src> {
        let mut unsigned = false;
        let mut long_count = 0u32;
        loop {
            match self.peek() {
                b'u' | b'U' => {
                    unsigned = true;
                    self.bump();
                }
                b'l' | b'L' => {
                    long_count += 1;
                    self.bump();
                }
                _ => break,
            }
        }

        let kind = if base_kind != TokenKind::IntLiteral {
            // A hex/bin/oct literal keeps its own kind; suffixes only
            // affect width/signedness information carried at the parser
            // layer via the lexeme text itself.
            base_kind
        } else if unsigned {
            match long_count {
                0 => TokenKind::IntULiteral,
                1 => TokenKind::IntULLiteral,
                _ => TokenKind::IntUllLiteral,
            }
        } else {
            match long_count {
                0 => TokenKind::IntLiteral,
                1 => TokenKind::IntLLiteral,
                _ => TokenKind::IntLllLiteral,
            }
        };

        let data = &self.src[start..self.pos];
        self.make(kind, line, column, data)
    }

    fn finish_float_literal(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
        let kind = match self.peek() {
            b'f' | b'F' => {
                self.bump();
                TokenKind::FloatLiteral
            }
            b'l' | b'L' => {
                self.bump();
                TokenKind::LongDoubleLiteral
            }
            _ => TokenKind::DoubleLiteral,
        };
        let data = &self.src[start..self.pos];
        self.make(kind, line, column, data)
    }

    fn lex_char_literal(&mut self, line: u32, column: u32) -> Token<'src> {
        let full_start = self.pos;
        self.bump(); // opening quote
        let inner_start = self.pos;
        while !self.at_end() && self.peek() != b'\'' {
            if self.peek() == b'\\' && !self.at_end() {
                self.bump();
                if !self.at_end() {
                    self.bump();
                }
                continue;
            }
            self.bump();
        }
        let inner_end = self.pos;
        if self.peek() == b'\'' {
            self.bump();
        }
        // The lexeme is the inner text only, excluding both quotes; the
        // printer re-adds them when it reproduces a character literal.
        // Degenerate input with no inner byte (`''`, or a lone `'` at
        // EOF) falls back to the raw span so every token keeps length
        // >= 1.
        let data = if inner_end > inner_start {
            &self.src[inner_start..inner_end]
        } else {
            &self.src[full_start..self.pos]
        };
        self.make(TokenKind::CharLiteral, line, column, data)
    }

    fn lex_string_literal(&mut self, line: u32, column: u32) -> Token<'src> {
        let start = self.pos;
        self.bump(); // opening quote
        while !self.at_end() && self.peek() != b'"' {
            if self.peek() == b'\\' && !self.at_end() {
                self.bump();
                if !self.at_end() {
                    self.bump();
                }
                continue;
            }
            self.bump();
        }
        if self.peek() == b'"' {
            self.bump();
        }
        let data = &self.src[start..self.pos];
        self.make(TokenKind::StringLiteral, line, column, data)
    }

    fn lex_operator(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
        let c = self.bump();
        let c1 = self.peek();

        macro_rules! two {
            ($second:expr, $kind:expr) => {
                if c1 == $second {
                    self.bump();
                    return self.make($kind, line, column, &self.src[start..self.pos]);
                }
            };
        }

        match c {
            b'-' => {
                if c1 == b'>' {
                    self.bump();
                    return self.make(TokenKind::Arrow, line, column, &self.src[start..self.pos]);
                }
                two!(b'-', TokenKind::MinusMinus);
                two!(b'=', TokenKind::MinusEqual);
                self.make(TokenKind::Minus, line, column, &self.src[start..self.pos])
            }
            b'+' => {
                two!(b'+', TokenKind::PlusPlus);
                two!(b'=', TokenKind::PlusEqual);
                self.make(TokenKind::Plus, line, column, &self.src[start..self.pos])
            }
            b'=' => {
                two!(b'=', TokenKind::EqualEqual);
                self.make(TokenKind::Equal, line, column, &self.src[start..self.pos])
            }
            b'!' => {
                two!(b'=', TokenKind::NotEqual);
                self.make(TokenKind::Bang, line, column, &self.src[start..self.pos])
            }
            b'<' => {
                if c1 == b'<' {
                    self.bump();
                    if self.peek() == b'=' {
                        self.bump();
                        return self.make(TokenKind::ShlEqual, line, column, &self.src[start..self.pos]);
                    }
                    return self.make(TokenKind::BitshiftLeft, line, column, &self.src[start..self.pos]);
                }
                two!(b'=', TokenKind::LessEqual);
                self.make(TokenKind::Less, line, column, &self.src[start..self.pos])
            }
            b'>' => {
                if c1 == b'>' {
                    self.bump();
                    if self.peek() == b'=' {
                        self.bump();
                        return self.make(TokenKind::ShrEqual, line, column, &self.src[start..self.pos]);
                    }
                    return self.make(TokenKind::BitshiftRight, line, column, &self.src[start..self.pos]);
                }
                two!(b'=', TokenKind::GreaterEqual);
                self.make(TokenKind::Greater, line, column, &self.src[start..self.pos])
            }
            b'|' => {
                two!(b'|', TokenKind::LogicOr);
                two!(b'=', TokenKind::OrEqual);
                self.make(TokenKind::Pipe, line, column, &self.src[start..self.pos])
            }
            b'&' => {
                two!(b'&', TokenKind::LogicAnd);
                two!(b'=', TokenKind::AndEqual);
                self.make(TokenKind::Ampersand, line, column, &self.src[start..self.pos])
            }
            b'*' => {
                two!(b'=', TokenKind::TimesEqual);
                self.make(TokenKind::Star, line, column, &self.src[start..self.pos])
            }
            b'/' => {
                two!(b'=', TokenKind::DivEqual);
                self.make(TokenKind::Slash, line, column, &self.src[start..self.pos])
            }
            b'%' => {
                two!(b'=', TokenKind::ModEqual);
                self.make(TokenKind::Percent, line, column, &self.src[start..self.pos])
            }
            b'^' => {
                two!(b'=', TokenKind::XorEqual);
                self.make(TokenKind::Caret, line, column, &self.src[start..self.pos])
            }
            b'(' => self.make(TokenKind::LParen, line, column, &self.src[start..self.pos]),
            b')' => self.make(TokenKind::RParen, line, column, &self.src[start..self.pos]),
            b'[' => self.make(TokenKind::LBracket, line, column, &self.src[start..self.pos]),
            b']' => self.make(TokenKind::RBracket, line, column, &self.src[start..self.pos]),
            b'{' => self.make(TokenKind::LBrace, line, column, &self.src[start..self.pos]),
            b'}' => self.make(TokenKind::RBrace, line, column, &self.src[start..self.pos]),
            b',' => self.make(TokenKind::Comma, line, column, &self.src[start..self.pos]),
            b'.' => self.make(TokenKind::Dot, line, column, &self.src[start..self.pos]),
            b':' => self.make(TokenKind::Colon, line, column, &self.src[start..self.pos]),
            b';' => self.make(TokenKind::Semicolon, line, column, &self.src[start..self.pos]),
            b'?' => self.make(TokenKind::Question, line, column, &self.src[start..self.pos]),
            b'~' => self.make(TokenKind::Tilde, line, column, &self.src[start..self.pos]),
            _ => self.make(TokenKind::Unknown, line, column, &self.src[start..self.pos]),
        }
    }
}

fn is_float_exponent_ambiguous(lexer: &Lexer) -> bool {
    // Reject `e`/`E` as an exponent marker unless followed by a digit or
    // a sign then a digit; otherwise `0e` followed by a hex-looking
    // identifier character would wrongly swallow part of an identifier.
    let next = lexer.peek_at(1);
    if next.is_ascii_digit() {
        return false;
    }
    if (next == b'+' || next == b'-') && lexer.peek_at(2).is_ascii_digit() {
        return false;
    }
    true
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

fn classify_flags(kind: TokenKind) -> TokenFlags {
    let mut flags = TokenFlags::NONE;
    if kind.is_type_keyword() {
        flags |= TokenFlags::KEYWORD | TokenFlags::TYPE_KEYWORD;
    } else if is_plain_keyword(kind) {
        flags |= TokenFlags::KEYWORD;
    }
    if crate::token::is_assignment_operator(kind) {
        flags |= TokenFlags::ASSIGNMENT_OPERATOR;
    }
    flags
}

fn is_plain_keyword(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::KeywordAuto
            | TokenKind::KeywordBreak
            | TokenKind::KeywordCase
            | TokenKind::KeywordConst
            | TokenKind::KeywordContinue
            | TokenKind::KeywordDefault
            | TokenKind::KeywordDo
            | TokenKind::KeywordElse
            | TokenKind::KeywordEnum
            | TokenKind::KeywordExtern
            | TokenKind::KeywordFor
            | TokenKind::KeywordGoto
            | TokenKind::KeywordIf
            | TokenKind::KeywordInline
            | TokenKind::KeywordRegister
            | TokenKind::KeywordRestrict
            | TokenKind::KeywordReturn
            | TokenKind::KeywordSizeof
            | TokenKind::KeywordStatic
            | TokenKind::KeywordStruct
            | TokenKind::KeywordSwitch
            | TokenKind::KeywordTypedef
            | TokenKind::KeywordUnion
            | TokenKind::KeywordVolatile
            | TokenKind::KeywordWhile
    )
}

/// Scans `src` in full and returns every token, including a trailing
/// `Eof`.
pub fn lex(src: &[u8]) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(src);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        let is_eof = tok.kind == TokenKind::Eof;
        tokens.push(tok);
        if is_eof {
            break;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src.as_bytes()).iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_simple_expression() {
        assert_eq!(
            kinds("a + b * 2"),
            vec![
                TokenKind::Identifier,
                TokenKind::Plus,
                TokenKind::Identifier,
                TokenKind::Star,
                TokenKind::IntLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn not_equal_is_not_less_equal() {
        assert_eq!(kinds("a != b"), vec![
            TokenKind::Identifier,
            TokenKind::NotEqual,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn distinguishes_shift_and_relational() {
        assert_eq!(
            kinds("a << b <= c >>= d"),
            vec![
                TokenKind::Identifier,
                TokenKind::BitshiftLeft,
                TokenKind::Identifier,
                TokenKind::LessEqual,
                TokenKind::Identifier,
                TokenKind::ShrEqual,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn integer_suffixes() {
        assert_eq!(kinds("1 1u 1ul 1ull 1l 1ll"), vec![
            TokenKind::IntLiteral,
            TokenKind::IntULiteral,
            TokenKind::IntULLiteral,
            TokenKind::IntUllLiteral,
            TokenKind::IntLLiteral,
            TokenKind::IntLllLiteral,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn hex_bin_oct_literals() {
        assert_eq!(kinds("0x1F 0b101 0755"), vec![
            TokenKind::IntHexLiteral,
            TokenKind::IntBinLiteral,
            TokenKind::IntOctLiteral,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn float_suffixes() {
        assert_eq!(kinds("1.0 1.0f 1.0l 1e10"), vec![
            TokenKind::DoubleLiteral,
            TokenKind::FloatLiteral,
            TokenKind::LongDoubleLiteral,
            TokenKind::DoubleLiteral,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn keyword_and_identifier_are_distinguished() {
        assert_eq!(kinds("int intx"), vec![
            TokenKind::KeywordInt,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn type_keyword_flags_are_set() {
        let toks = lex(b"int");
        assert!(toks[0].flags.contains(TokenFlags::KEYWORD));
        assert!(toks[0].flags.contains(TokenFlags::TYPE_KEYWORD));
    }

    #[test]
    fn assignment_operator_flag_is_set() {
        let toks = lex(b"+=");
        assert!(toks[0].flags.contains(TokenFlags::ASSIGNMENT_OPERATOR));
        let toks = lex(b"==");
        assert!(!toks[0].flags.contains(TokenFlags::ASSIGNMENT_OPERATOR));
    }

    #[test]
    fn skips_line_and_block_comments() {
        assert_eq!(
            kinds("a // comment\n/* block */ b"),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_block_comment_stops_at_eof() {
        assert_eq!(kinds("a /* oops"), vec![TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn char_literal_excludes_quotes_string_literal_includes_them() {
        let toks = lex(br#"'a' "hi\n""#);
        assert_eq!(toks[0].kind, TokenKind::CharLiteral);
        assert_eq!(toks[0].data, b"a");
        assert_eq!(toks[1].kind, TokenKind::StringLiteral);
        assert_eq!(toks[1].data, b"\"hi\\n\"");
    }

    #[test]
    fn escaped_char_literal_keeps_backslash_in_slice() {
        let toks = lex(br#"'\n'"#);
        assert_eq!(toks[0].kind, TokenKind::CharLiteral);
        assert_eq!(toks[0].data, b"\\n");
    }

    #[test]
    fn escaped_quote_in_string_has_full_length() {
        // `"a\"b"` is six bytes including the outer quotes.
        let toks = lex(br#""a\"b""#);
        assert_eq!(toks[0].kind, TokenKind::StringLiteral);
        assert_eq!(toks[0].length(), 6);
    }

    #[test]
    fn tracks_line_and_column() {
        let toks = lex(b"a\nb");
        assert_eq!((toks[0].line(), toks[0].column()), (1, 0));
        assert_eq!((toks[1].line(), toks[1].column()), (2, 0));
    }

    #[test]
    fn unknown_byte_does_not_abort_scanning() {
        let toks = lex(b"a $ b");
        assert_eq!(
            toks.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Identifier,
                TokenKind::Unknown,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }
}
