use cparsec_lex::{Token, TokenKind};

/// An ordered token stream terminated by a single `Eof` token.
pub struct TokenStream<'src> {
    tokens: Vec<Token<'src>>,
}

impl<'src> TokenStream<'src> {
    pub fn new(tokens: Vec<Token<'src>>) -> Self {
        debug_assert!(
            tokens.last().map(|t| t.kind) == Some(TokenKind::Eof),
            "a token stream must end in exactly one Eof token"
        );
        TokenStream { tokens }
    }

    pub fn from_source(src: &'src [u8]) -> Self {
        TokenStream::new(cparsec_lex::lex(src))
    }

    pub fn cursor(&self) -> Cursor<'_, 'src> {
        Cursor {
            tokens: &self.tokens,
            pos: 0,
        }
    }
}

/// The parser's only mutable piece of state: a position into the token
/// slice, plus the four cursor operations (`peek`, `peek_n`, `next`,
/// `rewind`).
#[derive(Clone)]
pub struct Cursor<'a, 'src> {
    tokens: &'a [Token<'src>],
    pos: usize,
}

impl<'a, 'src> Cursor<'a, 'src> {
    fn last_index(&self) -> usize {
        self.tokens.len() - 1
    }

    /// The token at the cursor, without consuming it.
    pub fn peek(&self) -> Token<'src> {
        self.peek_n(0)
    }

    /// The token `k` places ahead of the cursor. Reading past the Eof
    /// token keeps returning Eof rather than panicking.
    pub fn peek_n(&self, k: usize) -> Token<'src> {
        let idx = (self.pos + k).min(self.last_index());
        self.tokens[idx]
    }

    /// Consumes and returns the current token. Never advances past Eof.
    pub fn next(&mut self) -> Token<'src> {
        let tok = self.peek();
        if self.pos < self.last_index() {
            self.pos += 1;
        }
        tok
    }

    /// Moves the cursor back `k` positions, clamped at the start of the
    /// stream. Used by the cast/primary lookahead to undo a speculative
    /// peek when a `(` turns out not to open a type-name.
    pub fn rewind(&mut self, k: usize) {
        self.pos = self.pos.saturating_sub(k);
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }
}
