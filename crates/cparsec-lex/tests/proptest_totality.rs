use cparsec_lex::{lex, TokenKind};
use proptest::prelude::*;

// The lexer must never panic on arbitrary input, and must always end in
// exactly one Eof token with no Eof tokens before it.
proptest! {
    #[test]
    fn never_panics_and_terminates_with_single_eof(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let toks = lex(&bytes);
        prop_assert!(!toks.is_empty());
        let last = toks.len() - 1;
        for (i, tok) in toks.iter().enumerate() {
            if i == last {
                prop_assert_eq!(tok.kind, TokenKind::Eof);
            } else {
                prop_assert_ne!(tok.kind, TokenKind::Eof);
            }
        }
    }

    #[test]
    fn every_non_eof_token_has_positive_length(bytes in proptest::collection::vec(any::<u8>(), 1..512)) {
        let toks = lex(&bytes);
        for tok in toks.iter().filter(|t| t.kind != TokenKind::Eof) {
            prop_assert!(tok.length() >= 1);
        }
    }
}
