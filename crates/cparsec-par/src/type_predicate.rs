use cparsec_lex::{Token, TokenKind};

/// Resolves the one genuinely ambiguous decision in the grammar: whether a
/// token in cast/primary position starts a type-name. The parser owns no
/// symbol table, so recognizing a bare identifier as a typedef-name is
/// delegated to the caller.
pub trait TypePredicate {
    fn is_type_name_start(&self, token: &Token<'_>) -> bool;
}

impl<F> TypePredicate for F
where
    F: Fn(&Token<'_>) -> bool,
{
    fn is_type_name_start(&self, token: &Token<'_>) -> bool {
        self(token)
    }
}

/// The conservative default predicate: true for the type keywords and
/// `struct`/`union`/`enum`, false for bare identifiers. A caller with a
/// symbol table supplies its own predicate (e.g. one that also
/// recognizes typedef-names) instead of this one.
pub struct DefaultTypePredicate;

impl TypePredicate for DefaultTypePredicate {
    fn is_type_name_start(&self, token: &Token<'_>) -> bool {
        token.kind.is_type_keyword()
            || matches!(
                token.kind,
                TokenKind::KeywordStruct | TokenKind::KeywordUnion | TokenKind::KeywordEnum
            )
    }
}
