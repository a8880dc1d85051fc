//! The expression precedence ladder: levels 1-16, one
//! function per level, each left-associative (except the conditional and
//! assignment levels, which recurse right) and each returning immediately
//! on a child's failure.

use cparsec_lex::TokenKind;
use cparsec_util::ParserError;

use crate::ast::{Ast, BinaryExpr, ConstantKind, PostfixBinaryKind, PostfixBinaryRhs};
use crate::{Node, Parser};

impl<'a, 'arena, 'src> Parser<'a, 'arena, 'src> {
    /// Level 1: identifier, literal, or a parenthesized expression.
    fn parse_primary(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let tok = self.peek();
        match tok.kind {
            TokenKind::Identifier => {
                self.bump();
                Ok(self.alloc(Ast::PrimaryIdent(tok)))
            }
            TokenKind::StringLiteral => {
                self.bump();
                Ok(self.alloc(Ast::PrimaryString(tok)))
            }
            TokenKind::CharLiteral => {
                self.bump();
                Ok(self.alloc(Ast::PrimaryConstant {
                    token: tok,
                    kind: ConstantKind::Char,
                }))
            }
            k if k.is_int_literal() => {
                self.bump();
                Ok(self.alloc(Ast::PrimaryConstant {
                    token: tok,
                    kind: ConstantKind::Int,
                }))
            }
            k if k.is_float_literal() => {
                self.bump();
                Ok(self.alloc(Ast::PrimaryConstant {
                    token: tok,
                    kind: ConstantKind::Float,
                }))
            }
            TokenKind::LParen => self.recurse(|p| {
                p.bump();
                let inner = p.parse_assignment()?;
                p.expect(TokenKind::RParen, ")")?;
                Ok(inner)
            }),
            _ => Err(self.error_here("expression")),
        }
    }

    /// Level 2: `[expr]`, `(args?)`, `.ident`, `->ident`, postfix `++`/`--`,
    /// applied repeatedly, left to right.
    fn parse_postfix(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut node = self.parse_primary()?;
        loop {
            match self.peek().kind {
                TokenKind::LBracket => {
                    self.bump();
                    let index = self.parse_assignment()?;
                    self.expect(TokenKind::RBracket, "]")?;
                    node = self.alloc(Ast::PostfixBinary {
                        kind: PostfixBinaryKind::ArrayAccess,
                        lhs: node,
                        rhs: PostfixBinaryRhs::Expr(index),
                    });
                }
                TokenKind::LParen => {
                    self.bump();
                    let args = if self.check(TokenKind::RParen) {
                        None
                    } else {
                        Some(self.parse_argument_list()?)
                    };
                    self.expect(TokenKind::RParen, ")")?;
                    node = self.alloc(Ast::PostfixBinary {
                        kind: PostfixBinaryKind::Call,
                        lhs: node,
                        rhs: PostfixBinaryRhs::Arguments(args),
                    });
                }
                TokenKind::Dot => {
                    self.bump();
                    let name = self.expect(TokenKind::Identifier, "identifier")?;
                    node = self.alloc(Ast::PostfixBinary {
                        kind: PostfixBinaryKind::Member,
                        lhs: node,
                        rhs: PostfixBinaryRhs::Name(name),
                    });
                }
                TokenKind::Arrow => {
                    self.bump();
                    let name = self.expect(TokenKind::Identifier, "identifier")?;
                    node = self.alloc(Ast::PostfixBinary {
                        kind: PostfixBinaryKind::ArrowMember,
                        lhs: node,
                        rhs: PostfixBinaryRhs::Name(name),
                    });
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = self.bump();
                    node = self.alloc(Ast::PostfixUnary { op, operand: node });
                }
                _ => break,
            }
        }
        Ok(node)
    }

    /// A comma-separated list of assignment-expressions, flattened into
    /// source order.
    fn parse_argument_list(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut items = Vec::new();
        items.push(self.parse_assignment()?);
        while self.eat(TokenKind::Comma) {
            items.push(self.parse_assignment()?);
        }
        let slice = self.arena.alloc_slice_copy(&items);
        Ok(self.alloc(Ast::ArgumentList(slice)))
    }

    /// Level 3: prefix `++`/`--` (recursing on another unary-expression),
    /// unary `& * + - ~ !` (recursing on a cast-expression), or `sizeof`
    /// in either of its two forms.
    fn parse_unary(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        match self.peek().kind {
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op = self.bump();
                let operand = self.parse_unary()?;
                Ok(self.alloc(Ast::Unary { op, operand }))
            }
            TokenKind::Ampersand
            | TokenKind::Star
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Tilde
            | TokenKind::Bang => {
                let op = self.bump();
                let operand = self.parse_cast()?;
                Ok(self.alloc(Ast::Unary { op, operand }))
            }
            TokenKind::KeywordSizeof => {
                self.bump();
                if self.check(TokenKind::LParen) && self.is_type_name.is_type_name_start(&self.peek_n(1))
                {
                    self.bump(); // '('
                    let type_name = self.parse_type_name_node()?;
                    self.expect(TokenKind::RParen, ")")?;
                    Ok(self.alloc(Ast::SizeofType(type_name)))
                } else {
                    let operand = self.parse_unary()?;
                    Ok(self.alloc(Ast::SizeofExpr(operand)))
                }
            }
            _ => self.parse_postfix(),
        }
    }

    /// Level 4: `(type-name) cast-expression` when `(` is followed by a
    /// token the type predicate accepts; otherwise falls through to unary.
    /// The only lookahead-driven decision in the grammar.
    fn parse_cast(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        if self.check(TokenKind::LParen) && self.is_type_name.is_type_name_start(&self.peek_n(1)) {
            return self.recurse(|p| {
                p.bump(); // '('
                let type_name = p.parse_type_name_node()?;
                p.expect(TokenKind::RParen, ")")?;
                let operand = p.parse_cast()?;
                Ok(p.alloc(Ast::Cast { type_name, operand }))
            });
        }
        self.parse_unary()
    }

    fn parse_multiplicative(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut lhs = self.parse_cast()?;
        while matches!(
            self.peek().kind,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent
        ) {
            let op = self.bump();
            let rhs = self.parse_cast()?;
            lhs = self.alloc(Ast::Multiplicative(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut lhs = self.parse_multiplicative()?;
        while matches!(self.peek().kind, TokenKind::Plus | TokenKind::Minus) {
            let op = self.bump();
            let rhs = self.parse_multiplicative()?;
            lhs = self.alloc(Ast::Additive(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    fn parse_shift(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut lhs = self.parse_additive()?;
        while matches!(
            self.peek().kind,
            TokenKind::BitshiftLeft | TokenKind::BitshiftRight
        ) {
            let op = self.bump();
            let rhs = self.parse_additive()?;
            lhs = self.alloc(Ast::Shift(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    fn parse_relational(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut lhs = self.parse_shift()?;
        while matches!(
            self.peek().kind,
            TokenKind::Less | TokenKind::Greater | TokenKind::LessEqual | TokenKind::GreaterEqual
        ) {
            let op = self.bump();
            let rhs = self.parse_shift()?;
            lhs = self.alloc(Ast::Relational(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut lhs = self.parse_relational()?;
        while matches!(self.peek().kind, TokenKind::EqualEqual | TokenKind::NotEqual) {
            let op = self.bump();
            let rhs = self.parse_relational()?;
            lhs = self.alloc(Ast::Equality(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    fn parse_bitand(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut lhs = self.parse_equality()?;
        while self.check(TokenKind::Ampersand) {
            let op = self.bump();
            let rhs = self.parse_equality()?;
            lhs = self.alloc(Ast::And(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    fn parse_bitxor(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut lhs = self.parse_bitand()?;
        while self.check(TokenKind::Caret) {
            let op = self.bump();
            let rhs = self.parse_bitand()?;
            lhs = self.alloc(Ast::Xor(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    fn parse_bitor(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut lhs = self.parse_bitxor()?;
        while self.check(TokenKind::Pipe) {
            let op = self.bump();
            let rhs = self.parse_bitxor()?;
            lhs = self.alloc(Ast::Or(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    fn parse_logical_and(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut lhs = self.parse_bitor()?;
        while self.check(TokenKind::LogicAnd) {
            let op = self.bump();
            let rhs = self.parse_bitor()?;
            lhs = self.alloc(Ast::LogicalAnd(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    fn parse_logical_or(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut lhs = self.parse_logical_and()?;
        while self.check(TokenKind::LogicOr) {
            let op = self.bump();
            let rhs = self.parse_logical_and()?;
            lhs = self.alloc(Ast::LogicalOr(BinaryExpr { op, lhs, rhs }));
        }
        Ok(lhs)
    }

    /// Level 15: `logical-or ('?' expression ':' conditional)?`,
    /// right-associative via recursion on the false branch.
    pub(crate) fn parse_conditional(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let condition = self.parse_logical_or()?;
        if self.eat(TokenKind::Question) {
            return self.recurse(|p| {
                let then_branch = p.parse_assignment()?;
                p.expect(TokenKind::Colon, ":")?;
                let else_branch = p.parse_conditional()?;
                Ok(p.alloc(Ast::Ternary {
                    condition,
                    then_branch,
                    else_branch,
                }))
            });
        }
        Ok(condition)
    }

    /// Level 16: `conditional (assign-op conditional)*`, building a
    /// left-leaning tree — but since assignment is right-associative
    /// (`a = b = c` is `a = (b = c)`), the loop recurses into
    /// `parse_assignment` for the right-hand side rather than iterating.
    pub(crate) fn parse_assignment(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let lhs = self.parse_conditional()?;
        if self.peek().flags.contains(cparsec_lex::TokenFlags::ASSIGNMENT_OPERATOR) {
            let op = self.bump();
            let rhs = self.parse_assignment()?;
            return Ok(self.alloc(Ast::Assignment { op, lhs, rhs }));
        }
        Ok(lhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{print_ast, DefaultTypePredicate, TokenStream};
    use bumpalo::Bump;

    fn parse(src: &str) -> String {
        let arena = Bump::new();
        let tokens = TokenStream::from_source(src.as_bytes());
        let result = crate::parse_expression(&arena, &tokens, "<test>", &DefaultTypePredicate);
        assert!(
            matches!(result.status, cparsec_util::ParseStatus::Ok),
            "expected a successful parse of `{src}`, got error: {:?}",
            result.error
        );
        print_ast(result.node.unwrap())
    }

    fn fails(src: &str) {
        let arena = Bump::new();
        let tokens = TokenStream::from_source(src.as_bytes());
        let result = crate::parse_expression(&arena, &tokens, "<test>", &DefaultTypePredicate);
        assert!(
            matches!(result.status, cparsec_util::ParseStatus::Fatal),
            "expected `{src}` to fail to parse"
        );
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(parse("1 + 2 * 3"), "(1 + (2 * 3))");
    }

    #[test]
    fn additive_chain_is_left_associative() {
        assert_eq!(parse("1 - 2 - 3"), "((1 - 2) - 3)");
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(parse("a = b = 1"), "(a = (b = 1))");
    }

    #[test]
    fn ternary_is_right_associative() {
        assert_eq!(parse("a ? b : c ? d : e"), "(a ? b : (c ? d : e))");
    }

    #[test]
    fn sizeof_of_a_pointer_type_name() {
        assert_eq!(parse("sizeof(int *)"), "sizeof(int *)");
    }

    #[test]
    fn sizeof_of_an_expression_keeps_its_operand() {
        assert_eq!(parse("sizeof x"), "sizeof x");
    }

    #[test]
    fn cast_binds_a_parenthesized_type_name_to_its_operand() {
        assert_eq!(parse("(int)x"), "(int)x");
    }

    #[test]
    fn postfix_chain_applies_left_to_right() {
        assert_eq!(parse("a.b->c[0](d)"), "a.b->c[0](d)");
    }

    #[test]
    fn hex_literal_with_suffix_round_trips_its_spelling() {
        assert_eq!(parse("0x1Fu"), "0x1Fu");
    }

    #[test]
    fn not_equal_is_a_single_operator_not_bang_then_equal() {
        assert_eq!(parse("a != b"), "(a != b)");
    }

    #[test]
    fn logical_or_binds_loosest_of_the_binary_ladder() {
        assert_eq!(parse("a || b && c"), "(a || (b && c))");
    }

    #[test]
    fn grouped_expression_parses_without_adding_extra_parens() {
        assert_eq!(parse("(a + b) * c"), "((a + b) * c)");
    }

    #[test]
    fn unary_minus_recurses_through_cast_not_unary() {
        assert_eq!(parse("-x"), "-x");
    }

    #[test]
    fn prefix_increment_recurses_through_unary() {
        assert_eq!(parse("++x"), "++x");
    }

    #[test]
    fn empty_input_fails_to_parse_an_expression() {
        fails("");
    }

    #[test]
    fn unmatched_paren_is_a_fatal_syntax_error() {
        fails("(1 + 2");
    }

    #[test]
    fn deeply_nested_parens_do_not_overflow_the_native_stack() {
        let mut src = String::new();
        for _ in 0..600 {
            src.push('(');
        }
        src.push('1');
        for _ in 0..600 {
            src.push(')');
        }
        fails(&src);
    }
}
