//! The type-name grammar: specifier-qualifier lists with the
//! primitive-counter state machine, struct/union/enum specifiers, pointer
//! chains, abstract declarators, and parameter-type-lists.

use cparsec_lex::TokenKind;
use cparsec_util::ParserError;

use crate::ast::{
    Ast, DirectAbstractDeclarator, PrimitiveCounts, Qualifiers, StorageClass, TagKind,
    TagSpecifier, TypeInfo, TypeInfoKind,
};
use crate::{Node, Parser};

impl<'a, 'arena, 'src> Parser<'a, 'arena, 'src> {
    /// Entry point for `parse_type_name`: a specifier-qualifier-list
    /// followed by an optional abstract declarator.
    pub(crate) fn parse_type_name_grammar(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        self.parse_type_name_node()
    }

    pub(crate) fn parse_type_name_node(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let specifiers = self.parse_type_info(false)?;
        let declarator = if self.at_abstract_declarator_start() {
            Some(self.parse_abstract_declarator(false)?)
        } else {
            None
        };
        Ok(self.alloc(Ast::TypeName {
            specifiers,
            declarator,
        }))
    }

    fn at_abstract_declarator_start(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Star | TokenKind::LParen | TokenKind::LBracket | TokenKind::Identifier
        )
    }

    /// The specifier-accumulation state machine: loops over qualifiers,
    /// (when `allow_storage`) storage-class keywords, and
    /// exactly one type-class element (a run of primitive keywords, or one
    /// struct/union/enum specifier), rejecting an attempt to mix a
    /// primitive with a tag specifier in either order. With
    /// `allow_storage` set this also implements declaration-specifiers'
    /// "no type keyword appeared -> defaults to int" rule.
    pub(crate) fn parse_type_info(
        &mut self,
        allow_storage: bool,
    ) -> Result<Node<'arena, 'src>, ParserError> {
        let mut qualifiers = Qualifiers::default();
        let mut storage = StorageClass::default();
        let mut kind: Option<TypeInfoKind<'arena, 'src>> = None;

        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::KeywordConst => {
                    self.bump();
                    qualifiers.const_ = true;
                }
                TokenKind::KeywordVolatile => {
                    self.bump();
                    qualifiers.volatile = true;
                }
                TokenKind::KeywordAuto if allow_storage => {
                    self.bump();
                    storage.auto = true;
                }
                TokenKind::KeywordRegister if allow_storage => {
                    self.bump();
                    storage.register = true;
                }
                TokenKind::KeywordStatic if allow_storage => {
                    self.bump();
                    storage.static_ = true;
                }
                TokenKind::KeywordExtern if allow_storage => {
                    self.bump();
                    storage.extern_ = true;
                }
                TokenKind::KeywordTypedef if allow_storage => {
                    self.bump();
                    storage.typedef = true;
                }
                k if k.is_type_keyword() => {
                    if matches!(&kind, Some(TypeInfoKind::Tag(_))) {
                        return Err(self.structural_error(
                            "cannot combine a struct/union/enum specifier with a primitive type specifier",
                        ));
                    }
                    self.bump();
                    let counts = match &mut kind {
                        Some(TypeInfoKind::Primitive(c)) => c,
                        _ => {
                            kind = Some(TypeInfoKind::Primitive(PrimitiveCounts::default()));
                            match &mut kind {
                                Some(TypeInfoKind::Primitive(c)) => c,
                                _ => unreachable!(),
                            }
                        }
                    };
                    bump_primitive_count(counts, k);
                }
                TokenKind::KeywordStruct | TokenKind::KeywordUnion => {
                    if matches!(&kind, Some(TypeInfoKind::Primitive(p)) if !p.is_empty()) {
                        return Err(self.structural_error(
                            "cannot combine a primitive type specifier with a struct/union specifier",
                        ));
                    }
                    if kind.is_some() {
                        break;
                    }
                    let spec = self.parse_struct_or_union_specifier()?;
                    kind = Some(TypeInfoKind::Tag(spec));
                }
                TokenKind::KeywordEnum => {
                    if matches!(&kind, Some(TypeInfoKind::Primitive(p)) if !p.is_empty()) {
                        return Err(
                            self.structural_error("cannot combine a primitive type specifier with an enum specifier")
                        );
                    }
                    if kind.is_some() {
                        break;
                    }
                    let spec = self.parse_enum_specifier()?;
                    kind = Some(TypeInfoKind::Tag(spec));
                }
                _ => break,
            }
        }

        if kind.is_none() && !allow_storage {
            return Err(self.error_here("type-specifier"));
        }

        let mut kind = kind.unwrap_or_else(|| TypeInfoKind::Primitive(PrimitiveCounts::default()));
        if allow_storage {
            if let TypeInfoKind::Primitive(ref mut p) = kind {
                if p.is_empty() {
                    p.int = 1;
                }
            }
        }

        Ok(self.alloc(Ast::TypeInfo(TypeInfo {
            kind,
            qualifiers,
            storage,
        })))
    }

    fn parse_struct_or_union_specifier(
        &mut self,
    ) -> Result<TagSpecifier<'arena, 'src>, ParserError> {
        let kind = if self.eat(TokenKind::KeywordStruct) {
            TagKind::Struct
        } else {
            self.expect(TokenKind::KeywordUnion, "union")?;
            TagKind::Union
        };
        let tag = if self.check(TokenKind::Identifier) {
            Some(self.bump())
        } else {
            None
        };
        let body = if self.eat(TokenKind::LBrace) {
            let list = self.parse_struct_declaration_list()?;
            self.expect(TokenKind::RBrace, "}")?;
            Some(list)
        } else {
            None
        };
        Ok(TagSpecifier { kind, tag, body })
    }

    fn parse_enum_specifier(&mut self) -> Result<TagSpecifier<'arena, 'src>, ParserError> {
        self.expect(TokenKind::KeywordEnum, "enum")?;
        let tag = if self.check(TokenKind::Identifier) {
            Some(self.bump())
        } else {
            None
        };
        let body = if self.eat(TokenKind::LBrace) {
            let list = self.parse_enumerator_list()?;
            self.expect(TokenKind::RBrace, "}")?;
            Some(list)
        } else {
            None
        };
        Ok(TagSpecifier {
            kind: TagKind::Enum,
            tag,
            body,
        })
    }

    fn parse_struct_declaration_list(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut items = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            items.push(self.parse_struct_declaration()?);
        }
        let slice = self.arena.alloc_slice_copy(&items);
        Ok(self.alloc(Ast::StructDeclarationList(slice)))
    }

    fn parse_struct_declaration(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let specifiers = self.parse_type_info(false)?;
        let declarators = self.parse_struct_declarator_list()?;
        self.expect(TokenKind::Semicolon, ";")?;
        Ok(self.alloc(Ast::StructDeclaration {
            specifiers,
            declarators,
        }))
    }

    fn parse_struct_declarator_list(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut items = Vec::new();
        items.push(self.parse_struct_declarator()?);
        while self.eat(TokenKind::Comma) {
            items.push(self.parse_struct_declarator()?);
        }
        let slice = self.arena.alloc_slice_copy(&items);
        Ok(self.alloc(Ast::StructDeclaratorList(slice)))
    }

    /// `struct-declarator`: a (name-required) abstract-declarator,
    /// optionally followed by `: constant-expression`, or a bare
    /// `: constant-expression` bit-field with no declarator at all.
    fn parse_struct_declarator(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        if self.eat(TokenKind::Colon) {
            let width = self.parse_conditional()?;
            return Ok(self.alloc(Ast::StructDeclaratorBitfield {
                declarator: None,
                width,
            }));
        }
        let declarator = self.parse_abstract_declarator(true)?;
        if self.eat(TokenKind::Colon) {
            let width = self.parse_conditional()?;
            return Ok(self.alloc(Ast::StructDeclaratorBitfield {
                declarator: Some(declarator),
                width,
            }));
        }
        Ok(self.alloc(Ast::StructDeclarator {
            declarator: Some(declarator),
        }))
    }

    fn parse_enumerator_list(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut items = Vec::new();
        items.push(self.parse_enumerator()?);
        while self.eat(TokenKind::Comma) {
            items.push(self.parse_enumerator()?);
        }
        let slice = self.arena.alloc_slice_copy(&items);
        Ok(self.alloc(Ast::EnumeratorList(slice)))
    }

    fn parse_enumerator(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let name = self.expect(TokenKind::Identifier, "identifier")?;
        let value = if self.eat(TokenKind::Equal) {
            Some(self.parse_conditional()?)
        } else {
            None
        };
        Ok(self.alloc(Ast::Enumerator { name, value }))
    }

    /// `pointer = '*' type-qualifier-list? pointer?`, right-recursive so
    /// the first `*` becomes the outer node and each subsequent `*`
    /// nests inside it as `next`.
    fn parse_pointer(&mut self) -> Result<Option<Node<'arena, 'src>>, ParserError> {
        if !self.check(TokenKind::Star) {
            return Ok(None);
        }
        self.recurse(|p| {
            p.bump();
            let mut qualifiers = Qualifiers::default();
            loop {
                match p.peek().kind {
                    TokenKind::KeywordConst => {
                        p.bump();
                        qualifiers.const_ = true;
                    }
                    TokenKind::KeywordVolatile => {
                        p.bump();
                        qualifiers.volatile = true;
                    }
                    _ => break,
                }
            }
            let next = p.parse_pointer()?;
            Ok(Some(p.alloc(Ast::Pointer { qualifiers, next })))
        })
    }

    /// `abstract-declarator = pointer? direct-abstract-declarator`.
    /// `require_name` is set only for struct-declarators, where the
    /// grammar demands an identifier somewhere in the declarator; we
    /// check the coarse case (nothing at all was parsed) and leave
    /// deeper structural validation to the grammar shape itself.
    pub(crate) fn parse_abstract_declarator(
        &mut self,
        require_name: bool,
    ) -> Result<Node<'arena, 'src>, ParserError> {
        let pointer = self.parse_pointer()?;
        let direct = self.parse_direct_abstract_declarator()?;
        if require_name && pointer.is_none() && direct.is_none() {
            return Err(self.error_here("identifier"));
        }
        Ok(self.alloc(Ast::AbstractDeclarator { pointer, direct }))
    }

    /// The direct-abstract-declarator loop: builds left-to-right so that
    /// `int(*)[3]` yields a pointer wrapped in a `None`-kind grouping with
    /// an `Array` parent, and `(*a)[10]` yields
    /// `Array(pointer(Name("a")))`.
    fn parse_direct_abstract_declarator(
        &mut self,
    ) -> Result<Option<Node<'arena, 'src>>, ParserError> {
        let mut base: Option<Node<'arena, 'src>> = None;
        loop {
            match self.peek().kind {
                TokenKind::Identifier if base.is_none() => {
                    let name = self.bump();
                    base = Some(self.alloc(Ast::DirectAbstractDeclarator(
                        DirectAbstractDeclarator::Name(name),
                    )));
                }
                TokenKind::LBracket => {
                    self.bump();
                    let size = if self.check(TokenKind::RBracket) {
                        None
                    } else {
                        Some(self.parse_conditional()?)
                    };
                    self.expect(TokenKind::RBracket, "]")?;
                    base = Some(self.alloc(Ast::DirectAbstractDeclarator(
                        DirectAbstractDeclarator::Array { base, size },
                    )));
                }
                TokenKind::LParen => {
                    // Only the very first element of the chain can be a
                    // parenthesized grouping; once a base exists, a `(`
                    // always continues the chain as a function declarator.
                    let next = self.peek_n(1);
                    let is_grouping = base.is_none()
                        && matches!(
                            next.kind,
                            TokenKind::Star | TokenKind::LParen | TokenKind::LBracket
                        );
                    if is_grouping {
                        base = Some(self.recurse(|p| {
                            p.bump();
                            let inner = p.parse_abstract_declarator(false)?;
                            p.expect(TokenKind::RParen, ")")?;
                            Ok(p.alloc(Ast::DirectAbstractDeclarator(
                                DirectAbstractDeclarator::None(inner),
                            )))
                        })?);
                    } else {
                        self.bump();
                        let params = if self.check(TokenKind::RParen) {
                            None
                        } else {
                            Some(self.parse_parameter_type_list()?)
                        };
                        self.expect(TokenKind::RParen, ")")?;
                        base = Some(self.alloc(Ast::DirectAbstractDeclarator(
                            DirectAbstractDeclarator::Function { base, params },
                        )));
                    }
                }
                _ => break,
            }
        }
        Ok(base)
    }

    /// `parameter-type-list = parameter-list (',' '...')?`. `...` is
    /// three consecutive `.` tokens, since the lexer emits each `.` on its
    /// own.
    fn parse_parameter_type_list(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let mut params = Vec::new();
        params.push(self.parse_parameter_declaration()?);
        let mut is_vararg = false;
        while self.eat(TokenKind::Comma) {
            if self.check(TokenKind::Dot)
                && self.peek_n(1).kind == TokenKind::Dot
                && self.peek_n(2).kind == TokenKind::Dot
            {
                self.bump();
                self.bump();
                self.bump();
                is_vararg = true;
                break;
            }
            params.push(self.parse_parameter_declaration()?);
        }
        let slice = self.arena.alloc_slice_copy(&params);
        Ok(self.alloc(Ast::ParameterList {
            params: slice,
            is_vararg,
        }))
    }

    /// `parameter-declaration = declaration-specifiers abstract-declarator?`.
    fn parse_parameter_declaration(&mut self) -> Result<Node<'arena, 'src>, ParserError> {
        let specifiers = self.parse_type_info(true)?;
        let declarator = if self.at_abstract_declarator_start() {
            Some(self.parse_abstract_declarator(false)?)
        } else {
            None
        };
        Ok(self.alloc(Ast::ParameterDeclaration {
            specifiers,
            declarator,
        }))
    }
}

fn bump_primitive_count(counts: &mut PrimitiveCounts, kind: TokenKind) {
    match kind {
        TokenKind::KeywordVoid => counts.void += 1,
        TokenKind::KeywordChar => counts.char += 1,
        TokenKind::KeywordShort => counts.short += 1,
        TokenKind::KeywordInt => counts.int += 1,
        TokenKind::KeywordLong => counts.long += 1,
        TokenKind::KeywordFloat => counts.float += 1,
        TokenKind::KeywordDouble => counts.double += 1,
        TokenKind::KeywordSigned => counts.signed += 1,
        TokenKind::KeywordUnsigned => counts.unsigned += 1,
        _ => unreachable!("bump_primitive_count called with a non-type-keyword token"),
    }
}

#[cfg(test)]
mod tests {
    use crate::{print_ast, DefaultTypePredicate, TokenStream};
    use bumpalo::Bump;

    fn parse(src: &str) -> String {
        let arena = Bump::new();
        let tokens = TokenStream::from_source(src.as_bytes());
        let result = crate::parse_type_name(&arena, &tokens, "<test>", &DefaultTypePredicate);
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
        let result = crate::parse_type_name(&arena, &tokens, "<test>", &DefaultTypePredicate);
        assert!(
            matches!(result.status, cparsec_util::ParseStatus::Fatal),
            "expected `{src}` to fail to parse"
        );
    }

    #[test]
    fn bare_primitive_keyword() {
        assert_eq!(parse("int"), "int");
    }

    #[test]
    fn primitive_keyword_order_is_canonical_regardless_of_source_order() {
        assert_eq!(parse("long unsigned int"), "unsigned long int");
    }

    #[test]
    fn void_prints_before_the_canonical_eight() {
        assert_eq!(parse("void"), "void");
    }

    #[test]
    fn const_qualifier_precedes_the_type() {
        assert_eq!(parse("const int"), "const int");
    }

    #[test]
    fn single_pointer_to_int() {
        assert_eq!(parse("int *"), "int *");
    }

    #[test]
    fn pointer_chain_nests_qualifiers_on_the_right_star() {
        assert_eq!(parse("int * const *"), "int * const *");
    }

    #[test]
    fn struct_tag_without_body() {
        assert_eq!(parse("struct Point"), "struct Point");
    }

    #[test]
    fn struct_body_without_tag() {
        assert_eq!(parse("struct { int x; int y; }"), "struct { int x; int y; }");
    }

    #[test]
    fn struct_tag_and_body_together() {
        assert_eq!(parse("struct Point { int x; int y; }"), "struct Point { int x; int y; }");
    }

    #[test]
    fn enum_with_explicit_values() {
        assert_eq!(parse("enum { A = 1, B = 2 }"), "enum { A = 1, B = 2 }");
    }

    #[test]
    fn array_abstract_declarator() {
        assert_eq!(parse("int[10]"), "int[10]");
    }

    #[test]
    fn unsized_array_abstract_declarator() {
        assert_eq!(parse("int[]"), "int[]");
    }

    #[test]
    fn function_returning_pointer_to_int() {
        assert_eq!(parse("int *(int, char)"), "int *(int, char)");
    }

    #[test]
    fn pointer_to_array_is_grouped() {
        assert_eq!(parse("int (*)[3]"), "int (*)[3]");
    }

    #[test]
    fn array_of_pointers_needs_no_grouping() {
        assert_eq!(parse("int *[3]"), "int *[3]");
    }

    #[test]
    fn variadic_parameter_list() {
        assert_eq!(parse("int (int, ...)"), "int (int, ...)");
    }

    #[test]
    fn mixing_struct_and_primitive_specifiers_is_a_structural_error() {
        fails("struct Point int");
    }

    #[test]
    fn bare_qualifier_with_no_type_specifier_fails() {
        fails("const");
    }
}
