//! The AST model: one arena-allocated enum variant per catalogued kind.
//! Nodes own their children directly — no sharing, no cycles, no
//! reference counting — and every token referenced inside a node borrows
//! from the same source buffer the lexer scanned.

use cparsec_lex::Token;

/// A node, owned by the arena its parser was given. `'arena` is the
/// arena's lifetime; `'src` is the source buffer's.
pub type Node<'arena, 'src> = &'arena Ast<'arena, 'src>;

#[derive(Debug)]
pub enum Ast<'arena, 'src> {
    // ---- Primary expressions -------------------------------------------------
    PrimaryIdent(Token<'src>),
    PrimaryConstant {
        token: Token<'src>,
        kind: ConstantKind,
    },
    PrimaryString(Token<'src>),

    // ---- Unary / cast / postfix -----------------------------------------------
    /// Prefix `++`/`--`, or unary `& * + - ~ !` applied to a cast-expression.
    Unary {
        op: Token<'src>,
        operand: Node<'arena, 'src>,
    },
    Cast {
        type_name: Node<'arena, 'src>,
        operand: Node<'arena, 'src>,
    },
    /// Postfix `++`/`--`.
    PostfixUnary {
        op: Token<'src>,
        operand: Node<'arena, 'src>,
    },
    /// `expr[index]`, `expr(args)`, `expr.ident`, `expr->ident`.
    PostfixBinary {
        kind: PostfixBinaryKind,
        lhs: Node<'arena, 'src>,
        rhs: PostfixBinaryRhs<'arena, 'src>,
    },
    /// The comma-separated assignment-expressions inside a call's
    /// argument list, in source order, flattened — each element is itself
    /// one assignment-expression, so the left-to-right shape survives
    /// without a run of nested wrapper nodes.
    ArgumentList(&'arena [Node<'arena, 'src>]),

    // ---- Binary operator ladder --------------------
    Multiplicative(BinaryExpr<'arena, 'src>),
    Additive(BinaryExpr<'arena, 'src>),
    Shift(BinaryExpr<'arena, 'src>),
    Relational(BinaryExpr<'arena, 'src>),
    Equality(BinaryExpr<'arena, 'src>),
    And(BinaryExpr<'arena, 'src>),
    Xor(BinaryExpr<'arena, 'src>),
    Or(BinaryExpr<'arena, 'src>),
    LogicalAnd(BinaryExpr<'arena, 'src>),
    LogicalOr(BinaryExpr<'arena, 'src>),

    // ---- Conditional / assignment ----------------------------------------------
    Ternary {
        condition: Node<'arena, 'src>,
        then_branch: Node<'arena, 'src>,
        else_branch: Node<'arena, 'src>,
    },
    Assignment {
        op: Token<'src>,
        lhs: Node<'arena, 'src>,
        rhs: Node<'arena, 'src>,
    },

    // ---- sizeof ------------------------------------------------------------
    SizeofExpr(Node<'arena, 'src>),
    SizeofType(Node<'arena, 'src>),

    // ---- Type-name grammar --------------------------------------------------
    /// `specifier-qualifier-list abstract-declarator?`.
    TypeName {
        specifiers: Node<'arena, 'src>,
        declarator: Option<Node<'arena, 'src>>,
    },
    /// One accumulated specifier-qualifier-list / declaration-specifiers
    /// bag: primitive counters, struct/union/enum specifier, qualifier
    /// and storage-class bitflags.
    TypeInfo(TypeInfo<'arena, 'src>),
    /// `'*' type-qualifier-list? pointer?`, left-outermost: the first `*`
    /// is the outer node, whose `next` is the inner `*`.
    Pointer {
        qualifiers: Qualifiers,
        next: Option<Node<'arena, 'src>>,
    },
    AbstractDeclarator {
        pointer: Option<Node<'arena, 'src>>,
        direct: Option<Node<'arena, 'src>>,
    },
    DirectAbstractDeclarator(DirectAbstractDeclarator<'arena, 'src>),

    StructDeclarator {
        declarator: Option<Node<'arena, 'src>>,
    },
    StructDeclaratorBitfield {
        declarator: Option<Node<'arena, 'src>>,
        width: Node<'arena, 'src>,
    },
    StructDeclaratorList(&'arena [Node<'arena, 'src>]),
    StructDeclaration {
        specifiers: Node<'arena, 'src>,
        declarators: Node<'arena, 'src>,
    },
    StructDeclarationList(&'arena [Node<'arena, 'src>]),

    Enumerator {
        name: Token<'src>,
        value: Option<Node<'arena, 'src>>,
    },
    EnumeratorList(&'arena [Node<'arena, 'src>]),

    ParameterList {
        params: &'arena [Node<'arena, 'src>],
        is_vararg: bool,
    },
    ParameterDeclaration {
        specifiers: Node<'arena, 'src>,
        declarator: Option<Node<'arena, 'src>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantKind {
    Int,
    Float,
    Char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixBinaryKind {
    ArrayAccess,
    Call,
    Member,
    ArrowMember,
}

#[derive(Debug)]
pub enum PostfixBinaryRhs<'arena, 'src> {
    Expr(Node<'arena, 'src>),
    /// Call argument list; `None` is an empty `()`.
    Arguments(Option<Node<'arena, 'src>>),
    Name(Token<'src>),
}

/// Shared shape for every left-associative binary precedence level. The
/// `op` token is kept verbatim (not re-encoded into a separate operator
/// enum) so the printer can map it straight back to its spelling.
#[derive(Debug)]
pub struct BinaryExpr<'arena, 'src> {
    pub op: Token<'src>,
    pub lhs: Node<'arena, 'src>,
    pub rhs: Node<'arena, 'src>,
}

/// Type qualifiers (`const`, `volatile`) as a small bitset, set on
/// whichever `*` or specifier-qualifier-list they immediately follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Qualifiers {
    pub const_: bool,
    pub volatile: bool,
}

/// Storage-class keywords, OR-accumulated across a declaration-specifiers
/// list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorageClass {
    pub auto: bool,
    pub register: bool,
    pub static_: bool,
    pub extern_: bool,
    pub typedef: bool,
}

/// Per-primitive-keyword occurrence counters, in the canonical printing
/// order `unsigned signed long short int char float double`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimitiveCounts {
    /// Not part of the canonical print ordering of the other eight
    /// keywords, since `void` is mutually exclusive with all of them in
    /// valid C; printed first, see `printer.rs`.
    pub void: u8,
    pub unsigned: u8,
    pub signed: u8,
    pub long: u8,
    pub short: u8,
    pub int: u8,
    pub char: u8,
    pub float: u8,
    pub double: u8,
}

impl PrimitiveCounts {
    pub fn is_empty(&self) -> bool {
        *self == PrimitiveCounts::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Struct,
    Union,
    Enum,
}

/// A struct/union/enum specifier: an optional tag identifier and an
/// optional braced body, independent of each other — all four
/// combinations of tag-presence x body-presence parse.
#[derive(Debug)]
pub struct TagSpecifier<'arena, 'src> {
    pub kind: TagKind,
    pub tag: Option<Token<'src>>,
    /// `StructDeclarationList` for struct/union, `EnumeratorList` for enum.
    pub body: Option<Node<'arena, 'src>>,
}

/// One accumulated type-info node: either a primitive bag (possibly
/// empty counters plus qualifiers, e.g. a bare `const`) or a tag
/// specifier, never both — the specifier-accumulation state machine
/// rejects mixing a struct/union/enum specifier with a primitive one.
#[derive(Debug)]
pub enum TypeInfoKind<'arena, 'src> {
    Primitive(PrimitiveCounts),
    Tag(TagSpecifier<'arena, 'src>),
}

#[derive(Debug)]
pub struct TypeInfo<'arena, 'src> {
    pub kind: TypeInfoKind<'arena, 'src>,
    pub qualifiers: Qualifiers,
    pub storage: StorageClass,
}

impl<'arena, 'src> TypeInfo<'arena, 'src> {
    pub fn is_empty_primitive(&self) -> bool {
        matches!(&self.kind, TypeInfoKind::Primitive(p) if p.is_empty())
    }
}

/// `direct-abstract-declarator`, built left-to-right so that `(*a)[10]`
/// yields `Array(Name("a") wrapped in a pointer-grouping)`.
#[derive(Debug)]
pub enum DirectAbstractDeclarator<'arena, 'src> {
    /// A parenthesized abstract-declarator grouping with no identifier of
    /// its own, e.g. the `(*)` in `int (*)[3]`.
    None(Node<'arena, 'src>),
    Name(Token<'src>),
    Array {
        base: Option<Node<'arena, 'src>>,
        size: Option<Node<'arena, 'src>>,
    },
    Function {
        base: Option<Node<'arena, 'src>>,
        params: Option<Node<'arena, 'src>>,
    },
}
