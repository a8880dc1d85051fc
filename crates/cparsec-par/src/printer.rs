//! The pretty-printer: reproduces a canonically parenthesized,
//! semantically equivalent textual form of an AST.
//! Operator spellings are never built into a runtime table — they come
//! straight from `TokenKind`'s `Display` impl, a `const`-shaped `match`.

use crate::ast::{
    Ast, ConstantKind, DirectAbstractDeclarator, PostfixBinaryKind, PostfixBinaryRhs,
    PrimitiveCounts, TagKind, TypeInfo, TypeInfoKind,
};
use crate::Node;

/// Prints an AST root — an expression or a type-name — to canonical
/// source text. Must not be called on a `Fatal` parse result's node,
/// whose contents are unspecified except for kind tags.
pub fn print_ast(root: &Ast<'_, '_>) -> String {
    print_node(root)
}

fn print_node(node: &Ast<'_, '_>) -> String {
    match node {
        Ast::PrimaryIdent(tok) => tok.text().to_string(),
        Ast::PrimaryString(tok) => tok.text().to_string(),
        Ast::PrimaryConstant { token, kind } => match kind {
            ConstantKind::Char => format!("'{}'", token.text()),
            ConstantKind::Int | ConstantKind::Float => token.text().to_string(),
        },
        Ast::Unary { op, operand } => format!("{}{}", op.kind, print_node(*operand)),
        Ast::Cast { type_name, operand } => {
            format!("({}){}", print_node(*type_name), print_node(*operand))
        }
        Ast::PostfixUnary { op, operand } => format!("{}{}", print_node(*operand), op.kind),
        Ast::PostfixBinary { kind, lhs, rhs } => print_postfix_binary(*kind, *lhs, rhs),
        Ast::ArgumentList(items) => items
            .iter()
            .map(|n| print_node(*n))
            .collect::<Vec<_>>()
            .join(", "),
        Ast::Multiplicative(b) | Ast::Additive(b) | Ast::Shift(b) | Ast::Relational(b)
        | Ast::Equality(b) | Ast::And(b) | Ast::Xor(b) | Ast::Or(b) | Ast::LogicalAnd(b)
        | Ast::LogicalOr(b) => format!(
            "({} {} {})",
            print_node(b.lhs),
            b.op.kind,
            print_node(b.rhs)
        ),
        Ast::Assignment { op, lhs, rhs } => {
            format!("({} {} {})", print_node(*lhs), op.kind, print_node(*rhs))
        }
        Ast::Ternary {
            condition,
            then_branch,
            else_branch,
        } => format!(
            "({} ? {} : {})",
            print_node(*condition),
            print_node(*then_branch),
            print_node(*else_branch)
        ),
        Ast::SizeofExpr(expr) => format!("sizeof {}", print_node(*expr)),
        Ast::SizeofType(type_name) => format!("sizeof({})", print_node(*type_name)),

        Ast::TypeName {
            specifiers,
            declarator,
        } => print_type_name(*specifiers, *declarator),
        Ast::TypeInfo(info) => print_type_info(info),
        Ast::Pointer { .. } => print_pointer_chain(node),
        Ast::AbstractDeclarator { pointer, direct } => print_abstract_declarator(*pointer, *direct),
        Ast::DirectAbstractDeclarator(d) => print_direct_abstract_declarator(d),
        Ast::StructDeclarator { declarator } => {
            declarator.map(|d| print_node(d)).unwrap_or_default()
        }
        Ast::StructDeclaratorBitfield { declarator, width } => {
            let d = declarator.map(|d| print_node(d)).unwrap_or_default();
            if d.is_empty() {
                format!(": {}", print_node(*width))
            } else {
                format!("{} : {}", d, print_node(*width))
            }
        }
        Ast::StructDeclaratorList(items) => items
            .iter()
            .map(|n| print_node(*n))
            .collect::<Vec<_>>()
            .join(", "),
        Ast::StructDeclaration {
            specifiers,
            declarators,
        } => format!("{} {};", print_node(*specifiers), print_node(*declarators)),
        Ast::StructDeclarationList(items) => items
            .iter()
            .map(|n| print_node(*n))
            .collect::<Vec<_>>()
            .join(" "),
        Ast::Enumerator { name, value } => match value {
            Some(v) => format!("{} = {}", name.text(), print_node(v)),
            None => name.text().to_string(),
        },
        Ast::EnumeratorList(items) => items
            .iter()
            .map(|n| print_node(*n))
            .collect::<Vec<_>>()
            .join(", "),
        Ast::ParameterList { params, is_vararg } => {
            let mut parts: Vec<String> = params.iter().map(|n| print_node(*n)).collect();
            if *is_vararg {
                parts.push("...".to_string());
            }
            parts.join(", ")
        }
        Ast::ParameterDeclaration {
            specifiers,
            declarator,
        } => match declarator {
            Some(d) => format!("{} {}", print_node(*specifiers), print_node(d)),
            None => print_node(*specifiers),
        },
    }
}

fn print_postfix_binary(
    kind: PostfixBinaryKind,
    lhs: &Ast<'_, '_>,
    rhs: &PostfixBinaryRhs<'_, '_>,
) -> String {
    match (kind, rhs) {
        (PostfixBinaryKind::ArrayAccess, PostfixBinaryRhs::Expr(index)) => {
            format!("{}[{}]", print_node(lhs), print_node(*index))
        }
        (PostfixBinaryKind::Call, PostfixBinaryRhs::Arguments(args)) => {
            let args_str = args.map(|a| print_node(a)).unwrap_or_default();
            format!("{}({})", print_node(lhs), args_str)
        }
        (PostfixBinaryKind::Member, PostfixBinaryRhs::Name(name)) => {
            format!("{}.{}", print_node(lhs), name.text())
        }
        (PostfixBinaryKind::ArrowMember, PostfixBinaryRhs::Name(name)) => {
            format!("{}->{}", print_node(lhs), name.text())
        }
        _ => unreachable!("PostfixBinaryKind and PostfixBinaryRhs are always paired consistently"),
    }
}

fn print_type_name(specifiers: &Ast<'_, '_>, declarator: Option<Node<'_, '_>>) -> String {
    let spec_str = print_node(specifiers);
    match declarator {
        Some(d) => format!("{} {}", spec_str, print_node(d)),
        None => spec_str,
    }
}

fn print_type_info(info: &TypeInfo<'_, '_>) -> String {
    let mut parts = Vec::new();
    if info.storage.typedef {
        parts.push("typedef".to_string());
    }
    if info.storage.extern_ {
        parts.push("extern".to_string());
    }
    if info.storage.static_ {
        parts.push("static".to_string());
    }
    if info.storage.auto {
        parts.push("auto".to_string());
    }
    if info.storage.register {
        parts.push("register".to_string());
    }
    // Qualifiers print before the type kind.
    if info.qualifiers.const_ {
        parts.push("const".to_string());
    }
    if info.qualifiers.volatile {
        parts.push("volatile".to_string());
    }
    match &info.kind {
        TypeInfoKind::Primitive(counts) => push_primitive_parts(&mut parts, counts),
        TypeInfoKind::Tag(spec) => {
            parts.push(
                match spec.kind {
                    TagKind::Struct => "struct",
                    TagKind::Union => "union",
                    TagKind::Enum => "enum",
                }
                .to_string(),
            );
            if let Some(tag) = spec.tag {
                parts.push(tag.text().to_string());
            }
            if let Some(body) = spec.body {
                parts.push(format!("{{ {} }}", print_node(body)));
            }
        }
    }
    parts.join(" ")
}

/// `void` is printed first (it never combines with the other eight), then
/// the canonical order: `unsigned signed long short int char float
/// double`.
fn push_primitive_parts(parts: &mut Vec<String>, counts: &PrimitiveCounts) {
    push_n(parts, "void", counts.void);
    push_n(parts, "unsigned", counts.unsigned);
    push_n(parts, "signed", counts.signed);
    push_n(parts, "long", counts.long);
    push_n(parts, "short", counts.short);
    push_n(parts, "int", counts.int);
    push_n(parts, "char", counts.char);
    push_n(parts, "float", counts.float);
    push_n(parts, "double", counts.double);
}

fn push_n(parts: &mut Vec<String>, word: &str, count: u8) {
    for _ in 0..count {
        parts.push(word.to_string());
    }
}

fn print_pointer_chain(node: &Ast<'_, '_>) -> String {
    match node {
        Ast::Pointer { qualifiers, next } => {
            let mut s = String::from("*");
            if qualifiers.const_ {
                s.push_str(" const");
            }
            if qualifiers.volatile {
                s.push_str(" volatile");
            }
            if let Some(n) = next {
                if qualifiers.const_ || qualifiers.volatile {
                    s.push(' ');
                }
                s.push_str(&print_pointer_chain(n));
            }
            s
        }
        _ => unreachable!("print_pointer_chain only ever called on a Pointer node"),
    }
}

fn print_abstract_declarator(
    pointer: Option<Node<'_, '_>>,
    direct: Option<Node<'_, '_>>,
) -> String {
    let mut s = String::new();
    if let Some(p) = pointer {
        s.push_str(&print_pointer_chain(p));
    }
    if let Some(d) = direct {
        s.push_str(&print_node(d));
    }
    s
}

fn print_direct_abstract_declarator(d: &DirectAbstractDeclarator<'_, '_>) -> String {
    match d {
        DirectAbstractDeclarator::None(inner) => format!("({})", print_node(inner)),
        DirectAbstractDeclarator::Name(tok) => tok.text().to_string(),
        DirectAbstractDeclarator::Array { base, size } => {
            let base_str = base.map(|b| print_node(b)).unwrap_or_default();
            let size_str = size.map(|e| print_node(e)).unwrap_or_default();
            format!("{}[{}]", base_str, size_str)
        }
        DirectAbstractDeclarator::Function { base, params } => {
            let base_str = base.map(|b| print_node(b)).unwrap_or_default();
            let params_str = params.map(|p| print_node(p)).unwrap_or_default();
            format!("{}({})", base_str, params_str)
        }
    }
}
