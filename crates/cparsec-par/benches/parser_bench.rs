//! Parser benchmarks.
//!
//! Run with: `cargo bench --package cparsec-par`

use bumpalo::Bump;
use cparsec_par::{parse_expression, parse_type_name, DefaultTypePredicate, TokenStream};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_expression");

    let sources = [
        ("arithmetic", "a + b * c - d / e % f"),
        (
            "ternary_cast_chain",
            "cond ? (int)(a + b) : (long)(c - d)",
        ),
        (
            "postfix_chain",
            "obj.field->next[index].value(arg1, arg2, arg3)",
        ),
        ("assignment_chain", "a = b = c = d = e"),
        (
            "deep_binary_ladder",
            "a || b && c == d | e ^ f & g << h + i * j",
        ),
    ];

    for (name, source) in sources {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let arena = Bump::new();
                let tokens = TokenStream::from_source(black_box(source).as_bytes());
                parse_expression(&arena, &tokens, "<bench>", &DefaultTypePredicate)
            })
        });
    }

    group.finish();
}

fn bench_type_name(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_type_name");

    let sources = [
        ("qualified_pointer", "const int * volatile *"),
        (
            "struct_declarator",
            "struct Point { int x; int y; int z; }",
        ),
        ("function_declarator", "int (*)(int, char *, ...)"),
        ("array_of_pointers", "int *[10][20]"),
    ];

    for (name, source) in sources {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let arena = Bump::new();
                let tokens = TokenStream::from_source(black_box(source).as_bytes());
                parse_type_name(&arena, &tokens, "<bench>", &DefaultTypePredicate)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_expr, bench_type_name);
criterion_main!(benches);
