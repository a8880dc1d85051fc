//! Run with: `cargo bench --package cparsec-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cparsec_lex::lex;

fn token_count(source: &str) -> usize {
    lex(source.as_bytes()).len()
}

fn bench_lexer_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_expressions");

    let source = "a + b * (c - d) / e % f";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("arithmetic", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.bench_function("ternary_and_cast", |b| {
        b.iter(|| token_count(black_box("(cond) ? (int)x : (long)y")))
    });

    group.finish();
}

fn bench_lexer_type_names(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_type_names");

    let source = "struct point { int x, y; } *(*[10])(int, char *)";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("complex_declarator", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.bench_function("qualified_pointer", |b| {
        b.iter(|| token_count(black_box("const unsigned long int * volatile *")))
    });

    group.finish();
}

fn bench_lexer_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("integer", |b| b.iter(|| token_count(black_box("123456"))));
    group.bench_function("suffixed", |b| b.iter(|| token_count(black_box("123456ull"))));
    group.bench_function("float", |b| b.iter(|| token_count(black_box("3.14159e10f"))));
    group.bench_function("hex", |b| b.iter(|| token_count(black_box("0xDEADBEEFu"))));

    group.finish();
}

fn bench_lexer_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("short_string", |b| {
        b.iter(|| token_count(black_box("\"hello\"")))
    });

    group.bench_function("long_string", |b| {
        let source =
            "\"This is a longer string literal used for benchmarking the scanner's escape handling.\\n\"";
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_comments(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_comments");

    group.bench_function("line_comment", |b| {
        b.iter(|| token_count(black_box("a + b // trailing remark\n")))
    });

    group.bench_function("block_comment", |b| {
        b.iter(|| token_count(black_box("a /* spans\nmultiple\nlines */ + b")))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_expressions,
    bench_lexer_type_names,
    bench_lexer_numbers,
    bench_lexer_strings,
    bench_lexer_comments
);
criterion_main!(benches);
