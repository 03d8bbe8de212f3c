use criterion::{black_box, criterion_group, criterion_main, Criterion};
use corelang::parser::parse_source;
use corelang::{Interpreter, RunOptions, Scanner, SymbolTable};
use std::io::Cursor;

const FACTORIAL: &str = include_str!("../demos/factorial.core");

fn scanner_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize factorial program", |b| {
        b.iter(|| {
            let mut scanner = Scanner::from_source(black_box(FACTORIAL)).unwrap();
            scanner.scan_tokens().unwrap()
        })
    });
}

fn parser_benchmark(c: &mut Criterion) {
    c.bench_function("parse factorial program", |b| {
        b.iter(|| {
            let mut symbols = SymbolTable::new();
            parse_source(black_box(FACTORIAL), &mut symbols).unwrap()
        })
    });
}

fn execution_benchmark(c: &mut Criterion) {
    c.bench_function("run factorial of 20", |b| {
        b.iter(|| {
            let mut interpreter = Interpreter::new(RunOptions {
                echo_program: false,
                prompt: false,
            });
            let mut output = Vec::new();
            interpreter
                .run_str(black_box(FACTORIAL), Cursor::new("20\n"), &mut output)
                .unwrap();
            output
        })
    });
}

criterion_group!(
    benches,
    scanner_benchmark,
    parser_benchmark,
    execution_benchmark
);
criterion_main!(benches);
