//! End-to-end interpreter benchmark: naive recursive fibonacci, the
//! worst case for environment churn (one new scope per call).

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use monkey::evaluator::eval_program;
use monkey::object::Environment;
use monkey::parser::Parser;

const FIB_SRC: &str = r#"
    let fibonacci = fn(x) {
        if (x < 2) {
            return x;
        } else {
            fibonacci(x - 1) + fibonacci(x - 2);
        }
    };
    fibonacci(15);
"#;

fn bench_fibonacci(c: &mut Criterion) {
    c.bench_function("eval_fibonacci_15", |b| {
        b.iter(|| {
            let program = Parser::parse(FIB_SRC).expect("benchmark source parses");
            let env = Environment::new();
            black_box(eval_program(&env, program))
        })
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_fibonacci", |b| {
        b.iter(|| black_box(Parser::parse(FIB_SRC).expect("benchmark source parses")))
    });
}

criterion_group!(benches, bench_fibonacci, bench_parse);
criterion_main!(benches);
