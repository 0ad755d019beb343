use criterion::{Criterion, criterion_group, criterion_main};
use std::collections::HashMap;
use std::hint::black_box;
use tiq::{EngineConfig, Record, TagEngine, parser::tokenize};

#[derive(Debug, Default, Record)]
struct Column {
    #[tiq(tag = "get(db, 'table')")]
    table: String,
    #[tiq(tag = "get(db, 'column')")]
    column: String,
    #[tiq(tag = "has(validate, 'required')")]
    required: bool,
    #[tiq(tag = "default(get(validate, 'max'), 255)")]
    max_length: u32,
    #[tiq(tag = "split(get(db, 'indexes'), '|')")]
    indexes: Vec<String>,
}

fn context() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("db", "table=users,column=email,indexes=by_email|by_domain"),
        ("validate", "required,max=320"),
    ])
}

fn benchmark_tokenizer(c: &mut Criterion) {
    let expression = "default(split(get(db, 'indexes'), '|'), ['a', 'b'])";

    c.bench_function("tokenizer", |b| {
        b.iter(|| black_box(tokenize(black_box(expression))))
    });
}

fn benchmark_compile(c: &mut Criterion) {
    let engine = TagEngine::with_config(EngineConfig::new().with_cache_programs(false));
    let expression = "default(get(validate, 'max'), 255)";

    c.bench_function("compile_uncached", |b| {
        b.iter(|| black_box(engine.compile(black_box(expression))))
    });
}

fn benchmark_resolve(c: &mut Criterion) {
    let ctx = context();

    let cached = TagEngine::new();
    c.bench_function("resolve_cached", |b| {
        b.iter(|| black_box(cached.resolve::<Column, _>(black_box(&ctx))))
    });

    let uncached = TagEngine::with_config(EngineConfig::new().with_cache_programs(false));
    c.bench_function("resolve_uncached", |b| {
        b.iter(|| black_box(uncached.resolve::<Column, _>(black_box(&ctx))))
    });
}

criterion_group!(
    benches,
    benchmark_tokenizer,
    benchmark_compile,
    benchmark_resolve
);
criterion_main!(benches);
