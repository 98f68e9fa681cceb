//! Benchmarks for query evaluation over the fixture corpus.

#[path = "../../cardsearch-db/tests/common/mod.rs"]
mod common;

use cardsearch_engine::{CacheConfig, SearchConfig, SearchExecutor};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const QUERIES: &[(&str, &str)] = &[
    ("type", "t:forest"),
    ("edition_and_color", "e:lea c:u"),
    ("mana_variables", "mana>=mno OR mana=1hh"),
    ("alt", "e:lea -alt:e:m10"),
    ("part", "part:c:r part:c:u"),
    ("dates", "firstprint<1995 print>=2009"),
];

fn bench_execute(c: &mut Criterion) {
    let db = common::corpus();
    let executor = SearchExecutor::new(&db);

    let mut group = c.benchmark_group("execute");
    for (name, query) in QUERIES {
        group.bench_function(*name, |b| {
            b.iter(|| black_box(executor.execute(black_box(query)).map(|r| r.count())))
        });
    }
    group.finish();
}

fn bench_cached(c: &mut Criterion) {
    let db = common::corpus();
    let config = SearchConfig::builder()
        .with_cache(CacheConfig::default())
        .build();
    let executor = SearchExecutor::with_config(&db, config);

    c.bench_function("execute_cached", |b| {
        b.iter(|| black_box(executor.execute(black_box("e:lea -alt:e:m10")).map(|r| r.count())))
    });
}

fn bench_batch(c: &mut Criterion) {
    let db = common::corpus();
    let executor = SearchExecutor::new(&db);
    let queries: Vec<&str> = QUERIES.iter().map(|(_, query)| *query).collect();

    c.bench_function("execute_batch", |b| {
        b.iter(|| black_box(executor.execute_batch(black_box(&queries)).len()))
    });
}

criterion_group!(benches, bench_execute, bench_cached, bench_batch);
criterion_main!(benches);
