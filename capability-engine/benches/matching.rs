//! Query path benchmarks over synthetic correspondent sets

use capability_engine::{BankCapability, CapabilityEngine, CapabilityQuery, ChargeTypes, InMemoryStore};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

const CURRENCIES: [&str; 8] = ["USD", "EUR", "GBP", "JPY", "CHF", "AED", "INR", "SGD"];

fn synthetic_banks(count: usize) -> Vec<BankCapability> {
    (0..count)
        .map(|i| {
            let currencies = CURRENCIES.iter().enumerate().filter(|(j, _)| (i + j) % 3 != 0).map(|(_, c)| *c);
            BankCapability::new(
                format!("BANK{:04}", i),
                currencies,
                i % 2 == 0,
                ChargeTypes::from_raw((i % 8) as u64),
            )
        })
        .collect()
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("capability_queries");
    let query = CapabilityQuery::new("usd", true, ChargeTypes::SHA | ChargeTypes::OWN);
    let restriction = ["EUR", "GBP", "JPY"];

    for size in [100usize, 1_000, 10_000] {
        let engine = CapabilityEngine::new(Arc::new(InMemoryStore::new(synthetic_banks(size))));

        group.bench_with_input(BenchmarkId::new("find_eligible_banks", size), &engine, |b, engine| {
            b.iter(|| engine.find_eligible_banks(black_box(&query)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("rank_eligible_banks", size), &engine, |b, engine| {
            b.iter(|| engine.rank_eligible_banks(black_box(&query)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("capabilities_per_bank", size), &engine, |b, engine| {
            b.iter(|| {
                engine
                    .capabilities_per_bank(black_box(&query), Some(&restriction[..]))
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
