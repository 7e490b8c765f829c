//! Order table benchmarks (Criterion).
//!
//! Run: `cargo bench` or `cargo bench --bench table`.

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use merchant_dashboard::{Generator, GeneratorConfig, OrderTable, SortKey};

const N: usize = 1000;

fn config(seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        seed,
        num_orders: N,
        now: NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        ..Default::default()
    }
}

fn bench_filter(c: &mut Criterion) {
    let cfg = config(42);
    let now = cfg.now;
    let mut group = c.benchmark_group("table");
    group.throughput(Throughput::Elements(N as u64));
    group.bench_function("filter_last_6_months_1000", |b| {
        b.iter_batched(
            || OrderTable::new(Generator::new(cfg.clone()).all_orders()),
            |mut table| {
                table.filter_by_date_range(6, now).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_sorts(c: &mut Criterion) {
    let cfg = config(123);
    let now = cfg.now;
    let mut group = c.benchmark_group("table");
    group.throughput(Throughput::Elements(N as u64));
    for (name, key) in [
        ("sort_by_date_1000", SortKey::Date),
        ("sort_by_product_1000", SortKey::Product),
        ("sort_by_price_asc_1000", SortKey::PriceAsc),
    ] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || OrderTable::new(Generator::new(cfg.clone()).all_orders()),
                |mut table| table.sort(key, now),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter, bench_sorts);
criterion_main!(benches);
