use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gin_rummy::deadwood::{all_partitions, calc_deadwood};
use gin_rummy::hand::CardSet;

fn bench_calc_deadwood(c: &mut Criterion) {
    let hands = [
        ("no_melds", "Ac 3s 5h 7d 9c Js Kh 2d 4c 6s"),
        ("overlapping", "4h 5h 6h 7h 7c 7s Kd Qd 2c 3s"),
        ("dense_11", "5c 6c 7c 8c 7s 7h 7d 6h 8h 6s 8s"),
    ];

    let mut g = c.benchmark_group("calc_deadwood");
    for (name, cards) in hands {
        let hand: CardSet = cards.parse().unwrap();
        g.bench_with_input(BenchmarkId::new("hand", name), &hand, |b, input| {
            b.iter(|| calc_deadwood(black_box(*input)))
        });
    }
    g.finish();
}

fn bench_all_partitions(c: &mut Criterion) {
    let hand: CardSet = "5c 6c 7c 8c 7s 7h 7d 6h 8h 6s 8s".parse().unwrap();
    c.bench_function("all_partitions_dense", |b| b.iter(|| all_partitions(black_box(hand))));
}

criterion_group!(benches, bench_calc_deadwood, bench_all_partitions);
criterion_main!(benches);
