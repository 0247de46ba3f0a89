use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use santa_pairing::{PairingEngine, SeededRandom};
use santa_types::{Participant, ParticipantSet};

fn make_group(size: usize, with_couples: bool) -> ParticipantSet {
    let participants = (0..size).map(|i| {
        let p = Participant::new(format!("p{i}"), format!("p{i}@example.com"));
        if with_couples && i + 1 < size && i % 2 == 0 {
            p.with_partner(format!("p{}", i + 1))
        } else {
            p
        }
    });
    ParticipantSet::new(participants).unwrap()
}

fn bench_pairing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pair");
    let engine = PairingEngine::new();

    for size in [4, 16, 64, 256] {
        let free = make_group(size, false);
        let coupled = make_group(size, true);

        group.bench_with_input(BenchmarkId::new("unconstrained", size), &size, |b, _| {
            let random = SeededRandom::new(size as u64);
            b.iter(|| black_box(engine.pair(&random, black_box(&free))));
        });

        group.bench_with_input(BenchmarkId::new("couples", size), &size, |b, _| {
            let random = SeededRandom::new(size as u64);
            b.iter(|| black_box(engine.pair(&random, black_box(&coupled))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pairing);
criterion_main!(benches);
