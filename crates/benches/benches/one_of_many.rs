//! Benchmarks for one-out-of-many proofs

use benches::ring_with_zero;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use one_of_many::OneOutOfManyWitness;
use rand::thread_rng;

fn bench_one_of_many_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_of_many_generation");

    for ring_exp in [2, 3, 4, 6] {
        group.throughput(Throughput::Elements(1 << ring_exp));
        let (statement, rand) = ring_with_zero(ring_exp, 1);
        let witness = OneOutOfManyWitness::new(statement, rand, 1).unwrap();

        group.bench_with_input(BenchmarkId::new("prove", 1 << ring_exp), &witness, |b, witness| {
            let mut rng = thread_rng();
            b.iter(|| black_box(witness.prove(&mut rng).unwrap()));
        });
    }

    group.finish();
}

fn bench_one_of_many_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_of_many_verification");

    for ring_exp in [2, 3, 4, 6] {
        group.throughput(Throughput::Elements(1 << ring_exp));
        let (statement, rand) = ring_with_zero(ring_exp, 1);
        let proof = OneOutOfManyWitness::new(statement, rand, 1)
            .unwrap()
            .prove(&mut thread_rng())
            .unwrap();

        group.bench_with_input(BenchmarkId::new("verify", 1 << ring_exp), &proof, |b, proof| {
            b.iter(|| black_box(proof).verify().unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_one_of_many_generation, bench_one_of_many_verification);
criterion_main!(benches);
