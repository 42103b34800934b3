//! Benchmarks for inner product argument

use benches::random_blindings;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ipa::InnerProductWitness;
use privacy_core::BulletproofGens;

const CACHE: [u8; 32] = [7u8; 32];

fn bench_ipa_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("ipa_generation");

    for vector_length in [8, 16, 32, 64, 128] {
        group.throughput(Throughput::Elements(vector_length as u64));
        let gens = BulletproofGens::new(vector_length);
        let a = random_blindings(vector_length);
        let b = random_blindings(vector_length);
        let p = gens.inner_product_commit(&a, &b).unwrap();
        let witness = InnerProductWitness::new(a, b, p);

        group.bench_with_input(
            BenchmarkId::new("prove", vector_length),
            &witness,
            |bencher, witness| {
                bencher.iter(|| {
                    let proof = witness.prove(&gens.g_vec, &gens.h_vec, &gens.u, black_box(&CACHE)).unwrap();
                    black_box(proof)
                });
            },
        );
    }

    group.finish();
}

fn bench_ipa_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("ipa_verification");

    for vector_length in [8, 16, 32, 64, 128] {
        group.throughput(Throughput::Elements(vector_length as u64));

        // Pre-generate proof for verification benchmark
        let gens = BulletproofGens::new(vector_length);
        let a = random_blindings(vector_length);
        let b = random_blindings(vector_length);
        let p = gens.inner_product_commit(&a, &b).unwrap();
        let proof = InnerProductWitness::new(a, b, p)
            .prove(&gens.g_vec, &gens.h_vec, &gens.u, &CACHE)
            .unwrap();

        group.bench_with_input(
            BenchmarkId::new("verify", vector_length),
            &proof,
            |bencher, proof| {
                bencher.iter(|| {
                    black_box(proof)
                        .verify(&gens.g_vec, &gens.h_vec, &gens.u, &CACHE)
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_ipa_generation, bench_ipa_verification);
criterion_main!(benches);
