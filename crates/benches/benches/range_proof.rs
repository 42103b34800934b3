//! Benchmarks for aggregated range proof generation and verification

use benches::random_blindings;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use privacy_core::Proof;
use range::{verify_batch, AggregatedRangeProof, AggregatedRangeWitness};
use rand::thread_rng;

fn prove(num_values: usize) -> AggregatedRangeProof {
    let mut rng = thread_rng();
    let values = (0..num_values as u64).map(|i| u64::MAX - i).collect();
    AggregatedRangeWitness::new(values, random_blindings(num_values))
        .unwrap()
        .prove(&mut rng)
        .unwrap()
}

fn bench_range_proof_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_generation");

    for num_values in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements(num_values as u64));

        group.bench_with_input(
            BenchmarkId::new("prove", num_values),
            &num_values,
            |b, &num_values| {
                let mut rng = thread_rng();
                let values: Vec<u64> = (0..num_values as u64).map(|i| 1000 * i + 1).collect();
                let witness = AggregatedRangeWitness::new(values, random_blindings(num_values)).unwrap();

                b.iter(|| {
                    let proof = witness.prove(&mut rng).unwrap();
                    black_box(proof)
                });
            },
        );
    }

    group.finish();
}

fn bench_range_proof_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_verification");

    for num_values in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements(num_values as u64));

        // Pre-generate proof for verification benchmark
        let proof = prove(num_values);

        group.bench_with_input(BenchmarkId::new("verify", num_values), &proof, |b, proof| {
            b.iter(|| black_box(proof).verify().unwrap());
        });
    }

    group.finish();
}

fn bench_range_proof_batch_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_batch_verification");

    for batch_size in [1, 4, 16] {
        group.throughput(Throughput::Elements(batch_size as u64));
        let proofs: Vec<_> = (0..batch_size).map(|_| prove(2)).collect();

        group.bench_with_input(BenchmarkId::new("batch", batch_size), &proofs, |b, proofs| {
            let mut rng = thread_rng();
            b.iter(|| verify_batch(black_box(proofs), &mut rng).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("individual", batch_size), &proofs, |b, proofs| {
            b.iter(|| {
                for proof in proofs {
                    proof.verify().unwrap();
                }
            });
        });
    }

    group.finish();
}

fn bench_range_proof_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_proof_size");

    for num_values in [1, 2, 4, 8] {
        let proof = prove(num_values);
        let bytes = proof.to_bytes();
        println!("Range proof size for {} values: {} bytes", num_values, bytes.len());

        group.bench_with_input(BenchmarkId::new("decode", num_values), &bytes, |b, bytes| {
            b.iter(|| AggregatedRangeProof::from_bytes(black_box(bytes)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_range_proof_generation,
    bench_range_proof_verification,
    bench_range_proof_batch_verification,
    bench_range_proof_size
);
criterion_main!(benches);
