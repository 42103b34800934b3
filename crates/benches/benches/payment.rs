//! Benchmarks for complete payment proofs

use benches::payment_params;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use payment::{verify_all, PaymentWitness, VerifyContext};
use privacy_core::ProofParams;
use rand::thread_rng;

fn bench_payment_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("payment_proof");
    let config = ProofParams::default();

    for (n_input, n_output) in [(1, 1), (2, 2), (4, 2)] {
        let id = format!("{n_input}x{n_output}");
        let (params, ledger) = payment_params(n_input, n_output, config.ring_size());
        let mut rng = thread_rng();
        let fee = params.fee;
        let witness = PaymentWitness::new(params, &config, &mut rng).unwrap();
        let proof = witness.prove(&mut rng).unwrap();
        let ctx = VerifyContext {
            fee,
            ring_size_exp: config.ring_size_exp,
            source: &ledger,
        };

        group.bench_with_input(BenchmarkId::new("prove", &id), &witness, |b, witness| {
            b.iter(|| black_box(witness.prove(&mut rng).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("verify", &id), &proof, |b, proof| {
            b.iter(|| black_box(proof).verify(&ctx).unwrap());
        });
    }

    group.finish();
}

fn bench_parallel_verification(c: &mut Criterion) {
    let config = ProofParams::default();
    let (params, ledger) = payment_params(1, 2, config.ring_size());
    let mut rng = thread_rng();
    let fee = params.fee;
    let proof = PaymentWitness::new(params, &config, &mut rng)
        .unwrap()
        .prove(&mut rng)
        .unwrap();
    let ctx = VerifyContext {
        fee,
        ring_size_exp: config.ring_size_exp,
        source: &ledger,
    };
    let batch: Vec<_> = (0..16).map(|_| (proof.clone(), ctx)).collect();

    c.bench_function("payment_verify_all_16", |b| {
        b.iter(|| black_box(verify_all(&batch)));
    });
}

criterion_group!(benches, bench_payment_proof, bench_parallel_verification);
criterion_main!(benches);
