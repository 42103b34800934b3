//! Benchmarks for serial number proofs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve25519_dalek::scalar::Scalar;
use privacy_core::PedersenBasis;
use rand::thread_rng;
use serial_number::{SerialNumberNoPrivacyWitness, SerialNumberPrivacyWitness};

fn bench_serial_number_privacy(c: &mut Criterion) {
    let mut group = c.benchmark_group("serial_number_privacy");
    let mut rng = thread_rng();
    let witness = SerialNumberPrivacyWitness::from_secrets(
        PedersenBasis::global(),
        Scalar::random(&mut rng),
        Scalar::random(&mut rng),
        Scalar::random(&mut rng),
        Scalar::random(&mut rng),
    );
    let proof = witness.prove(None, &mut rng).unwrap();

    group.bench_function("prove", |b| b.iter(|| black_box(witness.prove(None, &mut rng).unwrap())));
    group.bench_function("verify", |b| b.iter(|| black_box(&proof).verify(None).unwrap()));
    group.finish();
}

fn bench_serial_number_no_privacy(c: &mut Criterion) {
    let mut group = c.benchmark_group("serial_number_no_privacy");
    let mut rng = thread_rng();
    let witness = SerialNumberNoPrivacyWitness::from_secrets(
        PedersenBasis::global(),
        Scalar::random(&mut rng),
        Scalar::random(&mut rng),
    );
    let proof = witness.prove(None, &mut rng).unwrap();

    group.bench_function("prove", |b| b.iter(|| black_box(witness.prove(None, &mut rng).unwrap())));
    group.bench_function("verify", |b| b.iter(|| black_box(&proof).verify(None).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_serial_number_privacy, bench_serial_number_no_privacy);
criterion_main!(benches);
