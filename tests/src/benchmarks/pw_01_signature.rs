//! # PW-01 Signature Verification Benchmarks
//!
//! Recovery cost dominates every relayed call and every session start.

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use pw_01_signature_verification::test_helpers::{generate_keypair, sign_digest, sign_prehash};
use pw_01_signature_verification::{
    keccak256, recover_address, to_signed_message_hash, EcdsaSignature,
};
use rand::Rng;
use shared_types::Hash;
use std::time::Duration;

fn random_digest() -> Hash {
    let mut digest = [0u8; 32];
    rand::thread_rng().fill(&mut digest);
    digest
}

pub fn bench_recover_address(c: &mut Criterion) {
    let mut group = c.benchmark_group("pw-01/recover_address");
    group.measurement_time(Duration::from_secs(10));

    let (key, _) = generate_keypair();
    let digest = random_digest();
    let signature = sign_prehash(&digest, &key).to_bytes();

    group.bench_function("single", |b| {
        b.iter(|| black_box(recover_address(black_box(&digest), black_box(&signature))))
    });

    for size in [10usize, 100, 1000] {
        let batch: Vec<(Hash, [u8; 65])> = (0..size)
            .map(|_| {
                let digest = random_digest();
                let signature = sign_prehash(&digest, &key).to_bytes();
                (digest, signature)
            })
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch", size), &batch, |b, batch| {
            b.iter(|| {
                batch
                    .iter()
                    .filter(|(digest, signature)| recover_address(digest, signature).is_ok())
                    .count()
            })
        });
    }

    group.finish();
}

pub fn bench_adversarial_signatures(c: &mut Criterion) {
    let mut group = c.benchmark_group("pw-01/adversarial");

    let (key, _) = generate_keypair();
    let digest = random_digest();
    let valid = sign_digest(&digest, &key);

    // Malformed signatures fail while parsing
    let mut bad_v = valid.clone();
    bad_v.v = 29;
    let garbage = EcdsaSignature::from_parts([0xFF; 32], [0xFF; 32], 27);

    group.bench_function("bad_recovery_id", |b| {
        b.iter(|| black_box(recover_address(&digest, &bad_v.to_bytes()).is_err()))
    });
    group.bench_function("out_of_range_scalars", |b| {
        b.iter(|| black_box(recover_address(&digest, &garbage.to_bytes()).is_err()))
    });

    group.finish();
}

pub fn bench_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pw-01/hashing");
    let digest = random_digest();

    group.bench_function("keccak256_32b", |b| b.iter(|| black_box(keccak256(&digest))));
    group.bench_function("signed_message_hash", |b| {
        b.iter(|| black_box(to_signed_message_hash(&digest)))
    });

    group.finish();
}
