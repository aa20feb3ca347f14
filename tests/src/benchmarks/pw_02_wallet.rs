//! # PW-02 Proxy Wallet Benchmarks
//!
//! Full call pipeline: authorization, snapshot, invariant checks, commit
//! and publish.

use crate::fixtures::{session_request, WalletHarness};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use pw_02_proxy_wallet::prelude::*;
use shared_types::{Address, DataId, DeviceId, U256};
use std::time::Duration;

pub fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("pw-02/transfer");
    group.measurement_time(Duration::from_secs(10));

    let alice = Address::new([0xA1; 20]);
    let bob = Address::new([0xB0; 20]);
    let h = WalletHarness::with_config(|config| {
        config.allocations.push(Allocation {
            address: alice,
            amount: U256::from(u64::MAX),
        });
    })
    .expect("harness");
    let caller = Caller::Direct(alice);

    group.bench_function("direct", |b| {
        b.iter(|| black_box(h.wallet.transfer(&caller, alice, bob, U256::one())))
    });

    let relayed = h.relayed_by(&h.admins[0]).expect("relayed caller");
    group.bench_function("rejected_wrong_principal", |b| {
        b.iter(|| black_box(h.wallet.transfer(&relayed, alice, bob, U256::one()).is_err()))
    });

    group.finish();
}

pub fn bench_session_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("pw-02/sessions");
    group.measurement_time(Duration::from_secs(10));

    let h = WalletHarness::new().expect("harness");
    let device = DeviceId::new([0x65; 32]);
    let data_id = DataId::new([0xBE; 32]);
    let request = session_request(&h.admins[0], data_id, device);

    group.bench_function("start_and_close", |b| {
        b.iter(|| {
            h.wallet
                .start_session(&h.owner(), request.clone())
                .expect("start");
            black_box(h.wallet.close_session(&h.owner(), data_id).expect("close"))
        })
    });

    for open in [10usize, 100, 1000] {
        let h = WalletHarness::new().expect("harness");
        for i in 0..open {
            let mut key = [0u8; 32];
            key[..8].copy_from_slice(&(i as u64).to_be_bytes());
            h.wallet
                .start_session(&h.owner(), session_request(&h.admins[0], DataId::new(key), device))
                .expect("seed session");
        }

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("check_state", open), &h, |b, h| {
            b.iter(|| black_box(h.wallet.check_session_state(DataId::new([0; 32]))))
        });
    }

    group.finish();
}

pub fn bench_relayed_admin_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("pw-02/relayed");

    let h = WalletHarness::new().expect("harness");
    let relayed = h.relayed_by(&h.admins[1]).expect("relayed caller");
    let mut next = 0u64;

    group.bench_function("set_new_user", |b| {
        b.iter(|| {
            next += 1;
            let mut id = [0u8; 20];
            id[..8].copy_from_slice(&next.to_be_bytes());
            black_box(h.wallet.set_new_user(
                &relayed,
                Address::new(id),
                "bench".into(),
                "0x04".into(),
            ))
        })
    });

    group.finish();
}
