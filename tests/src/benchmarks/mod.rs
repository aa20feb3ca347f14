//! # Proxy-Wallet Benchmarks
//!
//! Criterion benchmark bodies per crate, wired up in
//! `benches/wallet_benchmarks.rs`.

pub mod pw_01_signature;
pub mod pw_02_wallet;
