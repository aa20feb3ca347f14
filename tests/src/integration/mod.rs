//! # Integration Tests
//!
//! Flows that cross the signature, wallet, bus and telemetry crates.

pub mod bus_observation;
pub mod concurrency;
pub mod metrics;
pub mod known_vectors;
pub mod relayed_gas;
