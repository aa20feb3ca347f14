//! # Shared Types Crate
//!
//! Value objects used across the Proxy-Wallet workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: identifiers that cross crate boundaries
//!   (`Address`, `DataId`, `DeviceId`, `Hash`) are defined here only.
//! - **Hex on the wire**: fixed-size identifiers serialize as `0x`-prefixed
//!   lowercase hex so configuration files and notifications stay readable.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
