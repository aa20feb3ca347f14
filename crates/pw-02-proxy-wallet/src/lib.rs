//! # PW-02 Proxy Wallet - Access-Control Wallet Contract
//!
//! A single stateful wallet that keeps a governance set of administrators,
//! registers users and their public keys, opens device sessions from
//! off-chain signatures, moves value between ledger accounts, and reimburses
//! relayers for the cost of calls they submitted.
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Administrators | `domain/administrators.rs` | Ordered, grow-only governance set |
//! | Users | `domain/users.rs` | Username and public key per identity |
//! | Sessions | `domain/sessions.rs` | Device sessions with tombstones |
//! | Ledger | `domain/ledger.rs` | Balances and conserving transfers |
//! | Gas | `domain/gas.rs` | Relayer cost schedule and accumulator |
//! | State | `domain/state.rs` | Whole-contract state, roles, lifecycle |
//! | Service | `service.rs` | Locking, atomic commit, notifications |
//!
//! ## Authorization
//!
//! | Operation | Principal must be |
//! |-----------|-------------------|
//! | `add_administrator` | owner or administrator |
//! | `refund_gas_costs` | owner or administrator (recipient too) |
//! | `kill` | owner |
//! | `transfer` | the debited account |
//! | `start_session` | anyone; the *signer* must be owner, administrator or user |
//! | user setters, `close_session`, `deposit` | anyone |
//!
//! ## Usage Example
//!
//! ```ignore
//! use pw_02_proxy_wallet::prelude::*;
//! use shared_bus::InMemoryEventBus;
//! use std::sync::Arc;
//!
//! let config = WalletConfig::from_json_file("wallet.json")?;
//! let bus = Arc::new(InMemoryEventBus::new());
//! let wallet = ProxyWalletService::new(config, InMemoryStateStore::new(), bus)?;
//!
//! let owner = Caller::Direct(wallet.owner()?);
//! wallet.add_administrator(&owner, new_admin)?;
//! ```

// Crate-level lints
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::InMemoryStateStore;
    pub use crate::config::{Allocation, InitialUser, WalletConfig};
    pub use crate::domain::{
        Caller, GasSchedule, Lifecycle, Operation, Session, SessionPayload, StartSessionRequest,
        User, WalletState,
    };
    pub use crate::errors::{ConfigError, WalletError};
    pub use crate::ports::{ProxyWalletApi, StoreError, WalletStateStore};
    pub use crate::service::{InMemoryWallet, ProxyWalletService, ServiceStats};
}

pub use prelude::*;
