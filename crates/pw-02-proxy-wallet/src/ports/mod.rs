//! # Ports
//!
//! - `inbound`: the operations the wallet offers (`ProxyWalletApi`)
//! - `outbound`: what the wallet depends on (`WalletStateStore`)

pub mod inbound;
pub mod outbound;

pub use inbound::ProxyWalletApi;
pub use outbound::{StoreError, WalletStateStore};
