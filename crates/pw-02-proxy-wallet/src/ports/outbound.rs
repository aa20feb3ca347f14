//! # Driven Ports (SPI - Outbound)
//!
//! The wallet persists a full state snapshot after every committed call.
//! Notifications leave through `shared_bus::EventPublisher`.

use crate::domain::state::WalletState;
use thiserror::Error;

/// Errors from a state store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend refused the write.
    #[error("commit failed: {0}")]
    CommitFailed(String),

    /// A stored snapshot could not be decoded.
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

/// Snapshot persistence for `WalletState`.
pub trait WalletStateStore: Send + Sync {
    /// Last committed snapshot, if any.
    fn load(&self) -> Result<Option<WalletState>, StoreError>;

    /// Persist `state` as the new committed snapshot.
    ///
    /// Called while the wallet lock is held; an error aborts the call.
    fn commit(&self, state: &WalletState) -> Result<(), StoreError>;
}
