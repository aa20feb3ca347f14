//! # In-Memory State Store
//!
//! Keeps the last committed snapshot in memory. Used by tests and by
//! embedders that do not need persistence.

use crate::domain::state::WalletState;
use crate::ports::outbound::{StoreError, WalletStateStore};
use parking_lot::RwLock;

/// In-memory `WalletStateStore`.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    snapshot: RwLock<Option<WalletState>>,
    commits: RwLock<u64>,
}

impl InMemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot.
    #[must_use]
    pub fn with_snapshot(state: WalletState) -> Self {
        Self {
            snapshot: RwLock::new(Some(state)),
            commits: RwLock::new(0),
        }
    }

    /// Number of successful commits.
    pub fn commits(&self) -> u64 {
        *self.commits.read()
    }
}

impl WalletStateStore for InMemoryStateStore {
    fn load(&self) -> Result<Option<WalletState>, StoreError> {
        Ok(self.snapshot.read().clone())
    }

    fn commit(&self, state: &WalletState) -> Result<(), StoreError> {
        *self.snapshot.write() = Some(state.clone());
        *self.commits.write() += 1;
        Ok(())
    }
}
