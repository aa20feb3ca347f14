//! # Wallet State
//!
//! The whole contract state as one value. The service clones it per call,
//! mutates the clone and swaps it in on success.

use super::administrators::AdministratorSet;
use super::gas::GasMeter;
use super::ledger::Ledger;
use super::sessions::SessionBook;
use super::users::UserRegistry;
use crate::config::WalletConfig;
use crate::errors::{ConfigError, WalletError};
use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Whether the contract still accepts calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Active,
    /// Terminal; set by `kill`.
    Inactive,
}

/// Complete contract state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    /// Fixed at construction.
    pub owner: Address,
    /// The contract's own ledger account.
    pub contract_address: Address,
    /// Name-registry contract, stored and never called.
    pub name_registry: Option<Address>,
    pub administrators: AdministratorSet,
    pub users: UserRegistry,
    pub sessions: SessionBook,
    pub ledger: Ledger,
    pub gas: GasMeter,
    pub lifecycle: Lifecycle,
}

impl WalletState {
    /// Build the initial state from a configuration.
    pub fn genesis(config: &WalletConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let owner = config.owner()?;
        let mut state = Self {
            owner,
            contract_address: config.contract_address,
            name_registry: config.name_registry,
            administrators: AdministratorSet::from_members(config.administrators.clone()),
            users: UserRegistry::default(),
            sessions: SessionBook::default(),
            ledger: Ledger::default(),
            gas: GasMeter::default(),
            lifecycle: Lifecycle::Active,
        };

        if let Some(user) = &config.initial_user {
            state
                .users
                .upsert(user.id, user.username.clone(), user.public_key.clone());
        }

        for allocation in &config.allocations {
            state
                .ledger
                .credit(allocation.address, allocation.amount)
                .map_err(|_| ConfigError::AllocationOverflow(allocation.address))?;
        }

        Ok(state)
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn ensure_active(&self) -> Result<(), WalletError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(WalletError::ContractInactive)
        }
    }

    /// Owner or administrator.
    pub fn is_privileged(&self, address: &Address) -> bool {
        *address == self.owner || self.administrators.contains(address)
    }

    pub fn require_privileged(
        &self,
        principal: Address,
        operation: &'static str,
    ) -> Result<(), WalletError> {
        if self.is_privileged(&principal) {
            Ok(())
        } else {
            Err(WalletError::Unauthorized {
                principal,
                operation,
            })
        }
    }

    pub fn require_owner(
        &self,
        principal: Address,
        operation: &'static str,
    ) -> Result<(), WalletError> {
        if principal == self.owner {
            Ok(())
        } else {
            Err(WalletError::Unauthorized {
                principal,
                operation,
            })
        }
    }

    /// Owner, administrator or registered user.
    pub fn may_open_session(&self, signer: &Address) -> bool {
        self.is_privileged(signer) || self.users.contains(signer)
    }
}
