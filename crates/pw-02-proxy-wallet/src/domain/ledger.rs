//! # Ledger
//!
//! Address to balance map. Unknown accounts hold zero; zero balances are not
//! stored.

use crate::errors::WalletError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};
use std::collections::BTreeMap;

/// Account balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    balances: BTreeMap<Address, U256>,
}

impl Ledger {
    #[must_use]
    pub fn balance(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Add `amount` to `account`.
    pub fn credit(&mut self, account: Address, amount: U256) -> Result<(), WalletError> {
        let updated = self
            .balance(&account)
            .checked_add(amount)
            .ok_or(WalletError::BalanceOverflow(account))?;
        self.set(account, updated);
        Ok(())
    }

    /// Move `amount` from `from` to `to`. Leaves the ledger untouched on
    /// error.
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), WalletError> {
        let available = self.balance(&from);
        if amount > available {
            return Err(WalletError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        // Credit check first so a failed credit cannot leave a debit behind
        let credited = self
            .balance(&to)
            .checked_add(amount)
            .ok_or(WalletError::BalanceOverflow(to))?;
        self.set(from, available - amount);
        self.set(to, credited);
        Ok(())
    }

    /// Move the whole balance of `from` to `to`, returning the amount.
    pub fn sweep(&mut self, from: Address, to: Address) -> Result<U256, WalletError> {
        let amount = self.balance(&from);
        self.transfer(from, to, amount)?;
        Ok(amount)
    }

    /// Sum of all balances, `None` if it exceeds 256 bits.
    #[must_use]
    pub fn total_supply(&self) -> Option<U256> {
        self.balances
            .values()
            .try_fold(U256::zero(), |acc, balance| acc.checked_add(*balance))
    }

    /// Accounts with a non-zero balance.
    #[must_use]
    pub fn accounts(&self) -> usize {
        self.balances.len()
    }

    fn set(&mut self, account: Address, balance: U256) {
        if balance.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
    }
}
