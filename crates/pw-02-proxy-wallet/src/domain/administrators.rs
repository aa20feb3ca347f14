//! # Administrator Registry
//!
//! The governance set. Insertion-ordered, duplicate-free, grow-only.

use crate::errors::WalletError;
use serde::{Deserialize, Serialize};
use shared_types::Address;

/// Ordered set of administrator addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdministratorSet {
    members: Vec<Address>,
}

impl AdministratorSet {
    /// Build from a list already checked for duplicates.
    pub(crate) fn from_members(members: Vec<Address>) -> Self {
        Self { members }
    }

    /// Append `admin`, rejecting duplicates.
    pub fn add(&mut self, admin: Address) -> Result<(), WalletError> {
        if self.contains(&admin) {
            return Err(WalletError::DuplicateAdministrator(admin));
        }
        self.members.push(admin);
        Ok(())
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[Address] {
        &self.members
    }
}
