//! # User Registry
//!
//! Username and public key per identity. Both fields can be replaced
//! independently and every setter creates the record if it is missing.

use crate::errors::WalletError;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::BTreeMap;

/// A registered user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity the record is keyed by.
    pub id: Address,
    /// Display name.
    pub username: String,
    /// Hex-encoded public key.
    pub public_key: String,
}

/// Users keyed by identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRegistry {
    users: BTreeMap<Address, User>,
}

impl UserRegistry {
    /// Create or fully replace a user.
    pub fn upsert(&mut self, id: Address, username: String, public_key: String) {
        self.users.insert(
            id,
            User {
                id,
                username,
                public_key,
            },
        );
    }

    /// Replace the username, creating the record if needed.
    pub fn set_username(&mut self, id: Address, username: String) {
        self.entry(id).username = username;
    }

    /// Replace the public key, creating the record if needed.
    pub fn set_public_key(&mut self, id: Address, public_key: String) {
        self.entry(id).public_key = public_key;
    }

    pub fn get(&self, id: &Address) -> Result<&User, WalletError> {
        self.users.get(id).ok_or(WalletError::UserNotFound(*id))
    }

    pub fn contains(&self, id: &Address) -> bool {
        self.users.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn entry(&mut self, id: Address) -> &mut User {
        self.users.entry(id).or_insert_with(|| User {
            id,
            ..User::default()
        })
    }
}
