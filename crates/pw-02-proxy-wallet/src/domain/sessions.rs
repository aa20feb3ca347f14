//! # Session Manager
//!
//! A session authorizes a device for a period of time. It is opened by a
//! signed payload and closed by anyone; closing removes the record and
//! leaves a tombstone so a repeated close is distinguishable from a key that
//! never existed.
//!
//! ```text
//!            start_session              close_session
//!   (none) ───────────────→ Open ───────────────────→ tombstone
//!      ↑                                                  │
//!      └──────────────── start_session ───────────────────┘
//! ```

use crate::errors::WalletError;
use pw_01_signature_verification::{session_digest, EcdsaSignature};
use serde::{Deserialize, Serialize};
use shared_types::{Address, DataId, DeviceId, Hash, SessionState};
use std::collections::{BTreeMap, BTreeSet};

/// The four words a session signature commits to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub first: Hash,
    pub second: Hash,
    pub hashed: Hash,
    pub subject: Hash,
}

impl SessionPayload {
    /// Digest the signer signed (before prefixing).
    #[must_use]
    pub fn digest(&self) -> Hash {
        session_digest(&self.first, &self.second, &self.hashed, &self.subject)
    }
}

/// Input to `start_session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartSessionRequest {
    /// Key the session is stored under.
    pub data_id: DataId,
    /// Device being authorized.
    pub device_id: DeviceId,
    /// Signed payload.
    pub payload: SessionPayload,
    /// Signature over `payload.digest()`.
    pub signature: EcdsaSignature,
    /// Caller-supplied start time; never read from a clock.
    pub start_time: u64,
    /// Length of the session. Recorded only.
    pub duration: u64,
}

/// A stored session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub data_id: DataId,
    pub device_id: DeviceId,
    pub payload: SessionPayload,
    pub signature: EcdsaSignature,
    /// Address recovered from `signature`.
    pub signer: Address,
    pub start_time: u64,
    pub duration: u64,
    pub state: SessionState,
}

impl Session {
    /// Build an open session from a request and its recovered signer.
    #[must_use]
    pub fn open(request: StartSessionRequest, signer: Address) -> Self {
        Self {
            data_id: request.data_id,
            device_id: request.device_id,
            payload: request.payload,
            signature: request.signature,
            signer,
            start_time: request.start_time,
            duration: request.duration,
            state: SessionState::Open,
        }
    }
}

/// Live sessions plus tombstones of closed ones.
///
/// Tombstones are never pruned; only reopening a key removes one, so the
/// set grows with every distinct key ever closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBook {
    open: BTreeMap<DataId, Session>,
    closed: BTreeSet<DataId>,
}

impl SessionBook {
    /// Fail if a session is already open under `data_id`.
    pub fn ensure_vacant(&self, data_id: &DataId) -> Result<(), WalletError> {
        if self.open.contains_key(data_id) {
            return Err(WalletError::SessionAlreadyOpen(*data_id));
        }
        Ok(())
    }

    /// Store an open session, clearing any tombstone for its key.
    pub fn insert(&mut self, session: Session) -> Result<(), WalletError> {
        self.ensure_vacant(&session.data_id)?;
        self.closed.remove(&session.data_id);
        self.open.insert(session.data_id, session);
        Ok(())
    }

    /// Remove an open session and tombstone its key.
    pub fn close(&mut self, data_id: &DataId) -> Result<Session, WalletError> {
        if self.closed.contains(data_id) {
            return Err(WalletError::SessionAlreadyClosed(*data_id));
        }
        let mut session = self
            .open
            .remove(data_id)
            .ok_or(WalletError::SessionNotFound(*data_id))?;
        session.state = SessionState::Closed;
        self.closed.insert(*data_id);
        Ok(session)
    }

    pub fn get(&self, data_id: &DataId) -> Result<&Session, WalletError> {
        self.open
            .get(data_id)
            .ok_or(WalletError::SessionNotFound(*data_id))
    }

    /// State of the session under `data_id`. Closed sessions no longer
    /// exist and report `SessionNotFound`.
    pub fn state(&self, data_id: &DataId) -> Result<SessionState, WalletError> {
        self.get(data_id).map(|session| session.state)
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub fn is_tombstoned(&self, data_id: &DataId) -> bool {
        self.closed.contains(data_id)
    }

    pub fn tombstone_count(&self) -> usize {
        self.closed.len()
    }

    /// No key is both open and tombstoned, and every record sits under its
    /// own key in the `Open` state.
    pub(crate) fn is_consistent(&self) -> bool {
        self.open.iter().all(|(key, session)| {
            *key == session.data_id
                && session.state == SessionState::Open
                && !self.closed.contains(key)
        })
    }
}
