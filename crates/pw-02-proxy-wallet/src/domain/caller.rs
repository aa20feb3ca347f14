//! # Callers
//!
//! A call is submitted either directly by the principal or by a relayer that
//! carries the principal's signed authorization.

use pw_01_signature_verification::Authorization;
use shared_types::Address;

/// Who submitted a call and on whose authority it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// The principal submitted the call itself.
    Direct(Address),
    /// A relayer submitted the call with the principal's authorization.
    Relayed {
        /// Account that paid for submission.
        relayer: Address,
        /// Recovered signature of the principal.
        authorization: Authorization,
    },
}

impl Caller {
    /// Address the call runs on behalf of.
    #[must_use]
    pub fn principal(&self) -> Address {
        match self {
            Self::Direct(sender) => *sender,
            Self::Relayed { authorization, .. } => authorization.signer(),
        }
    }

    /// Account that submitted the call.
    #[must_use]
    pub fn submitter(&self) -> Address {
        match self {
            Self::Direct(sender) => *sender,
            Self::Relayed { relayer, .. } => *relayer,
        }
    }

    /// True for relayer-submitted calls.
    #[must_use]
    pub fn is_relayed(&self) -> bool {
        matches!(self, Self::Relayed { .. })
    }
}

impl From<Address> for Caller {
    fn from(sender: Address) -> Self {
        Self::Direct(sender)
    }
}
