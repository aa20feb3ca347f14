//! # Core Value Objects
//!
//! Fixed-size identifiers shared by the wallet subsystems.
//!
//! ## Type Decisions
//!
//! - `Address` is 20 bytes (last 20 bytes of `keccak256(pubkey)`).
//! - `DataId` and `DeviceId` are 32-byte opaque keys chosen by clients.
//! - Amounts use `U256` so balances and gas totals match the 256-bit word
//!   of the ledger this contract is modelled on.

use crate::errors::ParseBytesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// A 32-byte hash (Keccak-256 digest).
pub type Hash = [u8; 32];

/// Decode a hex string (with or without `0x`) into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N], ParseBytesError> {
    let trimmed = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let bytes = hex::decode(trimmed).map_err(|e| ParseBytesError::InvalidHex(e.to_string()))?;
    if bytes.len() != N {
        return Err(ParseBytesError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Encode bytes as `0x`-prefixed lowercase hex.
pub fn encode_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Number of bytes in this identifier.
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; $len]);

            /// Creates the identifier from a byte array.
            #[must_use]
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Creates the identifier from a slice. Returns None if wrong length.
            #[must_use]
            pub fn from_slice(slice: &[u8]) -> Option<Self> {
                <[u8; $len]>::try_from(slice).ok().map(Self)
            }

            /// Returns the underlying bytes.
            #[must_use]
            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Returns true if every byte is zero.
            #[must_use]
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", encode_prefixed(&self.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", encode_prefixed(&self.0))
            }
        }

        impl FromStr for $name {
            type Err = ParseBytesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode_fixed::<$len>(s).map(Self)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseBytesError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_string()
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; $len] {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

fixed_bytes!(
    /// A 20-byte Ethereum-style address.
    Address,
    20
);

fixed_bytes!(
    /// Key under which a device session is stored.
    DataId,
    32
);

fixed_bytes!(
    /// Identifier of the device a session is bound to.
    DeviceId,
    32
);

// =============================================================================
// SESSION STATE
// =============================================================================

/// Lifecycle of a device session.
///
/// The discriminants are part of the notification format: observers see
/// `0` for an open session and `1` for a closed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SessionState {
    /// Session is live.
    Open = 0,
    /// Session was closed; its record no longer exists.
    Closed = 1,
}

impl SessionState {
    /// Numeric code as seen by observers.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}
