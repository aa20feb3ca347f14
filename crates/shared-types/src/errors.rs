//! # Error Types
//!
//! Errors raised while decoding shared value objects.

use thiserror::Error;

/// Errors that can occur when parsing a fixed-size identifier from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseBytesError {
    /// The input is not valid hexadecimal.
    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),

    /// The decoded value has the wrong number of bytes.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
