//! # Account Addresses
//!
//! An [`Address`] is the opaque, fixed-width identity of a ledger account:
//! 20 bytes, displayed as `0x`-prefixed lowercase hex. The all-zero address
//! is a sentinel meaning "no account" — it can never receive an issuance.
//!
//! Addresses are deliberately dumb. The ledger does not care how they were
//! derived (public key hash, registry assignment, dice rolls); it only needs
//! equality, hashing, and the zero sentinel.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of raw bytes in an address.
pub const ADDRESS_LEN: usize = 20;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when parsing an address from text.
#[derive(Debug, Error)]
pub enum AddressParseError {
    /// The hex payload could not be decoded.
    #[error("invalid hex in address: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The decoded payload has the wrong length.
    #[error("invalid address length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected number of bytes.
        expected: usize,
        /// Actual number of bytes decoded.
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The distinguished "no account" sentinel. Rejected as an issuance
    /// destination and as a revocation source.
    pub const ZERO: Address = Address([0u8; ADDRESS_LEN]);

    /// Constructs an address from raw bytes.
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address(bytes)
    }

    /// Returns the raw bytes of this address.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Returns `true` if this is the zero sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    /// Parses `0x`-prefixed or bare hex into an address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(hex_part)?;
        let arr: [u8; ADDRESS_LEN] =
            bytes
                .try_into()
                .map_err(|v: Vec<u8>| AddressParseError::InvalidLength {
                    expected: ADDRESS_LEN,
                    got: v.len(),
                })?;
        Ok(Address(arr))
    }
}

// Serialized as a hex string rather than a byte array so addresses are
// readable in JSON output and usable as JSON map keys.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
