//! Ledger event notifications.
//!
//! A successful `issue` appends an [`IssuedEvent`] to the ledger's
//! append-only event log. The ledger itself never reads the log back —
//! it exists for consumers (indexers, UIs, the CLI sandbox) to observe.

use crate::address::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Emitted after every successful issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedEvent {
    /// The account whose unassigned pool funded the issuance.
    pub issuer: Address,
    /// The account whose assigned balance was credited.
    pub recipient: Address,
    /// The amount issued, in the smallest denomination.
    pub amount: u64,
}

impl fmt::Display for IssuedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Issued({} -> {}, {})",
            self.issuer, self.recipient, self.amount
        )
    }
}
