//! # Issuance Registry
//!
//! Tracks, per (holder, issuer) pair, the outstanding amount the issuer may
//! still revoke from that holder. The allowance is created or incremented on
//! `issue` and consumed on `revoke`; zero is both the implicit default and
//! the terminal state once fully revoked.
//!
//! The registry imposes no upper bound of its own and does not watch the
//! holder's balance: after a collateral burn shrinks the holder's assigned
//! balance, the allowance here may exceed what is actually revocable. That
//! asymmetry is deliberate — each ledger is checked only at its own point of
//! use (see the crate docs).

use crate::address::Address;
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outstanding revocation allowances, keyed `holder -> issuer -> amount`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssuanceRegistry {
    allowances: HashMap<Address, HashMap<Address, u64>>,
}

impl IssuanceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the outstanding amount `issuer` may still revoke from
    /// `holder` (zero for pairs never issued to).
    pub fn issuance_of(&self, holder: Address, issuer: Address) -> u64 {
        self.allowances
            .get(&holder)
            .and_then(|by_issuer| by_issuer.get(&issuer))
            .copied()
            .unwrap_or(0)
    }

    /// Records a fresh issuance, raising the (holder, issuer) allowance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AmountOverflow`] on `u64` overflow. Cumulative
    /// issuance per issuer is bounded by the genesis supply, so this is
    /// unreachable while the conservation invariant holds.
    pub fn record(
        &mut self,
        holder: Address,
        issuer: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let slot = self
            .allowances
            .entry(holder)
            .or_default()
            .entry(issuer)
            .or_insert(0);
        *slot = slot.checked_add(amount).ok_or(LedgerError::AmountOverflow)?;
        Ok(())
    }

    /// Consumes part of the (holder, issuer) allowance on revocation.
    ///
    /// Entries are driven to zero and left in place, never removed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RevocationAllowanceExceeded`] if the allowance
    /// is smaller than `amount`.
    pub fn consume(
        &mut self,
        holder: Address,
        issuer: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let allowance = self.issuance_of(holder, issuer);
        let remaining =
            allowance
                .checked_sub(amount)
                .ok_or(LedgerError::RevocationAllowanceExceeded {
                    allowance,
                    requested: amount,
                })?;
        self.allowances
            .entry(holder)
            .or_default()
            .insert(issuer, remaining);
        Ok(())
    }
}
