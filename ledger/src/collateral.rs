//! # Collateral Registry
//!
//! Tracks, per (depositor, beneficiary) pair, the outstanding pledge the
//! beneficiary may burn or release from the depositor's assigned balance.
//! A pledge is a *lock on a claim*, not a transfer: granting one moves no
//! tokens, and only a later `burn_deposit` destroys anything.
//!
//! The capacity check at grant time sums the depositor's pledges across all
//! beneficiaries on the fly rather than caching the total, so the sum can
//! never drift from the per-pair entries. The check runs once, at grant
//! time; a later revocation that shrinks the depositor's balance leaves
//! existing pledges over-committed on purpose (see the crate docs).

use crate::address::Address;
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outstanding pledges, keyed `depositor -> beneficiary -> amount`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollateralRegistry {
    pledges: HashMap<Address, HashMap<Address, u64>>,
}

impl CollateralRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the outstanding pledge from `depositor` to `beneficiary`
    /// (zero for pairs never pledged).
    pub fn deposit_of(&self, depositor: Address, beneficiary: Address) -> u64 {
        self.pledges
            .get(&depositor)
            .and_then(|by_beneficiary| by_beneficiary.get(&beneficiary))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of `depositor`'s outstanding pledges across all beneficiaries.
    pub fn total_pledged_by(&self, depositor: Address) -> u64 {
        self.pledges
            .get(&depositor)
            .map(|by_beneficiary| by_beneficiary.values().sum())
            .unwrap_or(0)
    }

    /// Raises the (depositor, beneficiary) pledge by `amount`, provided the
    /// depositor's total pledges stay within `assigned_balance` (read from
    /// the balance store by the engine and passed in).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CollateralExceedsBalance`] if the resulting
    /// total would exceed `assigned_balance`.
    pub fn grant(
        &mut self,
        depositor: Address,
        beneficiary: Address,
        amount: u64,
        assigned_balance: u64,
    ) -> Result<(), LedgerError> {
        let pledged = self.total_pledged_by(depositor);
        // A u64 overflow here necessarily exceeds any possible balance, so
        // it folds into the same rejection.
        match pledged.checked_add(amount) {
            Some(total) if total <= assigned_balance => {}
            _ => {
                return Err(LedgerError::CollateralExceedsBalance {
                    pledged,
                    balance: assigned_balance,
                    requested: amount,
                })
            }
        }

        let slot = self
            .pledges
            .entry(depositor)
            .or_default()
            .entry(beneficiary)
            .or_insert(0);
        // Bounded by the capacity check above.
        *slot += amount;
        Ok(())
    }

    /// Consumes part of the (depositor, beneficiary) pledge, on either a
    /// burn or a release. Entries are driven to zero, never removed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CollateralAllowanceExceeded`] if the pledge is
    /// smaller than `amount`.
    pub fn consume(
        &mut self,
        depositor: Address,
        beneficiary: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let pledged = self.deposit_of(depositor, beneficiary);
        let remaining =
            pledged
                .checked_sub(amount)
                .ok_or(LedgerError::CollateralAllowanceExceeded {
                    pledged,
                    requested: amount,
                })?;
        self.pledges
            .entry(depositor)
            .or_default()
            .insert(beneficiary, remaining);
        Ok(())
    }
}
