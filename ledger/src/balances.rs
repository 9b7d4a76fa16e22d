//! # Balance Store
//!
//! Holds each account's two balances: the *unassigned* pool (tokens the
//! account may issue to others) and the *assigned* balance (tokens the
//! account has received via issuance). Both default to zero for unseen
//! accounts and are never deleted, only mutated.
//!
//! Non-transferability is structural, not a runtime check: there is no
//! operation that moves value between two assigned balances, and nothing
//! ever increments an unassigned pool after genesis. The only mutators are
//! [`move_unassigned_to_assigned`](BalanceStore::move_unassigned_to_assigned)
//! and [`burn_assigned`](BalanceStore::burn_assigned), and the latter is the
//! only operation in the whole system that destroys supply.

use crate::address::Address;
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-account unassigned pools and assigned balances.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceStore {
    /// Tokens held but not yet issued to anyone. The only source for `issue`.
    unassigned: HashMap<Address, u64>,
    /// Tokens received via `issue`. The only balance subject to revocation
    /// and collateral.
    assigned: HashMap<Address, u64>,
    /// Running total of all tokens ever destroyed through
    /// [`burn_assigned`](Self::burn_assigned).
    burned: u64,
}

impl BalanceStore {
    /// Creates a store with the full `total_supply` minted into the genesis
    /// account's unassigned pool.
    pub fn genesis(genesis_account: Address, total_supply: u64) -> Self {
        let mut unassigned = HashMap::new();
        unassigned.insert(genesis_account, total_supply);
        Self {
            unassigned,
            assigned: HashMap::new(),
            burned: 0,
        }
    }

    /// Returns the unassigned balance of `account` (zero for unseen accounts).
    pub fn unassigned_of(&self, account: Address) -> u64 {
        self.unassigned.get(&account).copied().unwrap_or(0)
    }

    /// Returns the assigned balance of `account` (zero for unseen accounts).
    pub fn assigned_of(&self, account: Address) -> u64 {
        self.assigned.get(&account).copied().unwrap_or(0)
    }

    /// Running total of all tokens ever burned.
    pub fn total_burned(&self) -> u64 {
        self.burned
    }

    /// Sum of every unassigned pool and assigned balance — the tokens still
    /// in circulation. Together with [`total_burned`](Self::total_burned)
    /// this must always equal the genesis supply.
    pub fn circulating(&self) -> u64 {
        let unassigned: u64 = self.unassigned.values().sum();
        let assigned: u64 = self.assigned.values().sum();
        unassigned + assigned
    }

    /// Moves `amount` from `from`'s unassigned pool into `to`'s assigned
    /// balance.
    ///
    /// Both sides are checked before either is written, so a rejected call
    /// leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientUnassigned`] if `from` holds less
    /// than `amount` unassigned.
    pub fn move_unassigned_to_assigned(
        &mut self,
        from: Address,
        to: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let available = self.unassigned_of(from);
        let new_from = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientUnassigned {
                available,
                requested: amount,
            })?;
        let new_to = self
            .assigned_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;

        self.unassigned.insert(from, new_from);
        self.assigned.insert(to, new_to);
        Ok(())
    }

    /// Destroys `amount` of `holder`'s assigned balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientAssigned`] if `holder` has less
    /// than `amount` assigned.
    pub fn burn_assigned(&mut self, holder: Address, amount: u64) -> Result<(), LedgerError> {
        let available = self.assigned_of(holder);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAssigned {
                available,
                requested: amount,
            })?;
        let new_burned = self
            .burned
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;

        self.assigned.insert(holder, remaining);
        self.burned = new_burned;
        Ok(())
    }
}
