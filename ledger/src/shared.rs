//! Thread-safe ledger handle.
//!
//! [`Ledger`] itself is a plain value; exclusive `&mut` access is its
//! transaction boundary. When the ledger is shared across threads, every
//! operation must still execute as one indivisible unit over all three
//! stores. [`SharedLedger`] provides that: each call acquires a single
//! mutex for the full duration of the operation, so no two operations ever
//! interleave at the level of store reads and writes, and a rejected call
//! rolls nothing back because nothing was visible mid-flight.

use crate::address::Address;
use crate::error::LedgerError;
use crate::event::IssuedEvent;
use crate::ledger::Ledger;
use parking_lot::Mutex;
use std::sync::Arc;

/// A cloneable, thread-safe handle to a [`Ledger`].
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    /// Wraps a ledger for shared use.
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// See [`Ledger::issue`].
    pub fn issue(&self, caller: Address, to: Address, amount: u64) -> Result<(), LedgerError> {
        self.inner.lock().issue(caller, to, amount)
    }

    /// See [`Ledger::revoke`].
    pub fn revoke(&self, caller: Address, from: Address, amount: u64) -> Result<(), LedgerError> {
        self.inner.lock().revoke(caller, from, amount)
    }

    /// See [`Ledger::grant_collateral`].
    pub fn grant_collateral(
        &self,
        caller: Address,
        to: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.inner.lock().grant_collateral(caller, to, amount)
    }

    /// See [`Ledger::burn_deposit`].
    pub fn burn_deposit(
        &self,
        caller: Address,
        from: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.inner.lock().burn_deposit(caller, from, amount)
    }

    /// See [`Ledger::return_deposit`].
    pub fn return_deposit(
        &self,
        caller: Address,
        from: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.inner.lock().return_deposit(caller, from, amount)
    }

    /// See [`Ledger::unassigned_balance_of`].
    pub fn unassigned_balance_of(&self, account: Address) -> u64 {
        self.inner.lock().unassigned_balance_of(account)
    }

    /// See [`Ledger::balance_of`].
    pub fn balance_of(&self, account: Address) -> u64 {
        self.inner.lock().balance_of(account)
    }

    /// See [`Ledger::get_issuance`].
    pub fn get_issuance(&self, holder: Address, issuer: Address) -> u64 {
        self.inner.lock().get_issuance(holder, issuer)
    }

    /// See [`Ledger::collateral_deposit`].
    pub fn collateral_deposit(&self, depositor: Address, beneficiary: Address) -> u64 {
        self.inner.lock().collateral_deposit(depositor, beneficiary)
    }

    /// See [`Ledger::total_supply`].
    pub fn total_supply(&self) -> u64 {
        self.inner.lock().total_supply()
    }

    /// See [`Ledger::total_burned`].
    pub fn total_burned(&self) -> u64 {
        self.inner.lock().total_burned()
    }

    /// Snapshot of the issuance event log.
    pub fn events(&self) -> Vec<IssuedEvent> {
        self.inner.lock().events().to_vec()
    }

    /// Runs `f` with the locked ledger, for multi-query consistent reads.
    pub fn with<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        f(&self.inner.lock())
    }
}
