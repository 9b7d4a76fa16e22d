//! # Ledger Errors
//!
//! Every failure in the ledger is a precondition violation on a single
//! operation. None are retryable by the ledger itself — retry policy belongs
//! to the caller. A failed operation leaves every store untouched; the error
//! carries the numbers the caller needs to understand the rejection.

use thiserror::Error;

/// Errors returned by ledger operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// The destination or source resolves to the zero sentinel address.
    #[error("operation targets the zero address")]
    ZeroAddress,

    /// An `issue` requested more than the issuer's unassigned pool holds.
    #[error("insufficient unassigned balance: have {available}, requested {requested}")]
    InsufficientUnassigned {
        /// The caller's current unassigned balance.
        available: u64,
        /// The amount the caller tried to issue.
        requested: u64,
    },

    /// A `revoke` or `burn_deposit` requested more than the target's current
    /// assigned balance.
    #[error("insufficient assigned balance: have {available}, requested {requested}")]
    InsufficientAssigned {
        /// The holder's current assigned balance.
        available: u64,
        /// The amount the caller tried to burn.
        requested: u64,
    },

    /// A `revoke` requested more than the issuer personally issued to the
    /// holder (and has not yet revoked).
    #[error("revocation allowance exceeded: allowance {allowance}, requested {requested}")]
    RevocationAllowanceExceeded {
        /// The outstanding issuance allowance for this (holder, issuer) pair.
        allowance: u64,
        /// The amount the issuer tried to revoke.
        requested: u64,
    },

    /// A `burn_deposit` or `return_deposit` requested more than the recorded
    /// pledge for this (depositor, beneficiary) pair.
    #[error("collateral allowance exceeded: pledged {pledged}, requested {requested}")]
    CollateralAllowanceExceeded {
        /// The outstanding pledge for this pair.
        pledged: u64,
        /// The amount the beneficiary tried to settle.
        requested: u64,
    },

    /// A `grant_collateral` would push the depositor's total outstanding
    /// pledges above their current assigned balance.
    #[error(
        "collateral exceeds balance: {pledged} already pledged of {balance}, requested {requested}"
    )]
    CollateralExceedsBalance {
        /// Total already pledged across all beneficiaries.
        pledged: u64,
        /// The depositor's current assigned balance.
        balance: u64,
        /// The additional amount the depositor tried to pledge.
        requested: u64,
    },

    /// A checked arithmetic step would overflow `u64`. Unreachable while the
    /// conservation invariant holds (every running total is bounded by the
    /// genesis supply), but money math is checked regardless.
    #[error("amount overflow")]
    AmountOverflow,
}
