//! # Epistemo Ledger
//!
//! A non-transferable ("soul-bound") fungible token ledger with delegated
//! issuance, revocation, and collateral escrow. Value never moves freely
//! between accounts: it flows one way, from an account's *unassigned* pool
//! into another account's *assigned* balance via [`Ledger::issue`], and from
//! there it can only be destroyed — clawed back by the original issuer
//! ([`Ledger::revoke`]) or burned by an escrow beneficiary
//! ([`Ledger::burn_deposit`]).
//!
//! ## Architecture
//!
//! Three stores, one engine:
//!
//! - **balances** — unassigned pools and assigned balances; the only place
//!   supply lives or dies.
//! - **issuance** — per (holder, issuer) revocation allowances.
//! - **collateral** — per (depositor, beneficiary) escrow pledges.
//! - **ledger** — the [`Ledger`] engine: the five operations callers invoke,
//!   the invariant enforcement, and the read-only queries.
//!
//! Only the engine mutates the stores, and every operation either commits
//! fully or rejects leaving all three stores untouched.
//!
//! ## Design Rules
//!
//! 1. All monetary arithmetic is checked. Wrapping math and money do not mix.
//! 2. Caller identity is an explicit parameter, never ambient state.
//! 3. The issuance and collateral ledgers are independent on purpose: each
//!    is validated only at its own point of use, even when a revocation
//!    leaves pledges over-committed against the shrunken balance. See
//!    [`ledger`] for the full story; regression tests pin the behavior.

pub mod address;
pub mod balances;
pub mod collateral;
pub mod error;
pub mod event;
pub mod issuance;
pub mod ledger;
pub mod shared;

pub use address::{Address, AddressParseError, ADDRESS_LEN};
pub use error::LedgerError;
pub use event::IssuedEvent;
pub use ledger::{Ledger, TokenMetadata, DECIMALS};
pub use shared::SharedLedger;
