//! # Ledger Engine
//!
//! [`Ledger`] is the only type callers touch. It owns the three stores —
//! balances, issuance allowances, collateral pledges — and exposes the five
//! mutating operations plus the read-only queries. Caller identity is an
//! explicit parameter on every mutating operation; there is no ambient
//! "current caller", which keeps the engine testable without an execution
//! environment stub.
//!
//! ## Atomicity
//!
//! Each operation validates every precondition before writing to any store.
//! A rejected call therefore leaves all three stores exactly as they were —
//! no partial bookkeeping update is ever visible. Where an operation touches
//! two stores, the fallible step runs first and the second step cannot fail
//! once the first has committed.
//!
//! ## The cross-registry tension, on purpose
//!
//! The issuance and collateral ledgers both reference the same assigned
//! balance, but each is checked only at its own point of use. A `revoke` can
//! shrink a balance below the depositor's outstanding pledges, and a
//! collateral burn can shrink it below an issuer's revocation allowance.
//! Neither registry is re-validated when that happens; subsequent burns
//! simply fail on insufficient balance at their own moment of execution.
//! Adding cross-checks would change what callers observe, so none exist.
//! Regression tests pin the exact sequence.

use crate::address::Address;
use crate::balances::BalanceStore;
use crate::collateral::CollateralRegistry;
use crate::error::LedgerError;
use crate::event::IssuedEvent;
use crate::issuance::IssuanceRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decimal places of the token. Fixed at the conventional 18.
pub const DECIMALS: u8 = 18;

/// Display metadata fixed at genesis. Owned by the surrounding deployment
/// layer; the ledger stores and echoes it, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable token name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimal places.
    pub decimals: u8,
}

/// The non-transferable token ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    /// Display metadata fixed at genesis.
    metadata: TokenMetadata,
    /// Supply minted at genesis. Never updated afterwards — burns are
    /// tracked separately via [`total_burned`](Self::total_burned).
    total_supply: u64,
    /// Timestamp of genesis.
    created_at: DateTime<Utc>,
    /// Unassigned pools and assigned balances.
    balances: BalanceStore,
    /// Per (holder, issuer) revocation allowances.
    issuance: IssuanceRegistry,
    /// Per (depositor, beneficiary) collateral pledges.
    collateral: CollateralRegistry,
    /// Append-only log of issuance events.
    events: Vec<IssuedEvent>,
}

impl Ledger {
    /// Creates the ledger, minting `total_supply` into `deployer`'s
    /// unassigned pool.
    pub fn genesis(
        name: impl Into<String>,
        symbol: impl Into<String>,
        total_supply: u64,
        deployer: Address,
    ) -> Self {
        let metadata = TokenMetadata {
            name: name.into(),
            symbol: symbol.into(),
            decimals: DECIMALS,
        };
        tracing::info!(
            name = %metadata.name,
            symbol = %metadata.symbol,
            total_supply,
            deployer = %deployer,
            "ledger genesis"
        );
        Self {
            metadata,
            total_supply,
            created_at: Utc::now(),
            balances: BalanceStore::genesis(deployer, total_supply),
            issuance: IssuanceRegistry::new(),
            collateral: CollateralRegistry::new(),
            events: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Mutating operations
    // -----------------------------------------------------------------------

    /// Issues `amount` from `caller`'s unassigned pool into `to`'s assigned
    /// balance, raising `caller`'s revocation allowance over `to` by the
    /// same amount and appending an [`IssuedEvent`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ZeroAddress`] if `to` is the zero sentinel.
    /// Returns [`LedgerError::InsufficientUnassigned`] if `caller`'s pool is
    /// too small.
    pub fn issue(&mut self, caller: Address, to: Address, amount: u64) -> Result<(), LedgerError> {
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.balances.move_unassigned_to_assigned(caller, to, amount)?;
        // Cannot fail after the move: cumulative issuance per issuer is
        // bounded by the genesis supply.
        self.issuance.record(to, caller, amount)?;

        self.events.push(IssuedEvent {
            issuer: caller,
            recipient: to,
            amount,
        });
        tracing::info!(issuer = %caller, recipient = %to, amount, "issued");
        Ok(())
    }

    /// Revokes (destroys) `amount` of `from`'s assigned balance, bounded by
    /// what `caller` personally issued to `from` and has not yet revoked.
    /// The tokens are burned, not returned to `caller`'s pool.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ZeroAddress`] if `from` is the zero sentinel.
    /// Returns [`LedgerError::RevocationAllowanceExceeded`] if `caller`'s
    /// allowance over `from` is too small.
    /// Returns [`LedgerError::InsufficientAssigned`] if `from`'s balance is
    /// too small.
    pub fn revoke(&mut self, caller: Address, from: Address, amount: u64) -> Result<(), LedgerError> {
        if from.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        // Allowance is checked read-only first so the burn never commits
        // ahead of a doomed consume.
        let allowance = self.issuance.issuance_of(from, caller);
        if allowance < amount {
            return Err(LedgerError::RevocationAllowanceExceeded {
                allowance,
                requested: amount,
            });
        }
        self.balances.burn_assigned(from, amount)?;
        self.issuance.consume(from, caller, amount)?;

        tracing::info!(issuer = %caller, holder = %from, amount, "revoked");
        Ok(())
    }

    /// Pledges `amount` of `caller`'s assigned balance as collateral to
    /// `to`. Balances are untouched — a pledge is a claim, not a transfer.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CollateralExceedsBalance`] if `caller`'s total
    /// outstanding pledges would exceed their current assigned balance.
    pub fn grant_collateral(
        &mut self,
        caller: Address,
        to: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let assigned = self.balances.assigned_of(caller);
        self.collateral.grant(caller, to, amount, assigned)?;

        tracing::info!(depositor = %caller, beneficiary = %to, amount, "collateral granted");
        Ok(())
    }

    /// Burns `amount` of `from`'s assigned balance against the pledge `from`
    /// granted to `caller`. The destructive settlement of the escrow.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CollateralAllowanceExceeded`] if the pledge is
    /// too small.
    /// Returns [`LedgerError::InsufficientAssigned`] if `from`'s balance is
    /// too small (possible after an intervening revocation).
    pub fn burn_deposit(
        &mut self,
        caller: Address,
        from: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let pledged = self.collateral.deposit_of(from, caller);
        if pledged < amount {
            return Err(LedgerError::CollateralAllowanceExceeded {
                pledged,
                requested: amount,
            });
        }
        self.balances.burn_assigned(from, amount)?;
        self.collateral.consume(from, caller, amount)?;

        tracing::info!(depositor = %from, beneficiary = %caller, amount, "deposit burned");
        Ok(())
    }

    /// Releases `amount` of the pledge `from` granted to `caller` without
    /// destroying anything. Balances are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CollateralAllowanceExceeded`] if the pledge is
    /// too small.
    pub fn return_deposit(
        &mut self,
        caller: Address,
        from: Address,
        amount: u64,
    ) -> Result<(), LedgerError> {
        self.collateral.consume(from, caller, amount)?;

        tracing::info!(depositor = %from, beneficiary = %caller, amount, "deposit returned");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Read-only queries
    // -----------------------------------------------------------------------

    /// The account's unassigned pool.
    pub fn unassigned_balance_of(&self, account: Address) -> u64 {
        self.balances.unassigned_of(account)
    }

    /// The account's assigned balance.
    pub fn balance_of(&self, account: Address) -> u64 {
        self.balances.assigned_of(account)
    }

    /// Outstanding amount `issuer` may still revoke from `holder`.
    pub fn get_issuance(&self, holder: Address, issuer: Address) -> u64 {
        self.issuance.issuance_of(holder, issuer)
    }

    /// Outstanding pledge from `depositor` to `beneficiary`.
    pub fn collateral_deposit(&self, depositor: Address, beneficiary: Address) -> u64 {
        self.collateral.deposit_of(depositor, beneficiary)
    }

    /// Sum of `depositor`'s outstanding pledges across all beneficiaries.
    pub fn total_pledged_by(&self, depositor: Address) -> u64 {
        self.collateral.total_pledged_by(depositor)
    }

    /// Token name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Decimal places.
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// The supply minted at genesis. Not decremented by burns; see
    /// [`total_burned`](Self::total_burned).
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// Running total of tokens destroyed via `revoke` and `burn_deposit`.
    pub fn total_burned(&self) -> u64 {
        self.balances.total_burned()
    }

    /// Sum of every balance still in circulation. Always equals
    /// `total_supply() - total_burned()`.
    pub fn circulating(&self) -> u64 {
        self.balances.circulating()
    }

    /// Genesis timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The append-only issuance event log, oldest first.
    pub fn events(&self) -> &[IssuedEvent] {
        &self.events
    }
}
