//! # Scenario Scripts
//!
//! A scenario file describes a genesis configuration plus an ordered list of
//! ledger operations, all in JSON:
//!
//! ```json
//! {
//!   "token": {
//!     "name": "epistemo",
//!     "symbol": "EPI",
//!     "total_supply": 100,
//!     "deployer": "0x0000000000000000000000000000000000000001"
//!   },
//!   "ops": [
//!     { "op": "issue", "caller": "0x…01", "to": "0x…02", "amount": 10 },
//!     { "op": "grant_collateral", "caller": "0x…02", "to": "0x…03", "amount": 10 },
//!     { "op": "burn_deposit", "caller": "0x…03", "from": "0x…02", "amount": 4 }
//!   ]
//! }
//! ```
//!
//! Caller identity is explicit on every operation — the sandbox has no
//! notion of a signed-in account.

use anyhow::{Context, Result};
use epistemo_ledger::{Address, Ledger};
use serde::{Deserialize, Serialize};

/// Genesis parameters for a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSpec {
    /// Token display name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Supply minted at genesis.
    pub total_supply: u64,
    /// Account receiving the full supply in its unassigned pool.
    pub deployer: Address,
}

/// One scripted ledger operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptOp {
    /// Issue from `caller`'s unassigned pool to `to`.
    Issue { caller: Address, to: Address, amount: u64 },
    /// Revoke (burn) from `from`, bounded by `caller`'s issuance allowance.
    Revoke { caller: Address, from: Address, amount: u64 },
    /// Pledge part of `caller`'s assigned balance to `to`.
    GrantCollateral { caller: Address, to: Address, amount: u64 },
    /// Burn part of `from`'s pledge to `caller`.
    BurnDeposit { caller: Address, from: Address, amount: u64 },
    /// Release part of `from`'s pledge to `caller` without burning.
    ReturnDeposit { caller: Address, from: Address, amount: u64 },
}

impl ScriptOp {
    /// Applies this operation to the ledger.
    pub fn apply(&self, ledger: &mut Ledger) -> Result<(), epistemo_ledger::LedgerError> {
        match *self {
            ScriptOp::Issue { caller, to, amount } => ledger.issue(caller, to, amount),
            ScriptOp::Revoke { caller, from, amount } => ledger.revoke(caller, from, amount),
            ScriptOp::GrantCollateral { caller, to, amount } => {
                ledger.grant_collateral(caller, to, amount)
            }
            ScriptOp::BurnDeposit { caller, from, amount } => {
                ledger.burn_deposit(caller, from, amount)
            }
            ScriptOp::ReturnDeposit { caller, from, amount } => {
                ledger.return_deposit(caller, from, amount)
            }
        }
    }
}

/// A full scenario: genesis plus an ordered operation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Genesis configuration.
    pub token: TokenSpec,
    /// Operations applied in order.
    pub ops: Vec<ScriptOp>,
}

impl Scenario {
    /// Parses a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse scenario JSON")
    }

    /// Runs the scenario against a fresh ledger.
    ///
    /// With `keep_going`, rejected operations are logged and skipped;
    /// otherwise the first rejection aborts the run.
    pub fn run(&self, keep_going: bool) -> Result<Ledger> {
        let mut ledger = Ledger::genesis(
            self.token.name.clone(),
            self.token.symbol.clone(),
            self.token.total_supply,
            self.token.deployer,
        );

        for (index, op) in self.ops.iter().enumerate() {
            match op.apply(&mut ledger) {
                Ok(()) => {}
                Err(err) if keep_going => {
                    tracing::warn!(index, %err, ?op, "operation rejected, continuing");
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("operation {index} rejected: {op:?}"));
                }
            }
        }
        Ok(ledger)
    }
}

/// The built-in `demo` scenario: issue, pledge, partial burn, release.
pub fn demo_scenario() -> Scenario {
    fn addr(last: u8) -> Address {
        let mut bytes = [0u8; epistemo_ledger::ADDRESS_LEN];
        bytes[epistemo_ledger::ADDRESS_LEN - 1] = last;
        Address::new(bytes)
    }
    let (genesis, holder, beneficiary) = (addr(1), addr(2), addr(3));

    Scenario {
        token: TokenSpec {
            name: "epistemo".into(),
            symbol: "\u{1017f}".into(),
            total_supply: 100,
            deployer: genesis,
        },
        ops: vec![
            ScriptOp::Issue { caller: genesis, to: holder, amount: 10 },
            ScriptOp::GrantCollateral { caller: holder, to: beneficiary, amount: 10 },
            ScriptOp::BurnDeposit { caller: beneficiary, from: holder, amount: 4 },
            ScriptOp::ReturnDeposit { caller: beneficiary, from: holder, amount: 6 },
            ScriptOp::Revoke { caller: genesis, from: holder, amount: 6 },
        ],
    }
}
