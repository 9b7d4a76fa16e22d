//! Integration tests for the ledger engine.
//!
//! These exercise full lifecycles across store boundaries: issuance and
//! revocation, the collateral escrow, rejection atomicity, error precedence,
//! and the deliberate independence of the two allowance ledgers.

use epistemo_ledger::{Address, IssuedEvent, Ledger, LedgerError, ADDRESS_LEN, DECIMALS};

/// Helper: a deterministic test address.
fn addr(last: u8) -> Address {
    let mut bytes = [0u8; ADDRESS_LEN];
    bytes[ADDRESS_LEN - 1] = last;
    Address::new(bytes)
}

/// Helper: a 100-token ledger with genesis account `addr(1)`.
fn deploy() -> (Ledger, Address) {
    let genesis = addr(1);
    (Ledger::genesis("epistemo", "\u{1017f}", 100, genesis), genesis)
}

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

#[test]
fn genesis_supply_is_unassigned_only() {
    let (ledger, g) = deploy();
    assert_eq!(ledger.unassigned_balance_of(g), 100);
    assert_eq!(ledger.balance_of(g), 0);
    assert_eq!(ledger.total_supply(), 100);
}

#[test]
fn metadata_is_echoed() {
    let (ledger, _) = deploy();
    assert_eq!(ledger.name(), "epistemo");
    assert_eq!(ledger.symbol(), "\u{1017f}");
    assert_eq!(ledger.decimals(), DECIMALS);
}

// ---------------------------------------------------------------------------
// Issue / Revoke
// ---------------------------------------------------------------------------

#[test]
fn issue_then_revoke_lifecycle() {
    let (mut ledger, g) = deploy();
    let h = addr(2);

    ledger.issue(g, h, 10).unwrap();
    assert_eq!(ledger.unassigned_balance_of(g), 90);
    assert_eq!(ledger.balance_of(h), 10);
    assert_eq!(ledger.get_issuance(h, g), 10);

    ledger.revoke(g, h, 10).unwrap();
    assert_eq!(ledger.balance_of(h), 0);
    assert_eq!(ledger.get_issuance(h, g), 0);
    // Revoked tokens are destroyed, not refunded.
    assert_eq!(ledger.unassigned_balance_of(g), 90);
    assert_eq!(ledger.total_burned(), 10);
}

#[test]
fn issue_emits_event() {
    let (mut ledger, g) = deploy();
    let h = addr(2);
    ledger.issue(g, h, 10).unwrap();
    ledger.issue(g, h, 5).unwrap();
    assert_eq!(
        ledger.events(),
        &[
            IssuedEvent { issuer: g, recipient: h, amount: 10 },
            IssuedEvent { issuer: g, recipient: h, amount: 5 },
        ]
    );
}

#[test]
fn over_revoke_rejected_with_state_intact() {
    let (mut ledger, g) = deploy();
    let h = addr(2);
    ledger.issue(g, h, 10).unwrap();

    let err = ledger.revoke(g, h, 20).unwrap_err();
    assert_eq!(
        err,
        LedgerError::RevocationAllowanceExceeded { allowance: 10, requested: 20 }
    );
    assert_eq!(ledger.balance_of(h), 10);
    assert_eq!(ledger.get_issuance(h, g), 10);
}

#[test]
fn recipients_cannot_pass_tokens_on() {
    let (mut ledger, g) = deploy();
    let h = addr(2);
    ledger.issue(g, h, 10).unwrap();

    // The received tokens sit in h's assigned balance; h's unassigned pool
    // is still empty, so h cannot issue them onward.
    let err = ledger.issue(h, addr(3), 10).unwrap_err();
    assert_eq!(
        err,
        LedgerError::InsufficientUnassigned { available: 0, requested: 10 }
    );
    assert_eq!(ledger.balance_of(h), 10);
    assert_eq!(ledger.balance_of(addr(3)), 0);
}

#[test]
fn zero_address_rejected_as_destination_and_source() {
    let (mut ledger, g) = deploy();
    assert_eq!(
        ledger.issue(g, Address::ZERO, 10),
        Err(LedgerError::ZeroAddress)
    );
    assert_eq!(
        ledger.revoke(g, Address::ZERO, 10),
        Err(LedgerError::ZeroAddress)
    );
    assert_eq!(ledger.unassigned_balance_of(g), 100);
}

#[test]
fn revoke_checks_allowance_before_balance() {
    let (mut ledger, g) = deploy();
    let (h, k) = (addr(2), addr(3));
    ledger.issue(g, h, 10).unwrap();
    ledger.grant_collateral(h, k, 10).unwrap();
    ledger.burn_deposit(k, h, 10).unwrap();
    // h now has allowance 10 recorded for g but balance 0. A revoke beyond
    // the allowance must surface the allowance error, not the balance error.
    let err = ledger.revoke(g, h, 20).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::RevocationAllowanceExceeded { .. }
    ));
}

// ---------------------------------------------------------------------------
// Collateral escrow
// ---------------------------------------------------------------------------

#[test]
fn grant_burn_lifecycle() {
    let (mut ledger, g) = deploy();
    let (h, k) = (addr(2), addr(3));
    ledger.issue(g, h, 10).unwrap();

    ledger.grant_collateral(h, k, 10).unwrap();
    assert_eq!(ledger.collateral_deposit(h, k), 10);
    // Granting locks a claim; it moves nothing.
    assert_eq!(ledger.balance_of(h), 10);
    assert_eq!(ledger.balance_of(k), 0);

    ledger.burn_deposit(k, h, 10).unwrap();
    assert_eq!(ledger.balance_of(h), 0);
    assert_eq!(ledger.collateral_deposit(h, k), 0);
    assert_eq!(ledger.balance_of(k), 0);

    let err = ledger.burn_deposit(k, h, 10).unwrap_err();
    assert_eq!(
        err,
        LedgerError::CollateralAllowanceExceeded { pledged: 0, requested: 10 }
    );
}

#[test]
fn grant_return_lifecycle() {
    let (mut ledger, g) = deploy();
    let (h, k) = (addr(2), addr(3));
    ledger.issue(g, h, 10).unwrap();
    ledger.grant_collateral(h, k, 10).unwrap();

    ledger.return_deposit(k, h, 10).unwrap();
    assert_eq!(ledger.collateral_deposit(h, k), 0);
    // Returning destroys nothing.
    assert_eq!(ledger.balance_of(h), 10);
    assert_eq!(ledger.total_burned(), 0);

    let err = ledger.return_deposit(k, h, 1).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::CollateralAllowanceExceeded { .. }
    ));
}

#[test]
fn over_pledge_rejected() {
    let (mut ledger, g) = deploy();
    let (h, k) = (addr(2), addr(3));
    ledger.issue(g, h, 10).unwrap();
    ledger.grant_collateral(h, k, 10).unwrap();

    // Balance 10, already pledged 10: any further positive pledge must fail.
    let err = ledger.grant_collateral(h, addr(4), 1).unwrap_err();
    assert_eq!(
        err,
        LedgerError::CollateralExceedsBalance { pledged: 10, balance: 10, requested: 1 }
    );
    assert_eq!(ledger.collateral_deposit(h, addr(4)), 0);
    assert_eq!(ledger.collateral_deposit(h, k), 10);
}

#[test]
fn pledge_capacity_spans_beneficiaries() {
    let (mut ledger, g) = deploy();
    let h = addr(2);
    ledger.issue(g, h, 10).unwrap();
    ledger.grant_collateral(h, addr(3), 4).unwrap();
    ledger.grant_collateral(h, addr(4), 6).unwrap();
    let err = ledger.grant_collateral(h, addr(5), 1).unwrap_err();
    assert!(matches!(err, LedgerError::CollateralExceedsBalance { .. }));
}

#[test]
fn partial_settlements() {
    let (mut ledger, g) = deploy();
    let (h, k) = (addr(2), addr(3));
    ledger.issue(g, h, 10).unwrap();
    ledger.grant_collateral(h, k, 10).unwrap();

    ledger.burn_deposit(k, h, 4).unwrap();
    assert_eq!(ledger.collateral_deposit(h, k), 6);
    assert_eq!(ledger.balance_of(h), 6);

    ledger.return_deposit(k, h, 6).unwrap();
    assert_eq!(ledger.collateral_deposit(h, k), 0);
    assert_eq!(ledger.balance_of(h), 6);
    assert_eq!(ledger.total_burned(), 4);
}

// ---------------------------------------------------------------------------
// Cross-registry independence (regression)
// ---------------------------------------------------------------------------

/// The issuance and collateral ledgers both reference the same assigned
/// balance but are only validated at their own point of use. A revoke that
/// empties the balance leaves an existing pledge over-committed; that pledge
/// stays queryable, a burn against it fails on the balance at its own
/// moment, and a release still succeeds. This sequence is intentional;
/// do not "fix" it with cross-checks.
#[test]
fn revoke_leaves_collateral_over_committed() {
    let (mut ledger, g) = deploy();
    let (h, k) = (addr(2), addr(3));

    ledger.issue(g, h, 10).unwrap();
    ledger.grant_collateral(h, k, 10).unwrap();
    ledger.revoke(g, h, 10).unwrap();

    // Pledge survives the revocation untouched and now exceeds the balance.
    assert_eq!(ledger.balance_of(h), 0);
    assert_eq!(ledger.collateral_deposit(h, k), 10);
    assert!(ledger.total_pledged_by(h) > ledger.balance_of(h));

    // A burn is bounded by the allowance ledger first, then fails on the
    // actual balance.
    let err = ledger.burn_deposit(k, h, 10).unwrap_err();
    assert_eq!(
        err,
        LedgerError::InsufficientAssigned { available: 0, requested: 10 }
    );
    assert_eq!(ledger.collateral_deposit(h, k), 10);

    // A release never touches balances, so it still succeeds in full.
    ledger.return_deposit(k, h, 10).unwrap();
    assert_eq!(ledger.collateral_deposit(h, k), 0);
}

/// The symmetric direction: a collateral burn shrinks the balance below the
/// issuer's revocation allowance. The allowance is not clipped; the revoke
/// is bounded by the remaining balance at its own moment.
#[test]
fn collateral_burn_leaves_issuance_over_committed() {
    let (mut ledger, g) = deploy();
    let (h, k) = (addr(2), addr(3));

    ledger.issue(g, h, 10).unwrap();
    ledger.grant_collateral(h, k, 10).unwrap();
    ledger.burn_deposit(k, h, 10).unwrap();

    assert_eq!(ledger.balance_of(h), 0);
    assert_eq!(ledger.get_issuance(h, g), 10);

    let err = ledger.revoke(g, h, 10).unwrap_err();
    assert_eq!(
        err,
        LedgerError::InsufficientAssigned { available: 0, requested: 10 }
    );
    assert_eq!(ledger.get_issuance(h, g), 10);
}

// ---------------------------------------------------------------------------
// Rejection atomicity
// ---------------------------------------------------------------------------

/// Every rejected call must leave the whole ledger byte-for-byte unchanged.
/// Serializing the full state before and after each failure catches any
/// partial bookkeeping update in any store.
#[test]
fn rejected_calls_leave_state_identical() {
    let (mut ledger, g) = deploy();
    let (h, k) = (addr(2), addr(3));
    ledger.issue(g, h, 10).unwrap();
    ledger.grant_collateral(h, k, 6).unwrap();

    let failures: Vec<Box<dyn Fn(&mut Ledger) -> Result<(), LedgerError>>> = vec![
        Box::new(move |l| l.issue(g, Address::ZERO, 1)),
        Box::new(move |l| l.issue(g, h, 1_000)),
        Box::new(move |l| l.issue(k, h, 1)),
        Box::new(move |l| l.revoke(g, Address::ZERO, 1)),
        Box::new(move |l| l.revoke(g, h, 11)),
        Box::new(move |l| l.revoke(k, h, 1)),
        Box::new(move |l| l.grant_collateral(h, k, 5)),
        Box::new(move |l| l.burn_deposit(k, h, 7)),
        Box::new(move |l| l.return_deposit(k, h, 7)),
        Box::new(move |l| l.burn_deposit(g, h, 1)),
    ];

    for failure in failures {
        let before = serde_json::to_value(&ledger).unwrap();
        assert!(failure(&mut ledger).is_err());
        let after = serde_json::to_value(&ledger).unwrap();
        assert_eq!(before, after);
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn ledger_serialization_roundtrip() {
    let (mut ledger, g) = deploy();
    let (h, k) = (addr(2), addr(3));
    ledger.issue(g, h, 10).unwrap();
    ledger.grant_collateral(h, k, 6).unwrap();
    ledger.revoke(g, h, 2).unwrap();

    let json = serde_json::to_string(&ledger).unwrap();
    let restored: Ledger = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.name(), ledger.name());
    assert_eq!(restored.total_supply(), ledger.total_supply());
    assert_eq!(restored.unassigned_balance_of(g), 90);
    assert_eq!(restored.balance_of(h), 8);
    assert_eq!(restored.get_issuance(h, g), 8);
    assert_eq!(restored.collateral_deposit(h, k), 6);
    assert_eq!(restored.total_burned(), 2);
    assert_eq!(restored.events(), ledger.events());
}
