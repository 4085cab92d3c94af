//! End-to-end pipeline tests: issue, verify, dispatch, delete
//!
//! Exercises the full receipt lifecycle across the domain crates through
//! the in-memory adapters, the way a deployed instance wires them.

use std::sync::Arc;

use chrono::Duration;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::{Clock, Money};
use domain_dispatch::{DispatchConfig, DispatchCoordinator, NoPacer, OwnerProfile};
use domain_receipt::{financial, ActivityKind, ReceiptService, VerificationService};
use test_utils::{
    charge_set_strategy, InMemoryReceiptStore, ManualClock, NewReceiptBuilder, OwnerFixtures,
    RecordingActivityLog, StubMailer, StubRenderer,
};

struct Pipeline {
    store: Arc<InMemoryReceiptStore>,
    log: Arc<RecordingActivityLog>,
    mailer: Arc<StubMailer>,
    clock: Arc<ManualClock>,
    owner: OwnerProfile,
    receipts: ReceiptService,
    verification: VerificationService,
    dispatch: DispatchCoordinator,
}

fn pipeline() -> Pipeline {
    tracing_subscriber::fmt().with_test_writer().try_init().ok();

    let store = Arc::new(InMemoryReceiptStore::new());
    let log = Arc::new(RecordingActivityLog::new());
    let mailer = Arc::new(StubMailer::new());
    let clock = Arc::new(ManualClock::default_test_time());
    let owner = OwnerFixtures::sharma_pg();

    let receipts = ReceiptService::new(store.clone(), log.clone(), clock.clone());
    let verification = VerificationService::new(store.clone(), log.clone(), clock.clone());
    let dispatch = DispatchCoordinator::new(
        store.clone(),
        Arc::new(StubRenderer::new()),
        mailer.clone(),
        log.clone(),
        clock.clone(),
        Arc::new(NoPacer),
        DispatchConfig::default(),
    );

    Pipeline {
        store,
        log,
        mailer,
        clock,
        owner,
        receipts,
        verification,
        dispatch,
    }
}

#[tokio::test]
async fn full_lifecycle_leaves_a_complete_audit_trail() {
    let p = pipeline();

    // Issue
    let receipt = p
        .receipts
        .issue(NewReceiptBuilder::new().with_owner(p.owner.id).build())
        .await
        .unwrap();
    assert_eq!(receipt.receipt_number, "PG2025080001");

    // The tenant verifies it twice from different places
    p.verification
        .resolve(&receipt.verification_token, Some("198.51.100.7"))
        .await
        .unwrap();
    p.clock.advance(Duration::hours(1));
    let verified = p
        .verification
        .resolve(&receipt.verification_token, Some("203.0.113.20"))
        .await
        .unwrap();
    assert_eq!(verified.verification_count, 2);

    // The owner emails it as a one-receipt batch
    let bulk = p
        .dispatch
        .send_many(&p.owner, &[receipt.id], None)
        .await
        .unwrap();
    assert_eq!(bulk.summary.sent, 1);
    assert_eq!(bulk.total_amount_sent, receipt.total_amount);

    // Re-triggering the same batch immediately is a clean no-op
    let retry = p
        .dispatch
        .send_many(&p.owner, &[receipt.id], None)
        .await
        .unwrap();
    assert_eq!(retry.summary.sent, 0);
    assert_eq!(retry.summary.skipped, 1);
    assert_eq!(p.mailer.sent_count(), 1);

    // Cleanup
    p.receipts.delete(p.owner.id, receipt.id).await.unwrap();
    assert!(p.store.is_empty());

    assert_eq!(
        p.log.kinds(),
        vec![
            ActivityKind::ReceiptIssued,
            ActivityKind::ReceiptVerified,
            ActivityKind::ReceiptVerified,
            ActivityKind::ReceiptEmailed,
            ActivityKind::BulkEmailCompleted,
            ActivityKind::BulkEmailCompleted,
            ActivityKind::ReceiptDeleted,
        ]
    );
}

#[tokio::test]
async fn dispatch_state_survives_verification_and_vice_versa() {
    let p = pipeline();
    let receipt = p
        .receipts
        .issue(NewReceiptBuilder::new().with_owner(p.owner.id).build())
        .await
        .unwrap();

    p.dispatch.send_one(&p.owner, receipt.id, None).await.unwrap();
    let sent_at = p.clock.now();

    p.clock.advance(Duration::minutes(10));
    p.verification
        .resolve(&receipt.verification_token, None)
        .await
        .unwrap();

    // The verification patch must not clobber the dispatch group
    let stored = p.store.get(receipt.id).unwrap();
    assert!(stored.sent_via_email);
    assert_eq!(stored.email_sent_at, Some(sent_at));
    assert_eq!(stored.verification_count, 1);
    assert!(stored.is_verified);
}

#[tokio::test]
async fn a_month_of_activity_keeps_numbers_and_cooldowns_independent() {
    let p = pipeline();

    // Rent day: three tenants pay, three receipts go out in one batch
    let mut ids = Vec::new();
    for tenant in ["Asha Rao", "Vikram Mehta", "Divya Nair"] {
        let receipt = p
            .receipts
            .issue(
                NewReceiptBuilder::random_tenant()
                    .with_owner(p.owner.id)
                    .with_tenant_name(tenant)
                    .build(),
            )
            .await
            .unwrap();
        ids.push(receipt.id);
    }

    let bulk = p.dispatch.send_many(&p.owner, &ids, None).await.unwrap();
    assert_eq!(bulk.summary.sent, 3);
    assert_eq!(
        bulk.sent
            .iter()
            .map(|s| s.receipt_number.as_str())
            .collect::<Vec<_>>(),
        vec!["PG2025080001", "PG2025080002", "PG2025080003"]
    );

    // A late payer gets a receipt next month; the sequence starts over,
    // and the earlier receipts' cooldowns have long expired
    p.clock.advance(Duration::days(20));
    let late = p
        .receipts
        .issue(NewReceiptBuilder::new().with_owner(p.owner.id).build())
        .await
        .unwrap();
    assert_eq!(late.receipt_number, "PG2025090001");

    ids.push(late.id);
    let second_run = p.dispatch.send_many(&p.owner, &ids, None).await.unwrap();
    assert_eq!(second_run.summary.sent, 4);
    assert_eq!(second_run.summary.skipped, 0);
    assert_eq!(p.mailer.sent_count(), 7);
}

proptest! {
    // Totals computed at issuance must agree with the pure calculator for
    // any valid charge set
    #[test]
    fn issued_totals_match_the_calculator(charges in charge_set_strategy()) {
        let totals = financial::compute(&charges, None).unwrap();

        let expected = charges.base_rent
            + charges.security_deposit
            + charges.electricity_charges
            + charges.water_charges
            + charges.other_charges;
        prop_assert_eq!(totals.total_amount, expected);
        prop_assert_eq!(totals.amount_paid, expected);
        prop_assert_eq!(totals.balance_due, charges.previous_balance);
    }

    #[test]
    fn partial_payment_always_leaves_the_difference(paid_minor in 0i64..1_000_000i64) {
        let charges = test_utils::ChargeFixtures::standard();
        let paid = Money::from_minor(paid_minor, core_kernel::Currency::INR);

        let totals = financial::compute(&charges, Some(paid)).unwrap();
        prop_assert_eq!(
            totals.balance_due,
            totals.total_amount + charges.previous_balance - paid
        );
    }
}

#[test]
fn standard_fixture_totals_are_stable() {
    let totals = financial::compute(&test_utils::ChargeFixtures::standard(), None).unwrap();
    assert_eq!(totals.total_amount, Money::inr(dec!(7600.00)));
    assert_eq!(
        totals.amount_in_words,
        "Seven Thousand Six Hundred Rupees Only"
    );
}
