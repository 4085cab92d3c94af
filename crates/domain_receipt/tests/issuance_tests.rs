//! Issuance, numbering, and lifecycle tests for domain_receipt

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, OwnerId, PortError, ReceiptId};
use domain_receipt::{
    ActivityKind, ChargeSet, Receipt, ReceiptError, ReceiptPatch, ReceiptService, ReceiptStore,
};
use test_utils::{
    assert_activity_kinds, ChargeFixtures, FailingActivityLog, InMemoryReceiptStore, ManualClock,
    NewReceiptBuilder, RecordingActivityLog,
};

struct Harness {
    store: Arc<InMemoryReceiptStore>,
    log: Arc<RecordingActivityLog>,
    clock: Arc<ManualClock>,
    service: ReceiptService,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryReceiptStore::new());
    let log = Arc::new(RecordingActivityLog::new());
    let clock = Arc::new(ManualClock::default_test_time());
    let service = ReceiptService::new(store.clone(), log.clone(), clock.clone());
    Harness { store, log, clock, service }
}

/// Store wrapper that reports a fixed receipt count, simulating either a
/// concurrent-issuance race (two callers both read the same count) or an
/// exhausted month sequence.
struct FixedCountStore {
    inner: InMemoryReceiptStore,
    count: u64,
}

impl core_kernel::DomainPort for FixedCountStore {}

#[async_trait]
impl ReceiptStore for FixedCountStore {
    async fn insert(&self, receipt: &Receipt) -> Result<(), PortError> {
        self.inner.insert(receipt).await
    }
    async fn find_by_id(&self, owner: OwnerId, id: ReceiptId) -> Result<Option<Receipt>, PortError> {
        self.inner.find_by_id(owner, id).await
    }
    async fn find_by_token(&self, token: &str) -> Result<Option<Receipt>, PortError> {
        self.inner.find_by_token(token).await
    }
    async fn count_since(&self, _owner: OwnerId, _since: DateTime<Utc>) -> Result<u64, PortError> {
        Ok(self.count)
    }
    async fn update(&self, id: ReceiptId, patch: ReceiptPatch) -> Result<Receipt, PortError> {
        self.inner.update(id, patch).await
    }
    async fn delete(&self, owner: OwnerId, id: ReceiptId) -> Result<(), PortError> {
        self.inner.delete(owner, id).await
    }
    async fn delete_all_for_owner(&self, owner: OwnerId) -> Result<u64, PortError> {
        self.inner.delete_all_for_owner(owner).await
    }
}

mod issuance {
    use super::*;

    #[tokio::test]
    async fn issues_with_computed_totals_and_number() {
        let h = harness();
        let owner = OwnerId::new();

        let receipt = h
            .service
            .issue(NewReceiptBuilder::new().with_owner(owner).build())
            .await
            .unwrap();

        assert_eq!(receipt.receipt_number, "PG2025080001");
        assert_eq!(receipt.total_amount, Money::inr(dec!(7600.00)));
        assert_eq!(receipt.amount_paid, Money::inr(dec!(7600.00)));
        assert!(receipt.balance_due.is_zero());
        assert_eq!(receipt.verification_count, 0);
        assert!(!receipt.is_verified);
        assert!(!receipt.sent_via_email);
        assert_eq!(receipt.verification_token.len(), 64);
        assert_activity_kinds(&h.log, &[ActivityKind::ReceiptIssued]);
    }

    #[tokio::test]
    async fn numbers_increase_within_a_month() {
        let h = harness();
        let owner = OwnerId::new();

        for expected in ["PG2025080001", "PG2025080002", "PG2025080003"] {
            let receipt = h
                .service
                .issue(NewReceiptBuilder::new().with_owner(owner).build())
                .await
                .unwrap();
            assert_eq!(receipt.receipt_number, expected);
        }
    }

    #[tokio::test]
    async fn sequence_resets_in_a_new_month() {
        let h = harness();
        let owner = OwnerId::new();

        let august = h
            .service
            .issue(NewReceiptBuilder::new().with_owner(owner).build())
            .await
            .unwrap();
        assert_eq!(august.receipt_number, "PG2025080001");

        h.clock.set(test_utils::TemporalFixtures::september_start());
        let september = h
            .service
            .issue(NewReceiptBuilder::new().with_owner(owner).build())
            .await
            .unwrap();
        assert_eq!(september.receipt_number, "PG2025090001");
    }

    #[tokio::test]
    async fn cross_owner_collision_is_a_retryable_conflict() {
        let h = harness();

        // Numbers are global, sequences are per-owner: a second owner's
        // first receipt in the same month lands on an already-taken number
        let a = h.service.issue(NewReceiptBuilder::new().build()).await.unwrap();
        assert_eq!(a.receipt_number, "PG2025080001");

        let b = h.service.issue(NewReceiptBuilder::new().build()).await;
        match b {
            Err(ref e @ ReceiptError::DuplicateNumber(ref number)) => {
                assert_eq!(number, "PG2025080001");
                assert!(e.is_retryable());
            }
            other => panic!("expected DuplicateNumber, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn negative_charge_fails_before_any_side_effect() {
        let h = harness();
        let charges = ChargeSet::zero(Currency::INR).with_base_rent(Money::inr(dec!(-5000)));

        let result = h
            .service
            .issue(NewReceiptBuilder::new().with_charges(charges).build())
            .await;

        assert!(matches!(
            result,
            Err(ReceiptError::InvalidAmount { field: "base_rent", .. })
        ));
        assert!(h.store.is_empty());
        assert!(h.log.events().is_empty());
    }

    #[tokio::test]
    async fn lost_number_race_surfaces_duplicate_number() {
        let store = Arc::new(FixedCountStore {
            inner: InMemoryReceiptStore::new(),
            count: 0,
        });
        let log = Arc::new(RecordingActivityLog::new());
        let clock = Arc::new(ManualClock::default_test_time());
        let service = ReceiptService::new(store, log, clock);
        let owner = OwnerId::new();

        // Both issuances compute sequence 1; the second insert loses
        let first = service
            .issue(NewReceiptBuilder::new().with_owner(owner).build())
            .await
            .unwrap();
        assert_eq!(first.receipt_number, "PG2025080001");

        let second = service
            .issue(NewReceiptBuilder::new().with_owner(owner).build())
            .await;
        match second {
            Err(ReceiptError::DuplicateNumber(number)) => assert_eq!(number, "PG2025080001"),
            other => panic!("expected DuplicateNumber, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn exhausted_month_fails_fast() {
        let store = Arc::new(FixedCountStore {
            inner: InMemoryReceiptStore::new(),
            count: 9999,
        });
        let log = Arc::new(RecordingActivityLog::new());
        let clock = Arc::new(ManualClock::default_test_time());
        let service = ReceiptService::new(store, log.clone(), clock);

        let result = service.issue(NewReceiptBuilder::new().build()).await;
        assert!(matches!(
            result,
            Err(ReceiptError::SequenceExhausted { month: 8, .. })
        ));
        assert!(log.events().is_empty());
    }

    #[tokio::test]
    async fn audit_failure_never_fails_issuance() {
        let store = Arc::new(InMemoryReceiptStore::new());
        let log = Arc::new(FailingActivityLog);
        let clock = Arc::new(ManualClock::default_test_time());
        let service = ReceiptService::new(store.clone(), log, clock);

        let receipt = service.issue(NewReceiptBuilder::new().build()).await.unwrap();
        assert!(store.get(receipt.id).is_some());
    }

    #[tokio::test]
    async fn explicit_partial_payment_is_preserved() {
        let h = harness();

        let receipt = h
            .service
            .issue(
                NewReceiptBuilder::new()
                    .with_charges(ChargeFixtures::rent_only())
                    .with_amount_paid(Money::inr(dec!(3000)))
                    .build(),
            )
            .await
            .unwrap();

        assert_eq!(receipt.amount_paid, Money::inr(dec!(3000.00)));
        assert_eq!(receipt.balance_due, Money::inr(dec!(2000.00)));
        assert_eq!(receipt.amount_in_words, "Three Thousand Rupees Only");
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn find_is_owner_scoped() {
        let h = harness();
        let owner = OwnerId::new();
        let receipt = h
            .service
            .issue(NewReceiptBuilder::new().with_owner(owner).build())
            .await
            .unwrap();

        assert!(h.service.find(owner, receipt.id).await.is_ok());

        let stranger = OwnerId::new();
        assert!(matches!(
            h.service.find(stranger, receipt.id).await,
            Err(ReceiptError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_and_audits() {
        let h = harness();
        let owner = OwnerId::new();
        let receipt = h
            .service
            .issue(NewReceiptBuilder::new().with_owner(owner).build())
            .await
            .unwrap();

        h.service.delete(owner, receipt.id).await.unwrap();

        assert!(h.store.is_empty());
        assert_activity_kinds(&h.log, &[ActivityKind::ReceiptIssued, ActivityKind::ReceiptDeleted]);
    }

    #[tokio::test]
    async fn delete_is_owner_scoped() {
        let h = harness();
        let owner = OwnerId::new();
        let receipt = h
            .service
            .issue(NewReceiptBuilder::new().with_owner(owner).build())
            .await
            .unwrap();

        let stranger = OwnerId::new();
        assert!(matches!(
            h.service.delete(stranger, receipt.id).await,
            Err(ReceiptError::NotFound(_))
        ));
        assert!(h.store.get(receipt.id).is_some());
    }

    #[tokio::test]
    async fn account_deletion_cascades() {
        let h = harness();
        let owner = OwnerId::new();
        let other = OwnerId::new();

        for _ in 0..3 {
            h.service
                .issue(NewReceiptBuilder::new().with_owner(owner).build())
                .await
                .unwrap();
            // Keep the two owners' numbers from colliding: interleave months
            h.clock.advance(Duration::days(40));
        }
        h.service
            .issue(NewReceiptBuilder::new().with_owner(other).build())
            .await
            .unwrap();

        let removed = h.service.delete_all_for_owner(owner).await.unwrap();
        assert_eq!(removed, 3);
        assert_eq!(h.store.len(), 1);
    }
}
