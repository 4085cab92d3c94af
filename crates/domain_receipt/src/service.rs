//! Receipt application service
//!
//! Orchestrates issuance: validation and totals first (pure, no side
//! effects), then numbering, token generation, a single atomic insert, and
//! a best-effort audit event. Also owns the scoped lookup and the deletion
//! paths.

use std::sync::Arc;

use serde_json::json;

use core_kernel::{Clock, OwnerId, ReceiptId};

use crate::error::ReceiptError;
use crate::financial;
use crate::numbering::NumberingService;
use crate::ports::{
    constraints, record_best_effort, ActivityEvent, ActivityKind, ActivityRecorder, ReceiptStore,
};
use crate::receipt::{NewReceipt, Receipt};
use crate::verification;

/// Issues, finds, and deletes receipts on behalf of an owner
pub struct ReceiptService {
    store: Arc<dyn ReceiptStore>,
    activity: Arc<dyn ActivityRecorder>,
    clock: Arc<dyn Clock>,
    numbering: NumberingService,
}

impl ReceiptService {
    /// Creates a new receipt service
    pub fn new(
        store: Arc<dyn ReceiptStore>,
        activity: Arc<dyn ActivityRecorder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let numbering = NumberingService::new(Arc::clone(&store));
        Self {
            store,
            activity,
            clock,
            numbering,
        }
    }

    /// Issues a new receipt.
    ///
    /// Totals are recomputed from the charge fields; the caller cannot
    /// supply them. A lost race on the receipt number surfaces as
    /// [`ReceiptError::DuplicateNumber`] and the caller may re-invoke; the
    /// service never retries internally, which could silently move the
    /// receipt into a different month's sequence. A token collision is a
    /// hard [`core_kernel::PortError::ConstraintViolation`] failure.
    pub async fn issue(&self, request: NewReceipt) -> Result<Receipt, ReceiptError> {
        let totals = financial::compute(&request.charges, request.amount_paid)?;

        let now = self.clock.now();
        let receipt_number = self.numbering.next_number(request.owner_id, now).await?;
        let verification_token = verification::issue_token(
            &receipt_number,
            &request.tenant_name,
            totals.amount_paid,
            now,
        );

        let receipt = Receipt {
            id: ReceiptId::new_v7(),
            receipt_number: receipt_number.clone(),
            verification_token,
            owner_id: request.owner_id,
            tenant_name: request.tenant_name,
            tenant_email: request.tenant_email,
            room_number: request.room_number,
            period: request.period,
            charges: request.charges,
            total_amount: totals.total_amount,
            amount_paid: totals.amount_paid,
            balance_due: totals.balance_due,
            amount_in_words: totals.amount_in_words,
            payment_method: request.payment_method,
            payment_date: request.payment_date,
            notes: request.notes,
            verification_count: 0,
            last_verified_at: None,
            is_verified: false,
            sent_via_email: false,
            email_sent_at: None,
            last_email_recipient: None,
            email_message_id: None,
            created_at: now,
            updated_at: now,
        };

        match self.store.insert(&receipt).await {
            Ok(()) => {}
            Err(e) if e.violates(constraints::RECEIPT_NUMBER) => {
                tracing::warn!(%receipt_number, "lost issuance race; caller may retry");
                return Err(ReceiptError::DuplicateNumber(receipt_number));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            %receipt_number,
            owner = %receipt.owner_id,
            total = %receipt.total_amount,
            "receipt issued"
        );

        record_best_effort(
            self.activity.as_ref(),
            ActivityEvent::new(
                receipt.owner_id,
                ActivityKind::ReceiptIssued,
                json!({
                    "receipt_number": receipt.receipt_number,
                    "tenant_name": receipt.tenant_name,
                    "total_amount": receipt.total_amount.amount(),
                    "amount_paid": receipt.amount_paid.amount(),
                }),
                None,
                now,
            ),
        )
        .await;

        Ok(receipt)
    }

    /// Looks up one receipt, scoped to the requesting owner.
    ///
    /// A receipt belonging to another owner is `NotFound`, not `Forbidden`:
    /// existence is never leaked across accounts.
    pub async fn find(&self, owner: OwnerId, id: ReceiptId) -> Result<Receipt, ReceiptError> {
        self.store
            .find_by_id(owner, id)
            .await?
            .ok_or_else(|| ReceiptError::NotFound(id.to_string()))
    }

    /// Deletes one receipt, scoped to the requesting owner
    pub async fn delete(&self, owner: OwnerId, id: ReceiptId) -> Result<(), ReceiptError> {
        let receipt = self.find(owner, id).await?;
        self.store.delete(owner, id).await?;

        let now = self.clock.now();
        record_best_effort(
            self.activity.as_ref(),
            ActivityEvent::new(
                owner,
                ActivityKind::ReceiptDeleted,
                json!({ "receipt_number": receipt.receipt_number }),
                None,
                now,
            ),
        )
        .await;

        Ok(())
    }

    /// Deletes every receipt the owner has issued.
    ///
    /// Called when the owner account is permanently removed; returns the
    /// number of receipts cascaded away.
    pub async fn delete_all_for_owner(&self, owner: OwnerId) -> Result<u64, ReceiptError> {
        let removed = self.store.delete_all_for_owner(owner).await?;

        let now = self.clock.now();
        record_best_effort(
            self.activity.as_ref(),
            ActivityEvent::new(
                owner,
                ActivityKind::ReceiptDeleted,
                json!({ "cascade": true, "removed": removed }),
                None,
                now,
            ),
        )
        .await;

        Ok(removed)
    }
}
