//! Dispatch Coordinator
//!
//! Single and bulk email dispatch sharing one render/send path. Per-item
//! persisted state always reflects exactly what happened to that item; the
//! batch never rolls back.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use core_kernel::{Clock, Currency, Money, ReceiptId};
use domain_receipt::{
    record_best_effort, ActivityEvent, ActivityKind, ActivityRecorder, Receipt, ReceiptPatch,
    ReceiptStore,
};

use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::message;
use crate::pacing::SendPacer;
use crate::ports::{DocumentRenderer, MailSender, OwnerProfile};

/// Outcome of one successful dispatch
#[derive(Debug, Clone)]
pub struct DispatchReceipt {
    pub receipt_id: ReceiptId,
    pub receipt_number: String,
    pub recipient: String,
    pub provider_message_id: String,
    pub sent_at: DateTime<Utc>,
}

/// One successfully sent item in a bulk result
#[derive(Debug, Clone)]
pub struct BulkSent {
    pub receipt_id: ReceiptId,
    pub receipt_number: String,
    pub recipient: String,
    pub provider_message_id: String,
    /// The receipt's total amount, summed into the aggregate
    pub amount: Money,
}

/// Why an item was not sent
#[derive(Debug, Clone)]
pub enum NotSentReason {
    /// Cooldown active; soft skip, not an error
    Skipped { resend_available_at: DateTime<Utc> },
    /// The item failed with the given reason; the batch continued
    Failed { reason: String },
}

/// One failed or skipped item in a bulk result
#[derive(Debug, Clone)]
pub struct BulkNotSent {
    pub receipt_id: ReceiptId,
    /// Known once the receipt was read; `None` when lookup itself failed
    pub receipt_number: Option<String>,
    pub reason: NotSentReason,
}

impl BulkNotSent {
    /// Sort key: receipt number when known, id rendering as fallback
    fn sort_key(&self) -> String {
        self.receipt_number
            .clone()
            .unwrap_or_else(|| self.receipt_id.to_string())
    }

    /// Returns true for cooldown skips
    pub fn is_skip(&self) -> bool {
        matches!(self.reason, NotSentReason::Skipped { .. })
    }
}

/// Per-outcome counts for one bulk call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkSummary {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Structured result of one bulk dispatch
#[derive(Debug, Clone)]
pub struct BulkDispatchResult {
    pub summary: BulkSummary,
    /// Sorted by receipt number
    pub sent: Vec<BulkSent>,
    /// Failures and skips, sorted by receipt number (id fallback)
    pub not_sent: Vec<BulkNotSent>,
    /// Aggregate total amount across successfully sent receipts, in the
    /// currency of the first sent receipt (zero INR when nothing was sent)
    pub total_amount_sent: Money,
}

/// Coordinates rendering, sending, and dispatch-state persistence
pub struct DispatchCoordinator {
    store: Arc<dyn ReceiptStore>,
    renderer: Arc<dyn DocumentRenderer>,
    mailer: Arc<dyn MailSender>,
    activity: Arc<dyn ActivityRecorder>,
    clock: Arc<dyn Clock>,
    pacer: Arc<dyn SendPacer>,
    config: DispatchConfig,
}

impl DispatchCoordinator {
    /// Creates a new coordinator
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<dyn ReceiptStore>,
        renderer: Arc<dyn DocumentRenderer>,
        mailer: Arc<dyn MailSender>,
        activity: Arc<dyn ActivityRecorder>,
        clock: Arc<dyn Clock>,
        pacer: Arc<dyn SendPacer>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            store,
            renderer,
            mailer,
            activity,
            clock,
            pacer,
            config,
        }
    }

    /// Emails one receipt.
    ///
    /// The receipt is resolved scoped to the requesting owner; a receipt
    /// belonging to someone else is `NotFound` (existence is not leaked).
    /// Dispatch state is persisted only after the provider accepts the
    /// message, so any failure leaves the receipt safely retryable.
    pub async fn send_one(
        &self,
        owner: &OwnerProfile,
        receipt_id: ReceiptId,
        recipient_override: Option<&str>,
    ) -> Result<DispatchReceipt, DispatchError> {
        let receipt = self
            .store
            .find_by_id(owner.id, receipt_id)
            .await?
            .ok_or_else(|| DispatchError::NotFound(receipt_id.to_string()))?;

        self.dispatch_item(owner, &receipt, recipient_override, None).await
    }

    /// Emails many receipts, sequentially, with per-item outcomes.
    ///
    /// Items are attempted in the caller-supplied order; the result lists
    /// are re-sorted by receipt number for deterministic display. Each
    /// item's state is re-read immediately before its own cooldown check so
    /// the check observes prior iterations' writes. The aggregate total is
    /// carried in the currency of the first sent receipt; an item whose
    /// total cannot be added to it fails before its email goes out, never
    /// mid-loop. The cooldown itself is
    /// a wall-clock comparison without locking: two near-simultaneous bulk
    /// calls for the same receipt may both pass it and double-send. A crash
    /// mid-batch leaves processed items final and the remainder untouched;
    /// retrying is safe because the cooldown skips the already-sent ones.
    pub async fn send_many(
        &self,
        owner: &OwnerProfile,
        receipt_ids: &[ReceiptId],
        shared_note: Option<&str>,
    ) -> Result<BulkDispatchResult, DispatchError> {
        if receipt_ids.len() > self.config.max_batch_size {
            return Err(DispatchError::BatchTooLarge {
                requested: receipt_ids.len(),
                max: self.config.max_batch_size,
            });
        }

        let mut sent: Vec<BulkSent> = Vec::new();
        let mut not_sent: Vec<BulkNotSent> = Vec::new();
        // Currency is fixed by the first sent receipt; later mismatches
        // fail per-item, before their email goes out
        let mut total_amount_sent: Option<Money> = None;

        for &receipt_id in receipt_ids {
            let receipt = match self.store.find_by_id(owner.id, receipt_id).await {
                Ok(Some(receipt)) => receipt,
                Ok(None) => {
                    not_sent.push(BulkNotSent {
                        receipt_id,
                        receipt_number: None,
                        reason: NotSentReason::Failed {
                            reason: DispatchError::NotFound(receipt_id.to_string()).to_string(),
                        },
                    });
                    continue;
                }
                Err(e) => {
                    not_sent.push(BulkNotSent {
                        receipt_id,
                        receipt_number: None,
                        reason: NotSentReason::Failed { reason: e.to_string() },
                    });
                    continue;
                }
            };

            let now = self.clock.now();
            if receipt.within_cooldown(now, self.config.cooldown()) {
                let resend_available_at = receipt
                    .email_sent_at
                    .map(|sent_at| sent_at + self.config.cooldown())
                    .unwrap_or(now);
                tracing::debug!(
                    receipt_number = %receipt.receipt_number,
                    %resend_available_at,
                    "cooldown active; skipping"
                );
                not_sent.push(BulkNotSent {
                    receipt_id,
                    receipt_number: Some(receipt.receipt_number.clone()),
                    reason: NotSentReason::Skipped { resend_available_at },
                });
                continue;
            }

            let running_total = match &total_amount_sent {
                None => Ok(receipt.total_amount),
                Some(total) => total.checked_add(&receipt.total_amount),
            };
            let running_total = match running_total {
                Ok(total) => total,
                Err(e) => {
                    not_sent.push(BulkNotSent {
                        receipt_id,
                        receipt_number: Some(receipt.receipt_number.clone()),
                        reason: NotSentReason::Failed { reason: e.to_string() },
                    });
                    continue;
                }
            };

            match self.dispatch_item(owner, &receipt, None, shared_note).await {
                Ok(dispatched) => {
                    total_amount_sent = Some(running_total);
                    sent.push(BulkSent {
                        receipt_id,
                        receipt_number: dispatched.receipt_number,
                        recipient: dispatched.recipient,
                        provider_message_id: dispatched.provider_message_id,
                        amount: receipt.total_amount,
                    });
                    self.pacer.pause_between_sends().await;
                }
                Err(e) => {
                    not_sent.push(BulkNotSent {
                        receipt_id,
                        receipt_number: Some(receipt.receipt_number.clone()),
                        reason: NotSentReason::Failed { reason: e.to_string() },
                    });
                }
            }
        }

        let total_amount_sent = total_amount_sent.unwrap_or_else(|| Money::zero(Currency::INR));

        sent.sort_by(|a, b| a.receipt_number.cmp(&b.receipt_number));
        not_sent.sort_by_key(|item| item.sort_key());

        let skipped = not_sent.iter().filter(|item| item.is_skip()).count();
        let summary = BulkSummary {
            total: receipt_ids.len(),
            sent: sent.len(),
            failed: not_sent.len() - skipped,
            skipped,
        };

        tracing::info!(
            total = summary.total,
            sent = summary.sent,
            failed = summary.failed,
            skipped = summary.skipped,
            "bulk dispatch completed"
        );

        record_best_effort(
            self.activity.as_ref(),
            ActivityEvent::new(
                owner.id,
                ActivityKind::BulkEmailCompleted,
                json!({
                    "total": summary.total,
                    "sent": summary.sent,
                    "failed": summary.failed,
                    "skipped": summary.skipped,
                    "total_amount_sent": total_amount_sent.amount(),
                }),
                None,
                self.clock.now(),
            ),
        )
        .await;

        Ok(BulkDispatchResult {
            summary,
            sent,
            not_sent,
            total_amount_sent,
        })
    }

    /// Shared render/send/persist path for one receipt.
    ///
    /// Ordering matters: the store write happens only after the provider
    /// accepts the message, and the audit append only after the write. Any
    /// earlier failure leaves dispatch state unchanged.
    async fn dispatch_item(
        &self,
        owner: &OwnerProfile,
        receipt: &Receipt,
        recipient_override: Option<&str>,
        shared_note: Option<&str>,
    ) -> Result<DispatchReceipt, DispatchError> {
        let recipient = message::resolve_recipient(receipt, recipient_override)?;
        let document = self.renderer.render(receipt, owner).await?;
        let email = message::build_email(&self.config, owner, receipt, &recipient, document, shared_note);

        let delivery = self.mailer.send(&email).await?;

        let now = self.clock.now();
        let patch = ReceiptPatch::dispatch(
            now,
            recipient.clone(),
            delivery.provider_message_id.clone(),
        );
        self.store.update(receipt.id, patch).await?;

        tracing::info!(
            receipt_number = %receipt.receipt_number,
            recipient = %recipient,
            provider_message_id = %delivery.provider_message_id,
            "receipt emailed"
        );

        record_best_effort(
            self.activity.as_ref(),
            ActivityEvent::new(
                owner.id,
                ActivityKind::ReceiptEmailed,
                json!({
                    "receipt_number": receipt.receipt_number,
                    "recipient": recipient,
                    "provider_message_id": delivery.provider_message_id,
                }),
                None,
                now,
            ),
        )
        .await;

        Ok(DispatchReceipt {
            receipt_id: receipt.id,
            receipt_number: receipt.receipt_number.clone(),
            recipient,
            provider_message_id: delivery.provider_message_id,
            sent_at: now,
        })
    }
}
