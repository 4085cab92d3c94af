//! In-memory port adapters
//!
//! Every adapter honors its port contract exactly - including the atomic
//! uniqueness constraints of the store and the patch semantics - so the
//! full pipeline can be exercised without external services.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{DomainPort, OwnerId, PortError, ReceiptId};
use domain_dispatch::{
    DeliveryReceipt, DocumentRenderer, MailDeliveryError, MailSender, OutboundEmail, OwnerProfile,
    RenderError, RenderedDocument,
};
use domain_receipt::{
    constraints, ActivityEvent, ActivityKind, ActivityRecorder, Receipt, ReceiptPatch, ReceiptStore,
};

/// In-memory receipt store with atomic unique constraints
///
/// `insert` checks the `receipt_number` and `verification_token` indexes
/// under one lock, mirroring a database unique constraint: the check and
/// the write are indivisible.
#[derive(Default)]
pub struct InMemoryReceiptStore {
    receipts: Mutex<HashMap<ReceiptId, Receipt>>,
}

impl InMemoryReceiptStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of receipts currently stored
    pub fn len(&self) -> usize {
        self.receipts.lock().unwrap().len()
    }

    /// Returns true if the store holds no receipts
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of one receipt regardless of owner, for assertions
    pub fn get(&self, id: ReceiptId) -> Option<Receipt> {
        self.receipts.lock().unwrap().get(&id).cloned()
    }
}

impl DomainPort for InMemoryReceiptStore {}

#[async_trait]
impl ReceiptStore for InMemoryReceiptStore {
    async fn insert(&self, receipt: &Receipt) -> Result<(), PortError> {
        let mut receipts = self.receipts.lock().unwrap();

        if receipts
            .values()
            .any(|r| r.receipt_number == receipt.receipt_number)
        {
            return Err(PortError::constraint(
                constraints::RECEIPT_NUMBER,
                format!("{} already exists", receipt.receipt_number),
            ));
        }
        if receipts
            .values()
            .any(|r| r.verification_token == receipt.verification_token)
        {
            return Err(PortError::constraint(
                constraints::VERIFICATION_TOKEN,
                "verification token already exists".to_string(),
            ));
        }

        receipts.insert(receipt.id, receipt.clone());
        Ok(())
    }

    async fn find_by_id(&self, owner: OwnerId, id: ReceiptId) -> Result<Option<Receipt>, PortError> {
        let receipts = self.receipts.lock().unwrap();
        Ok(receipts
            .get(&id)
            .filter(|r| r.owner_id == owner)
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Receipt>, PortError> {
        let receipts = self.receipts.lock().unwrap();
        Ok(receipts
            .values()
            .find(|r| r.verification_token == token)
            .cloned())
    }

    async fn count_since(&self, owner: OwnerId, since: DateTime<Utc>) -> Result<u64, PortError> {
        let receipts = self.receipts.lock().unwrap();
        Ok(receipts
            .values()
            .filter(|r| r.owner_id == owner && r.created_at >= since)
            .count() as u64)
    }

    async fn update(&self, id: ReceiptId, patch: ReceiptPatch) -> Result<Receipt, PortError> {
        let mut receipts = self.receipts.lock().unwrap();
        let receipt = receipts
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Receipt", id))?;
        patch.apply(receipt);
        Ok(receipt.clone())
    }

    async fn delete(&self, owner: OwnerId, id: ReceiptId) -> Result<(), PortError> {
        let mut receipts = self.receipts.lock().unwrap();
        match receipts.get(&id) {
            Some(r) if r.owner_id == owner => {
                receipts.remove(&id);
                Ok(())
            }
            _ => Err(PortError::not_found("Receipt", id)),
        }
    }

    async fn delete_all_for_owner(&self, owner: OwnerId) -> Result<u64, PortError> {
        let mut receipts = self.receipts.lock().unwrap();
        let before = receipts.len();
        receipts.retain(|_, r| r.owner_id != owner);
        Ok((before - receipts.len()) as u64)
    }
}

/// Activity recorder that captures events for assertions
#[derive(Default)]
pub struct RecordingActivityLog {
    events: Mutex<Vec<ActivityEvent>>,
}

impl RecordingActivityLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events
    pub fn events(&self) -> Vec<ActivityEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Just the event kinds, in append order
    pub fn kinds(&self) -> Vec<ActivityKind> {
        self.events.lock().unwrap().iter().map(|e| e.kind).collect()
    }
}

impl DomainPort for RecordingActivityLog {}

#[async_trait]
impl ActivityRecorder for RecordingActivityLog {
    async fn append(&self, event: ActivityEvent) -> Result<(), PortError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Activity recorder that always fails, for best-effort tests
#[derive(Default)]
pub struct FailingActivityLog;

impl DomainPort for FailingActivityLog {}

#[async_trait]
impl ActivityRecorder for FailingActivityLog {
    async fn append(&self, _event: ActivityEvent) -> Result<(), PortError> {
        Err(PortError::connection("audit pipeline unreachable"))
    }
}

/// Mail sender that records messages and can reject chosen recipients
#[derive(Default)]
pub struct StubMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    rejected: Mutex<HashSet<String>>,
    counter: AtomicU64,
}

impl StubMailer {
    /// Creates a mailer that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every send to `address` fail with a provider error
    pub fn reject(&self, address: impl Into<String>) {
        self.rejected.lock().unwrap().insert(address.into());
    }

    /// Snapshot of accepted messages, in send order
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of accepted messages
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl DomainPort for StubMailer {}

#[async_trait]
impl MailSender for StubMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailDeliveryError> {
        if self.rejected.lock().unwrap().contains(&email.to) {
            return Err(MailDeliveryError {
                reason: format!("550 mailbox unavailable: {}", email.to),
            });
        }

        self.sent.lock().unwrap().push(email.clone());
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(DeliveryReceipt {
            provider_message_id: format!("provider-msg-{n}"),
        })
    }
}

/// Renderer that produces a tiny placeholder document
#[derive(Default)]
pub struct StubRenderer {
    failing: AtomicBool,
}

impl StubRenderer {
    /// Creates a renderer that always succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent render calls fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl DomainPort for StubRenderer {}

#[async_trait]
impl DocumentRenderer for StubRenderer {
    async fn render(
        &self,
        receipt: &Receipt,
        _owner: &OwnerProfile,
    ) -> Result<RenderedDocument, RenderError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RenderError {
                reason: "renderer unavailable".to_string(),
            });
        }

        Ok(RenderedDocument {
            filename: format!("{}.pdf", receipt.receipt_number),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF-1.4 stub".to_vec(),
        })
    }
}
