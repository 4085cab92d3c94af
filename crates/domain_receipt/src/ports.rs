//! Receipt Domain Ports
//!
//! Port interfaces the receipt domain needs from its collaborators: the
//! durable receipt store and the append-only activity recorder. Adapters
//! implement these traits (database, external audit pipeline, in-memory
//! for tests).
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_receipt::ports::ReceiptStore;
//! use std::sync::Arc;
//!
//! pub struct ReceiptService {
//!     store: Arc<dyn ReceiptStore>,
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::{AuditEventId, DomainPort, OwnerId, PortError, ReceiptId};

use crate::receipt::Receipt;

/// Names of the unique keys the store must enforce atomically.
///
/// Both are concurrency-sensitive: two concurrent issuances can compute the
/// same number or (astronomically unlikely) the same token, and the race is
/// resolved at insert time, never by an application-level check-then-write.
pub mod constraints {
    pub const RECEIPT_NUMBER: &str = "receipt_number";
    pub const VERIFICATION_TOKEN: &str = "verification_token";
}

/// Durable keyed storage for receipts
///
/// Keyed by owner and by receipt number/token. `insert` must fail with
/// [`PortError::ConstraintViolation`] naming the violated key when a
/// duplicate `receipt_number` or `verification_token` is written.
/// Owner-scoped reads return `None` for receipts belonging to other owners
/// so existence is never leaked across accounts.
#[async_trait]
pub trait ReceiptStore: DomainPort {
    /// Persists a freshly issued receipt
    async fn insert(&self, receipt: &Receipt) -> Result<(), PortError>;

    /// Looks up a receipt by id, scoped to the given owner
    async fn find_by_id(&self, owner: OwnerId, id: ReceiptId) -> Result<Option<Receipt>, PortError>;

    /// Looks up a receipt by its verification token (owner-independent)
    async fn find_by_token(&self, token: &str) -> Result<Option<Receipt>, PortError>;

    /// Counts the owner's receipts created at or after `since`
    async fn count_since(&self, owner: OwnerId, since: DateTime<Utc>) -> Result<u64, PortError>;

    /// Applies a partial update and returns the updated receipt
    async fn update(&self, id: ReceiptId, patch: ReceiptPatch) -> Result<Receipt, PortError>;

    /// Deletes one receipt, scoped to the given owner
    async fn delete(&self, owner: OwnerId, id: ReceiptId) -> Result<(), PortError>;

    /// Deletes every receipt the owner has issued; returns the count removed.
    /// Used when the owner account itself is permanently deleted.
    async fn delete_all_for_owner(&self, owner: OwnerId) -> Result<u64, PortError>;
}

/// Partial update for the mutable field groups of a receipt
///
/// Identity and financial fields are immutable after creation; only the
/// verification group and the dispatch group may change, each through its
/// own constructor.
#[derive(Debug, Clone, Default)]
pub struct ReceiptPatch {
    pub verification_count: Option<u64>,
    pub is_verified: Option<bool>,
    pub last_verified_at: Option<DateTime<Utc>>,

    pub sent_via_email: Option<bool>,
    pub email_sent_at: Option<DateTime<Utc>>,
    pub last_email_recipient: Option<String>,
    pub email_message_id: Option<String>,

    pub updated_at: Option<DateTime<Utc>>,
}

impl ReceiptPatch {
    /// Patch for one successful verification
    pub fn verification(count: u64, at: DateTime<Utc>) -> Self {
        Self {
            verification_count: Some(count),
            is_verified: Some(true),
            last_verified_at: Some(at),
            updated_at: Some(at),
            ..Default::default()
        }
    }

    /// Patch for one successful email dispatch
    pub fn dispatch(at: DateTime<Utc>, recipient: String, provider_message_id: String) -> Self {
        Self {
            sent_via_email: Some(true),
            email_sent_at: Some(at),
            last_email_recipient: Some(recipient),
            email_message_id: Some(provider_message_id),
            updated_at: Some(at),
            ..Default::default()
        }
    }

    /// Applies the patch to a receipt in place
    pub fn apply(&self, receipt: &mut Receipt) {
        if let Some(count) = self.verification_count {
            receipt.verification_count = count;
        }
        if let Some(verified) = self.is_verified {
            receipt.is_verified = verified;
        }
        if let Some(at) = self.last_verified_at {
            receipt.last_verified_at = Some(at);
        }
        if let Some(sent) = self.sent_via_email {
            receipt.sent_via_email = sent;
        }
        if let Some(at) = self.email_sent_at {
            receipt.email_sent_at = Some(at);
        }
        if let Some(recipient) = &self.last_email_recipient {
            receipt.last_email_recipient = Some(recipient.clone());
        }
        if let Some(message_id) = &self.email_message_id {
            receipt.email_message_id = Some(message_id.clone());
        }
        if let Some(at) = self.updated_at {
            receipt.updated_at = at;
        }
    }
}

/// Kind of audited action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ReceiptIssued,
    ReceiptVerified,
    ReceiptEmailed,
    BulkEmailCompleted,
    ReceiptDeleted,
}

/// One immutable audit event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: AuditEventId,
    pub owner_id: OwnerId,
    pub kind: ActivityKind,
    /// Free-form details, e.g. receipt number, recipient, counts
    pub details: Value,
    /// Network origin of the caller, when known (public verification)
    pub origin: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl ActivityEvent {
    /// Creates a new event
    pub fn new(
        owner_id: OwnerId,
        kind: ActivityKind,
        details: Value,
        origin: Option<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AuditEventId::new_v7(),
            owner_id,
            kind,
            details,
            origin,
            recorded_at: at,
        }
    }
}

/// Append-only activity trail
#[async_trait]
pub trait ActivityRecorder: DomainPort {
    /// Appends one audit event
    async fn append(&self, event: ActivityEvent) -> Result<(), PortError>;
}

/// Appends an audit event, swallowing and logging any failure.
///
/// Audit writes are fire-and-forget from the core's perspective: a failing
/// recorder must never roll back or fail the primary operation.
pub async fn record_best_effort(recorder: &dyn ActivityRecorder, event: ActivityEvent) {
    let kind = event.kind;
    if let Err(error) = recorder.append(event).await {
        tracing::warn!(%error, ?kind, "activity append failed; primary operation unaffected");
    }
}
