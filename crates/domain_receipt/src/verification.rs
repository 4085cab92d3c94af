//! Verification Engine
//!
//! Generates the tamper-evident verification token printed on each receipt
//! and resolves tokens back to receipts for the public "is this receipt
//! genuine" check.
//!
//! Receipt numbers are sequential and appear on printed documents, so the
//! token must not be derivable from them: generation mixes the
//! receipt-identifying fields with 32 bytes from a cryptographically strong
//! RNG before digesting.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde_json::json;
use sha2::{Digest, Sha256};

use core_kernel::{Clock, Money};

use crate::error::ReceiptError;
use crate::ports::{record_best_effort, ActivityEvent, ActivityKind, ActivityRecorder, ReceiptPatch, ReceiptStore};
use crate::receipt::Receipt;

/// Generates a verification token for a receipt being created.
///
/// SHA-256 over the receipt number, tenant name, amount paid, and creation
/// instant, salted with fresh OS-seeded randomness; hex-encoded (64 chars).
/// Called exactly once per receipt. Uniqueness is enforced by the store's
/// constraint on `verification_token`; a collision there is a hard creation
/// failure, never a silent retry with the same inputs.
pub fn issue_token(
    receipt_number: &str,
    tenant_name: &str,
    amount_paid: Money,
    created_at: DateTime<Utc>,
) -> String {
    let mut nonce = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut nonce);

    let mut hasher = Sha256::new();
    hasher.update(receipt_number.as_bytes());
    hasher.update(b"|");
    hasher.update(tenant_name.as_bytes());
    hasher.update(b"|");
    hasher.update(amount_paid.amount().to_string().as_bytes());
    hasher.update(b"|");
    hasher.update(
        created_at
            .timestamp_nanos_opt()
            .unwrap_or_else(|| created_at.timestamp_millis())
            .to_le_bytes(),
    );
    hasher.update(b"|");
    hasher.update(nonce);

    hex::encode(hasher.finalize())
}

/// Resolves verification tokens and maintains verification state
pub struct VerificationService {
    store: Arc<dyn ReceiptStore>,
    activity: Arc<dyn ActivityRecorder>,
    clock: Arc<dyn Clock>,
}

impl VerificationService {
    /// Creates a new verification service
    pub fn new(
        store: Arc<dyn ReceiptStore>,
        activity: Arc<dyn ActivityRecorder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { store, activity, clock }
    }

    /// Resolves a token to its receipt, recording the verification.
    ///
    /// Each successful resolution increments `verification_count` (no cap:
    /// the check is public and repeatable), latches `is_verified`, stamps
    /// `last_verified_at`, and appends one audit event carrying the caller's
    /// network origin. An unknown token returns `NotFound` with zero side
    /// effects and no audit trail.
    pub async fn resolve(&self, token: &str, origin: Option<&str>) -> Result<Receipt, ReceiptError> {
        let receipt = self
            .store
            .find_by_token(token)
            .await?
            .ok_or_else(|| ReceiptError::not_found("verification token not recognized"))?;

        let now = self.clock.now();
        let patch = ReceiptPatch::verification(receipt.verification_count + 1, now);
        let updated = self.store.update(receipt.id, patch).await?;

        tracing::info!(
            receipt_number = %updated.receipt_number,
            verification_count = updated.verification_count,
            "receipt verified"
        );

        record_best_effort(
            self.activity.as_ref(),
            ActivityEvent::new(
                updated.owner_id,
                ActivityKind::ReceiptVerified,
                json!({
                    "receipt_number": updated.receipt_number,
                    "verification_count": updated.verification_count,
                }),
                origin.map(str::to_string),
                now,
            ),
        )
        .await;

        Ok(updated)
    }
}
