//! Dispatch domain errors

use core_kernel::PortError;
use thiserror::Error;

use crate::ports::{MailDeliveryError, RenderError};

/// Errors that can occur while dispatching receipts
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Receipt does not exist or belongs to another owner
    #[error("Receipt not found: {0}")]
    NotFound(String),

    /// No override address and no stored tenant address
    #[error("Receipt {receipt_number} has no recipient email address")]
    MissingRecipient { receipt_number: String },

    /// The resolved address is not a syntactically valid email
    #[error("Invalid recipient address: {address}")]
    InvalidRecipient { address: String },

    /// Bulk request exceeds the batch cap; rejected before any work
    #[error("Batch of {requested} receipts exceeds the limit of {max}")]
    BatchTooLarge { requested: usize, max: usize },

    /// The mail provider refused or failed the send; dispatch state is
    /// untouched and the operation is safe to retry
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    /// Document rendering failed; nothing was sent
    #[error("Document rendering failed: {0}")]
    RenderFailed(String),

    /// Store-level failure
    #[error(transparent)]
    Store(#[from] PortError),
}

impl From<MailDeliveryError> for DispatchError {
    fn from(e: MailDeliveryError) -> Self {
        DispatchError::DeliveryFailed(e.reason)
    }
}

impl From<RenderError> for DispatchError {
    fn from(e: RenderError) -> Self {
        DispatchError::RenderFailed(e.reason)
    }
}
