//! Receipt domain errors

use core_kernel::{MoneyError, OwnerId, PortError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the receipt domain
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A charge or payment amount was negative
    #[error("Invalid amount for {field}: {amount}")]
    InvalidAmount { field: &'static str, amount: Decimal },

    /// More than 9999 receipts issued by one owner in one calendar month
    #[error("Receipt sequence exhausted for owner {owner} in {year}-{month:02}")]
    SequenceExhausted { owner: OwnerId, year: i32, month: u32 },

    /// Another issuance committed the same receipt number first; retryable
    #[error("Duplicate receipt number: {0}")]
    DuplicateNumber(String),

    /// Receipt (or verification token) does not exist, or is not visible
    /// to the requesting owner
    #[error("Receipt not found: {0}")]
    NotFound(String),

    /// Money arithmetic failure (currency mismatch)
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Store-level failure, including hard constraint violations
    #[error(transparent)]
    Store(#[from] PortError),
}

impl ReceiptError {
    /// Creates a NotFound error
    pub fn not_found(what: impl Into<String>) -> Self {
        ReceiptError::NotFound(what.into())
    }

    /// Returns true if the caller may re-invoke the failed operation
    ///
    /// Covers the issuance race on `receipt_number` and transient store
    /// failures. The service itself never retries internally.
    pub fn is_retryable(&self) -> bool {
        match self {
            ReceiptError::DuplicateNumber(_) => true,
            ReceiptError::Store(e) => e.is_transient(),
            _ => false,
        }
    }
}
