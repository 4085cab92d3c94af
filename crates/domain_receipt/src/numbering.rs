//! Numbering Service
//!
//! Derives the next sequential receipt number for an owner within the
//! current calendar month: `PG<year><month2><seq4>`. The sequence is
//! gap-tolerant and not collision-free under concurrent issuance; the
//! store's unique constraint on `receipt_number` is the arbiter, and a
//! losing writer surfaces [`ReceiptError::DuplicateNumber`] for the caller
//! to retry. A global in-process counter would not survive multiple
//! instances, so there is none.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};

use core_kernel::{month_start, OwnerId};

use crate::error::ReceiptError;
use crate::ports::ReceiptStore;

/// Prefix for every receipt number
pub const NUMBER_PREFIX: &str = "PG";

/// Largest sequence representable in the four-digit suffix
pub const MAX_SEQUENCE: u64 = 9999;

/// Derives month-scoped sequential receipt numbers
pub struct NumberingService {
    store: Arc<dyn ReceiptStore>,
}

impl NumberingService {
    /// Creates a new numbering service over the given store
    pub fn new(store: Arc<dyn ReceiptStore>) -> Self {
        Self { store }
    }

    /// Returns the next receipt number for `owner` at `at`.
    ///
    /// Counts the owner's receipts created since the first instant of the
    /// month containing `at`; the new number carries `count + 1`. Fails
    /// fast with [`ReceiptError::SequenceExhausted`] rather than wrapping
    /// or truncating past 9999.
    pub async fn next_number(&self, owner: OwnerId, at: DateTime<Utc>) -> Result<String, ReceiptError> {
        let since = month_start(at);
        let count = self.store.count_since(owner, since).await?;

        let sequence = count + 1;
        if sequence > MAX_SEQUENCE {
            return Err(ReceiptError::SequenceExhausted {
                owner,
                year: at.year(),
                month: at.month(),
            });
        }

        Ok(format_number(at, sequence))
    }
}

/// Formats a receipt number from its parts
pub fn format_number(at: DateTime<Utc>, sequence: u64) -> String {
    format!("{}{}{:02}{:04}", NUMBER_PREFIX, at.year(), at.month(), sequence)
}
