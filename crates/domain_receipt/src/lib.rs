//! Receipt Domain - Issuance, Numbering, and Verification
//!
//! This crate implements the receipt issuance pipeline for a paying-guest
//! property manager:
//!
//! - **Financial Calculator**: pure computation of totals, balance due, and
//!   the amount-in-words line from raw charge fields
//! - **Numbering Service**: per-owner, per-calendar-month sequential receipt
//!   numbers (`PG<year><month><seq>`), with uniqueness enforced by the store
//! - **Verification Engine**: tamper-evident token generation and public
//!   token resolution with a monotone verification count
//! - **Issuance Service**: orchestrates the above into a single atomic
//!   creation, with a best-effort audit trail
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_receipt::{NewReceipt, ReceiptService};
//!
//! let service = ReceiptService::new(store, recorder, clock);
//! let receipt = service.issue(new_receipt).await?;
//! assert!(receipt.receipt_number.starts_with("PG"));
//! ```

pub mod receipt;
pub mod financial;
pub mod numbering;
pub mod verification;
pub mod service;
pub mod ports;
pub mod error;

pub use receipt::{Receipt, ChargeSet, NewReceipt, PaymentMethod};
pub use financial::{compute, ReceiptTotals};
pub use numbering::NumberingService;
pub use verification::{issue_token, VerificationService};
pub use service::ReceiptService;
pub use ports::{
    ReceiptStore, ReceiptPatch, ActivityRecorder, ActivityEvent, ActivityKind,
    record_best_effort, constraints,
};
pub use error::ReceiptError;
