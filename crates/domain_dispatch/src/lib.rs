//! Dispatch Domain - Receipt Email Delivery
//!
//! This crate implements the dispatch coordinator: given one or many receipt
//! identifiers it renders each receipt into a document, builds the email,
//! sends it through the mail-sender port, and persists the dispatch state.
//!
//! Bulk dispatch is strictly sequential with a fixed inter-send delay
//! (outbound provider rate shaping), a 30-minute per-recipient cooldown
//! (duplicate-send prevention across repeated bulk triggers), a 50-item
//! batch cap, and per-item outcome accounting: one item's failure never
//! aborts or rolls back the rest of the batch.

pub mod coordinator;
pub mod message;
pub mod pacing;
pub mod config;
pub mod ports;
pub mod error;

pub use coordinator::{
    BulkDispatchResult, BulkNotSent, BulkSent, BulkSummary, DispatchCoordinator, DispatchReceipt,
    NotSentReason,
};
pub use message::{build_email, resolve_recipient};
pub use pacing::{FixedDelayPacer, NoPacer, SendPacer};
pub use config::DispatchConfig;
pub use ports::{
    DeliveryReceipt, DocumentRenderer, EmailAttachment, MailDeliveryError, MailSender,
    OutboundEmail, OwnerProfile, RenderError, RenderedDocument,
};
pub use error::DispatchError;
