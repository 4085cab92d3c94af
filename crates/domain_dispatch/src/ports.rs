//! Dispatch Domain Ports
//!
//! Port interfaces for the dispatch coordinator's collaborators: the
//! document renderer and the mail sender. Both are external capabilities;
//! the core only defines the contracts and the value objects that cross
//! them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::{DomainPort, OwnerId};
use domain_receipt::Receipt;

/// The issuing property manager as it appears on documents and emails
///
/// Authentication and account management live outside the core; callers
/// pass the already-resolved profile in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerProfile {
    pub id: OwnerId,
    pub display_name: String,
    pub property_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A rendered receipt document ready to attach
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Document rendering failure
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct RenderError {
    pub reason: String,
}

/// Renders a receipt into a binary document artifact
///
/// Pure function of its inputs; no side effects.
#[async_trait]
pub trait DocumentRenderer: DomainPort {
    async fn render(&self, receipt: &Receipt, owner: &OwnerProfile)
        -> Result<RenderedDocument, RenderError>;
}

/// An outbound email with one document attachment
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub from: String,
    pub reply_to: Option<String>,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
    pub attachment: EmailAttachment,
}

/// A named attachment
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl From<RenderedDocument> for EmailAttachment {
    fn from(doc: RenderedDocument) -> Self {
        Self {
            filename: doc.filename,
            content_type: doc.content_type,
            bytes: doc.bytes,
        }
    }
}

/// Provider acknowledgement for one accepted message
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    /// Opaque provider reference for the accepted message
    pub provider_message_id: String,
}

/// Mail delivery failure with the provider's reason
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct MailDeliveryError {
    pub reason: String,
}

/// Sends email through the configured provider
#[async_trait]
pub trait MailSender: DomainPort {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, MailDeliveryError>;
}
